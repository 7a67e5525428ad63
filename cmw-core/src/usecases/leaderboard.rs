use itertools::Itertools;

use super::prelude::*;

/// Number of entries on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Name of the local user on the leaderboard.
pub const OWN_NAME: &str = "You";

/// Prizes for the top three places.
pub const PRIZES: [&str; 3] = [
    "$500 Coastal Stewardship Grant",
    "$300 Eco Gear Kit",
    "$200 Community Cleanup Pack",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Starts at 1
    pub rank: usize,
    pub name: String,
    pub points: u64,
    pub badge: Badge,
}

impl LeaderboardEntry {
    pub fn is_own(&self) -> bool {
        self.name == OWN_NAME
    }

    pub fn prize(&self) -> Option<&'static str> {
        self.rank.checked_sub(1).and_then(|i| PRIZES.get(i)).copied()
    }
}

/// Rank the local user among the other contributors.
///
/// Contributors with equal points keep their order and the
/// local user is ranked behind them.
pub fn leaderboard(contributors: &[Contributor], own_points: u64) -> Vec<LeaderboardEntry> {
    contributors
        .iter()
        .map(|c| (c.name.as_str(), c.points))
        .chain(std::iter::once((OWN_NAME, own_points)))
        .sorted_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs))
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(i, (name, points))| LeaderboardEntry {
            rank: i + 1,
            name: name.to_owned(),
            points,
            badge: Badge::from_points(points),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn contributors() -> Vec<Contributor> {
        [
            ("Aisha", 980),
            ("Rafi", 720),
            ("Lina", 410),
            ("Kenji", 360),
            ("Maya", 330),
            ("Sara", 280),
            ("Jon", 210),
            ("Fatima", 190),
        ]
        .into_iter()
        .map(|(name, points)| Contributor {
            name: name.into(),
            points,
        })
        .collect()
    }

    #[test]
    fn rank_own_points() {
        let entries = usecases::leaderboard(&contributors(), 500);
        assert_eq!(entries.len(), 9);
        let own = entries.iter().find(|e| e.is_own()).unwrap();
        assert_eq!(own.rank, 3);
        assert_eq!(own.badge, Badge::Silver);
        assert_eq!(entries[0].name, "Aisha");
        assert_eq!(entries[0].badge, Badge::Gold);
        assert_eq!(entries[0].prize(), Some("$500 Coastal Stewardship Grant"));
        assert_eq!(entries[8].name, "Fatima");
        assert_eq!(entries[8].prize(), None);
    }

    #[test]
    fn rank_after_contributors_with_equal_points() {
        let entries = usecases::leaderboard(&contributors(), 410);
        assert_eq!(entries[2].name, "Lina");
        assert_eq!(entries[3].name, OWN_NAME);
    }

    #[test]
    fn keep_the_top_ten() {
        let mut contributors = contributors();
        contributors.extend((0..5).map(|i| Contributor {
            name: format!("Guest {i}"),
            points: 100 + i,
        }));
        let entries = usecases::leaderboard(&contributors, 0);
        assert_eq!(entries.len(), LEADERBOARD_SIZE);
        assert!(entries.iter().all(|e| !e.is_own()));
        assert!(entries.windows(2).all(|w| w[0].points >= w[1].points));
        assert_eq!(
            entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
    }
}
