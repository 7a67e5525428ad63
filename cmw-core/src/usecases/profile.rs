use super::{load_reports::recent_reports, prelude::*};

/// Number of reports in the contribution history.
pub const PROFILE_RECENT_REPORTS: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub points: u64,
    pub role: Role,
    pub badge: Badge,
    /// Newest first
    pub recent_reports: Vec<Report>,
}

pub fn profile<R>(repo: &R) -> Result<Profile>
where
    R: PointsRepo + RoleRepo + ReportRepo,
{
    let points = repo.load_points()?;
    let role = repo.load_role()?.unwrap_or_default();
    let recent_reports = recent_reports(repo, PROFILE_RECENT_REPORTS)?;
    Ok(Profile {
        points,
        role,
        badge: Badge::from_points(points),
        recent_reports,
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn empty_profile() {
        let db = MockDb::default();
        let profile = usecases::profile(&db).unwrap();
        assert_eq!(profile.points, 0);
        assert_eq!(profile.role, Role::Community);
        assert_eq!(profile.badge, Badge::Bronze);
        assert!(profile.recent_reports.is_empty());
    }

    #[test]
    fn profile_after_many_reports() {
        let db = MockDb::default();
        for _ in 0..20 {
            let mut new_report = new_report(IncidentType::Cutting);
            new_report.role = Role::Govt;
            usecases::submit_report(&db, new_report).unwrap();
        }
        let profile = usecases::profile(&db).unwrap();
        assert_eq!(profile.points, 1000);
        assert_eq!(profile.role, Role::Govt);
        assert_eq!(profile.badge, Badge::Gold);
        assert_eq!(profile.recent_reports.len(), PROFILE_RECENT_REPORTS);
        assert_eq!(
            profile.recent_reports[0],
            db.load_reports().unwrap()[0]
        );
    }
}
