use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[default]
    Community,
    #[strum(serialize = "NGO")]
    Ngo,
    Govt,
    Researcher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Badge {
    Bronze,
    Silver,
    Gold,
}

impl Badge {
    pub const SILVER_POINTS: u64 = 500;
    pub const GOLD_POINTS: u64 = 800;

    pub const fn from_points(points: u64) -> Self {
        if points >= Self::GOLD_POINTS {
            Self::Gold
        } else if points >= Self::SILVER_POINTS {
            Self::Silver
        } else {
            Self::Bronze
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub points: u64,
}
