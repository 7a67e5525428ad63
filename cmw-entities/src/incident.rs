use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumCount, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum IncidentType {
    Cutting,
    Dumping,
    Reclamation,
    #[serde(rename = "Sand Mining")]
    #[strum(to_string = "Sand Mining", serialize = "sand-mining")]
    SandMining,
    #[serde(rename = "Oil Spill")]
    #[strum(to_string = "Oil Spill", serialize = "oil-spill")]
    OilSpill,
    #[serde(rename = "Sewage Pollution")]
    #[strum(to_string = "Sewage Pollution", serialize = "sewage-pollution")]
    SewagePollution,
    Other,
}

/// Marker icon of an incident on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub abbr: &'static str,
}

impl IncidentType {
    #[rustfmt::skip]
    pub const fn marker_style(self) -> MarkerStyle {
        use IncidentType as T;
        let (color, abbr) = match self {
            T::Cutting         => ("#059669", "C"),
            T::Dumping         => ("#0d9488", "D"),
            T::Reclamation     => ("#0284c7", "R"),
            T::SandMining      => ("#d97706", "S"),
            T::OilSpill        => ("#e11d48", "O"),
            T::SewagePollution => ("#6d28d9", "P"),
            T::Other           => ("#64748b", "•"),
        };
        MarkerStyle { color, abbr }
    }
}
