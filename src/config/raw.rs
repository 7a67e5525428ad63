use cmw_core::entities::IncidentType;
use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("mangrove-watch.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub reports: Option<Reports>,
    pub geolocation: Option<GeoLocation>,
    pub compose: Option<Compose>,
    pub gateway: Option<Gateway>,
    pub status: Option<Status>,
    pub leaderboard: Option<Leaderboard>,
    pub map: Option<Map>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Reports {
    pub points_per_report: u64,
}

impl Default for Reports {
    fn default() -> Self {
        Config::default().reports.expect("Reports configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeoLocation {
    pub gateway: Option<GeoLocationGateway>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
    pub high_accuracy: Option<bool>,
}

impl Default for GeoLocation {
    fn default() -> Self {
        Config::default()
            .geolocation
            .expect("Geolocation configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeoLocationGateway {
    Fixed,
    Http,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Compose {
    pub gateway: Option<ComposeGateway>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComposeGateway {
    Log,
    OpenMailClient,
    JsonFile,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub fixed_position: Option<FixedPosition>,
    pub http_geolocation: Option<HttpGeoLocation>,
    pub open_mail_client: Option<OpenMailClient>,
    pub compose_to_json_file: Option<ComposeToJsonFile>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FixedPosition {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpGeoLocation {
    pub url: String,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenMailClient {
    pub opener: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComposeToJsonFile {
    pub dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Status {
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub poll_interval: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub change_check_interval: Option<Duration>,
}

impl Default for Status {
    fn default() -> Self {
        Config::default().status.expect("Status configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Leaderboard {
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Contributor {
    pub name: String,
    pub points: u64,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    #[serde(default)]
    pub sample_incidents: Vec<SampleIncident>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SampleIncident {
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    /// Time since the incident has been reported
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub age: Option<Duration>,
}
