use anyhow::{anyhow, bail, Result};
use cmw_application::prelude::{DEFAULT_CHANGE_CHECK_INTERVAL, DEFAULT_POLL_INTERVAL};
use cmw_core::{
    entities::{Contributor, Id, MapPoint, Report, TimestampMs},
    gateways::geolocation::PositionRequest,
};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "mangrove-watch.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub reports: Reports,
    pub geolocation: GeoLocation,
    pub compose: Compose,
    pub status: Status,
    pub leaderboard: Leaderboard,
    pub map: Map,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct Reports {
    pub points_per_report: u64,
}

pub struct GeoLocation {
    pub gateway: GeoLocationGateway,
    pub request: PositionRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoLocationGateway {
    /// `None` if no position is available
    Fixed { pos: Option<MapPoint> },
    Http { url: String },
}

pub struct Compose {
    pub gateway: ComposeGateway,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeGateway {
    Log,
    OpenMailClient {
        opener: Option<String>,
    },
    /// For local testing purposes
    JsonFile {
        /// File system directory for writing compose requests into JSON files.
        dir: PathBuf,
    },
}

pub struct Status {
    pub poll_interval: Duration,
    pub change_check_interval: Duration,
}

pub struct Leaderboard {
    pub contributors: Vec<Contributor>,
}

pub struct Map {
    /// Shown together with the submitted reports
    pub sample_incidents: Vec<Report>,
}

fn sample_incident(index: usize, raw: raw::SampleIncident, now: TimestampMs) -> Result<Report> {
    let raw::SampleIncident {
        incident_type,
        lat,
        lng,
        description,
        age,
    } = raw;
    let pos = MapPoint::from_lat_lng_deg(lat, lng);
    if !pos.is_valid() {
        bail!("Invalid position of sample incident ({pos})");
    }
    let age = age.unwrap_or_default().as_millis();
    let created_at = TimestampMs::from_inner(now.into_inner() - i64::try_from(age)?);
    Ok(Report {
        id: Id::from(format!("s{}", index + 1)),
        incident_type,
        lat: pos.lat(),
        lng: pos.lng(),
        description,
        created_at,
        image_url: None,
    })
}

fn fixed_position(raw: raw::FixedPosition) -> Result<Option<MapPoint>> {
    let raw::FixedPosition { lat, lng } = raw;
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let pos = MapPoint::from_lat_lng_deg(lat, lng);
            if !pos.is_valid() {
                bail!("Invalid fixed position ({pos})");
            }
            Ok(Some(pos))
        }
        (None, None) => Ok(None),
        _ => Err(anyhow!("Incomplete fixed position: both 'lat' and 'lng' are required")),
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            reports,
            geolocation,
            compose,
            gateway,
            status,
            leaderboard,
            map,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        if connection_pool_size == 0 {
            bail!("The connection pool must not be empty");
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Reports { points_per_report } = reports.unwrap_or_default();
        let reports = Reports { points_per_report };

        let gateway = gateway.unwrap_or_default();

        let raw::GeoLocation {
            gateway: geo_gateway,
            timeout,
            high_accuracy,
        } = geolocation.unwrap_or_default();
        let geo_gateway = match geo_gateway.unwrap_or(raw::GeoLocationGateway::Fixed) {
            raw::GeoLocationGateway::Fixed => {
                let pos = fixed_position(gateway.fixed_position.clone().unwrap_or_default())?;
                GeoLocationGateway::Fixed { pos }
            }
            raw::GeoLocationGateway::Http => {
                let raw::HttpGeoLocation { url } =
                    gateway.http_geolocation.clone().ok_or_else(|| {
                        anyhow!("Missing 'http-geolocation' gateway configuration")
                    })?;
                log::debug!("Use HTTP geolocation gateway ({url})");
                GeoLocationGateway::Http { url }
            }
        };
        let default_request = PositionRequest::default();
        let geolocation = GeoLocation {
            gateway: geo_gateway,
            request: PositionRequest {
                timeout: timeout.unwrap_or(default_request.timeout),
                high_accuracy: high_accuracy.unwrap_or(default_request.high_accuracy),
            },
        };

        let compose_gateway = match compose.and_then(|c| c.gateway) {
            None | Some(raw::ComposeGateway::Log) => ComposeGateway::Log,
            Some(raw::ComposeGateway::OpenMailClient) => {
                let raw::OpenMailClient { opener } =
                    gateway.open_mail_client.clone().unwrap_or_default();
                ComposeGateway::OpenMailClient { opener }
            }
            Some(raw::ComposeGateway::JsonFile) => {
                let raw::ComposeToJsonFile { dir } =
                    gateway.compose_to_json_file.clone().ok_or_else(|| {
                        anyhow!("Missing 'compose-to-json-file' gateway configuration")
                    })?;
                log::debug!("Use JSON file compose gateway ({})", dir.display());
                ComposeGateway::JsonFile { dir }
            }
        };
        let compose = Compose {
            gateway: compose_gateway,
        };

        let raw::Status {
            poll_interval,
            change_check_interval,
        } = status.unwrap_or_default();
        let poll_interval = poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        let change_check_interval =
            change_check_interval.unwrap_or(DEFAULT_CHANGE_CHECK_INTERVAL);
        if poll_interval.is_zero() || change_check_interval.is_zero() {
            bail!("The status intervals must not be zero");
        }
        let status = Status {
            poll_interval,
            change_check_interval,
        };

        let raw::Leaderboard { contributors } = leaderboard.unwrap_or_default();
        let contributors = contributors
            .into_iter()
            .map(|raw::Contributor { name, points }| Contributor { name, points })
            .collect();
        let leaderboard = Leaderboard { contributors };

        let raw::Map { sample_incidents } = map.unwrap_or_default();
        let now = TimestampMs::now();
        let sample_incidents = sample_incidents
            .into_iter()
            .enumerate()
            .map(|(index, raw)| sample_incident(index, raw, now))
            .collect::<Result<_>>()?;
        let map = Map { sample_incidents };

        Ok(Self {
            db,
            reports,
            geolocation,
            compose,
            status,
            leaderboard,
            map,
        })
    }
}
