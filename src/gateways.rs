use crate::config;
use anyhow::Result;
use cmw_core::gateways::{compose::ComposeGateway, geolocation::GeoLocationGateway};
use cmw_gateways::{
    compose::{ComposeToJsonFile, LogOnly, OpenMailClient},
    geolocation::{FixedPosition, HttpGeoLocation},
};

pub type GeoLocationGw = Box<dyn GeoLocationGateway + Send + Sync + 'static>;

pub fn geolocation_gateway(cfg: &config::GeoLocationGateway) -> GeoLocationGw {
    match cfg {
        config::GeoLocationGateway::Fixed { pos } => {
            if pos.is_none() {
                log::debug!("No position configured");
            }
            Box::new(FixedPosition::new(*pos))
        }
        config::GeoLocationGateway::Http { url } => {
            log::debug!("Use HTTP geolocation gateway");
            Box::new(HttpGeoLocation { url: url.clone() })
        }
    }
}

pub fn compose_gateway(cfg: &config::ComposeGateway) -> Result<Box<dyn ComposeGateway>> {
    let gw: Box<dyn ComposeGateway> = match cfg {
        config::ComposeGateway::Log => {
            log::debug!("No mail client configured: only log compose requests");
            Box::new(LogOnly)
        }
        config::ComposeGateway::OpenMailClient { opener } => {
            let gw = opener
                .as_ref()
                .map(OpenMailClient::new)
                .unwrap_or_default();
            log::debug!("Open mail client with '{}'", gw.opener());
            Box::new(gw)
        }
        config::ComposeGateway::JsonFile { dir } => {
            log::info!("Write compose requests into {}", dir.display());
            Box::new(ComposeToJsonFile::try_new(dir)?)
        }
    };
    Ok(gw)
}
