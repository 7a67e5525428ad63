use cmw_core::gateways::geolocation::{GeoLocationGateway, PositionRequest};
use cmw_entities::geo::MapPoint;

mod http;

pub use self::http::*;

/// Reports a preconfigured position, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition {
    pos: Option<MapPoint>,
}

impl FixedPosition {
    pub const fn new(pos: Option<MapPoint>) -> Self {
        Self { pos }
    }

    /// No position is available at all.
    pub const fn unavailable() -> Self {
        Self::new(None)
    }
}

impl GeoLocationGateway for FixedPosition {
    fn current_position(&self, _: &PositionRequest) -> Option<MapPoint> {
        self.pos
    }
}
