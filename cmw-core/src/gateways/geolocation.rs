use std::time::Duration;

use cmw_entities::geo::MapPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    pub timeout: Duration,
    pub high_accuracy: bool,
}

impl PositionRequest {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            high_accuracy: true,
        }
    }
}

pub trait GeoLocationGateway {
    /// One-shot lookup of the current position.
    ///
    /// Returns `None` if the position is unavailable, denied
    /// or could not be determined within the timeout.
    fn current_position(&self, request: &PositionRequest) -> Option<MapPoint>;
}
