use crate::{
    entities::MapPoint,
    gateways::geolocation::{GeoLocationGateway, PositionRequest},
};

/// Determine the current position or fall back to the default location.
pub fn locate_or_fallback<G>(gateway: &G, request: &PositionRequest) -> MapPoint
where
    G: GeoLocationGateway + ?Sized,
{
    match gateway.current_position(request) {
        Some(pos) if pos.is_valid() => pos,
        Some(pos) => {
            log::warn!("Ignoring invalid position ({pos})");
            MapPoint::FALLBACK
        }
        None => {
            log::info!("Position unavailable: using fallback {}", MapPoint::FALLBACK);
            MapPoint::FALLBACK
        }
    }
}
