use cmw_core::gateways::geolocation::{GeoLocationGateway, PositionRequest};
use cmw_entities::geo::MapPoint;
use serde::Deserialize;
use thiserror::Error;

/// Looks up the position from a JSON endpoint.
///
/// The endpoint is expected to respond with an object that
/// contains the fields `latitude` and `longitude` in degrees.
#[derive(Debug, Clone)]
pub struct HttpGeoLocation {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct JsonPosition {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Invalid position ({0})")]
    InvalidPosition(MapPoint),
}

fn parse_position(json: JsonPosition) -> Result<MapPoint, LookupError> {
    let pos = MapPoint::from_lat_lng_deg(json.latitude, json.longitude);
    if pos.is_valid() {
        Ok(pos)
    } else {
        Err(LookupError::InvalidPosition(pos))
    }
}

fn lookup(url: &str, request: &PositionRequest) -> Result<MapPoint, LookupError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(request.timeout)
        .build()?;
    let json = client
        .get(url)
        .send()?
        .error_for_status()?
        .json::<JsonPosition>()?;
    parse_position(json)
}

impl GeoLocationGateway for HttpGeoLocation {
    fn current_position(&self, request: &PositionRequest) -> Option<MapPoint> {
        if request.high_accuracy {
            log::debug!("High accuracy is not supported by {}", self.url);
        }
        lookup(&self.url, request)
            .map_err(|err| {
                log::warn!("Failed to look up position from {}: {err}", self.url);
            })
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
        time::{Duration, Instant},
    };

    #[test]
    fn parse_valid_position() {
        let json: JsonPosition =
            serde_json::from_str(r#"{"latitude":-6.2,"longitude":106.8451,"city":"Jakarta"}"#)
                .unwrap();
        assert_eq!(
            parse_position(json).unwrap(),
            MapPoint::from_lat_lng_deg(-6.2, 106.8451)
        );
    }

    #[test]
    fn reject_invalid_position() {
        let json = JsonPosition {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(matches!(
            parse_position(json),
            Err(LookupError::InvalidPosition(_))
        ));
    }

    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/json")
    }

    fn request(timeout: Duration) -> PositionRequest {
        PositionRequest {
            timeout,
            high_accuracy: false,
        }
    }

    #[test]
    fn current_position() {
        let gw = HttpGeoLocation {
            url: serve_once("200 OK", r#"{"latitude":-6.2,"longitude":106.8451}"#),
        };
        assert_eq!(
            gw.current_position(&request(Duration::from_secs(5))),
            Some(MapPoint::from_lat_lng_deg(-6.2, 106.8451))
        );
    }

    #[test]
    fn no_position_on_error_responses() {
        let gw = HttpGeoLocation {
            url: serve_once("503 Service Unavailable", "{}"),
        };
        assert_eq!(gw.current_position(&request(Duration::from_secs(5))), None);

        let gw = HttpGeoLocation {
            url: serve_once("200 OK", r#"{"latitude":123.0,"longitude":0.0}"#),
        };
        assert_eq!(gw.current_position(&request(Duration::from_secs(5))), None);
    }

    #[test]
    fn give_up_after_timeout() {
        // Connections are accepted by the OS but never answered
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let gw = HttpGeoLocation {
            url: format!("http://{}/json", listener.local_addr().unwrap()),
        };
        let started = Instant::now();
        assert_eq!(gw.current_position(&request(Duration::from_millis(200))), None);
        assert!(started.elapsed() < Duration::from_secs(3));
        drop(listener);
    }
}
