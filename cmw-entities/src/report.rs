use serde::{Deserialize, Serialize};

use crate::{geo::MapPoint, id::Id, incident::IncidentType, time::TimestampMs};

/// A submitted incident.
///
/// Reports are immutable after they have been created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Id,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub created_at: TimestampMs,
    /// Embedded image data, i.e. a `data:` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Report {
    pub const fn pos(&self) -> MapPoint {
        MapPoint::from_lat_lng_deg(self.lat, self.lng)
    }

    /// Description used when the reporter did not provide one.
    pub fn default_description(incident_type: IncidentType) -> String {
        format!("{incident_type} reported")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_camel_case_without_image() {
        let report = Report {
            id: "1700000000000".into(),
            incident_type: IncidentType::OilSpill,
            lat: -6.19,
            lng: 106.83,
            description: "Oil slick near harbor entrance".into(),
            created_at: TimestampMs::from_inner(1_700_000_000_000),
            image_url: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "Oil Spill");
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert!(json.get("imageUrl").is_none());
        let parsed: Report = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn deserialize_stored_record() {
        let json = r#"{"id":"42","type":"Cutting","lat":-6.1754,"lng":106.8272,
            "description":"Cutting reported","createdAt":42,"imageUrl":"data:image/png;base64,AA=="}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.incident_type, IncidentType::Cutting);
        assert_eq!(report.pos(), MapPoint::FALLBACK);
        assert_eq!(
            report.image_url.as_deref(),
            Some("data:image/png;base64,AA==")
        );
    }

    #[test]
    fn default_description() {
        assert_eq!(
            Report::default_description(IncidentType::SandMining),
            "Sand Mining reported"
        );
    }
}
