use crate::entities::*;

mod approval_status;
mod error;
mod leaderboard;
mod load_approvals;
mod load_reports;
mod locate;
mod map_markers;
mod prepare_email;
mod profile;
mod review_approvals;
mod submit_for_approval;
mod submit_report;


pub use self::{
    approval_status::*, error::Error, leaderboard::*, load_approvals::*, load_reports::*,
    locate::*, map_markers::*, prepare_email::*, profile::*, review_approvals::*,
    submit_for_approval::*, submit_report::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}

/// Incident data as entered by the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub incident_type: IncidentType,
    /// `None` if the current position is unknown
    pub pos: Option<MapPoint>,
    pub description: Option<String>,
    /// Embedded image data, i.e. a `data:` URL
    pub image_url: Option<String>,
}

impl ReportDraft {
    pub const fn new(incident_type: IncidentType) -> Self {
        Self {
            incident_type,
            pos: None,
            description: None,
            image_url: None,
        }
    }

    fn into_report(self, id: Id, created_at: TimestampMs) -> Report {
        let Self {
            incident_type,
            pos,
            description,
            image_url,
        } = self;
        let pos = pos.unwrap_or_else(|| {
            log::info!("No position available: using fallback {}", MapPoint::FALLBACK);
            MapPoint::FALLBACK
        });
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| Report::default_description(incident_type));
        let image_url = image_url.filter(|url| !url.is_empty());
        Report {
            id,
            incident_type,
            lat: pos.lat(),
            lng: pos.lng(),
            description,
            created_at,
            image_url,
        }
    }
}

// Creation times must strictly increase, even if multiple
// records are created within the same millisecond. The
// identifiers that are derived from them stay unique.
fn next_creation_time(
    now: TimestampMs,
    latest: impl IntoIterator<Item = TimestampMs>,
) -> TimestampMs {
    match latest.into_iter().max() {
        Some(latest) if latest >= now => latest + 1,
        _ => now,
    }
}

#[cfg(test)]
mod draft_tests {
    use super::*;

    #[test]
    fn apply_fallbacks() {
        let report = ReportDraft {
            description: Some("  ".into()),
            image_url: Some("".into()),
            ..ReportDraft::new(IncidentType::OilSpill)
        }
        .into_report("1".into(), TimestampMs::from_inner(1));
        assert_eq!(report.pos(), MapPoint::FALLBACK);
        assert_eq!(report.description, "Oil Spill reported");
        assert_eq!(report.image_url, None);
    }

    #[test]
    fn keep_given_values() {
        let pos = MapPoint::from_lat_lng_deg(-6.2, 106.8451);
        let report = ReportDraft {
            pos: Some(pos),
            description: Some("Plastic dumping along canal".into()),
            image_url: Some("data:image/jpeg;base64,AA==".into()),
            ..ReportDraft::new(IncidentType::Dumping)
        }
        .into_report("1".into(), TimestampMs::from_inner(1));
        assert_eq!(report.pos(), pos);
        assert_eq!(report.description, "Plastic dumping along canal");
        assert!(report.image_url.is_some());
    }

    #[test]
    fn strictly_increasing_creation_times() {
        let now = TimestampMs::from_inner(100);
        assert_eq!(next_creation_time(now, None), now);
        assert_eq!(
            next_creation_time(now, [TimestampMs::from_inner(99)]),
            now
        );
        assert_eq!(
            next_creation_time(now, [TimestampMs::from_inner(100)]),
            TimestampMs::from_inner(101)
        );
        assert_eq!(
            next_creation_time(
                now,
                [TimestampMs::from_inner(50), TimestampMs::from_inner(120)]
            ),
            TimestampMs::from_inner(121)
        );
    }
}
