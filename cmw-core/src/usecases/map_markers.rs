use std::str::FromStr;

use askama::Template;

use super::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncidentFilter {
    #[default]
    All,
    Only(IncidentType),
}

impl IncidentFilter {
    pub fn matches(self, incident_type: IncidentType) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => t == incident_type,
        }
    }
}

impl FromStr for IncidentFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.trim().parse().map(Self::Only)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: Id,
    pub pos: MapPoint,
    pub style: MarkerStyle,
    /// HTML
    pub popup: String,
}

pub fn filter_incidents<'a>(
    reports: impl IntoIterator<Item = &'a Report>,
    filter: IncidentFilter,
) -> Vec<&'a Report> {
    reports
        .into_iter()
        .filter(|r| filter.matches(r.incident_type))
        .collect()
}

#[derive(Template)]
#[template(
    source = "<strong>{{ incident_type }}</strong><br/>{{ description }}\
              {%- if let Some(image_url) = image_url -%}\
              <br/><img src='{{ image_url }}' style='width:160px;height:auto;border-radius:8px;margin-top:4px'/>\
              {%- endif %}",
    ext = "html"
)]
struct PopupTemplate<'a> {
    incident_type: IncidentType,
    description: &'a str,
    image_url: Option<&'a str>,
}

/// HTML content of a marker popup with all texts escaped.
pub fn popup_content(report: &Report) -> String {
    PopupTemplate {
        incident_type: report.incident_type,
        description: &report.description,
        image_url: report.image_url.as_deref(),
    }
    .render()
    .unwrap_or_else(|err| {
        log::warn!("Failed to render popup of {}: {err}", report.id);
        report.description.clone()
    })
}

pub fn map_markers<'a>(
    reports: impl IntoIterator<Item = &'a Report>,
    filter: IncidentFilter,
) -> Vec<MapMarker> {
    filter_incidents(reports, filter)
        .into_iter()
        .map(|r| MapMarker {
            id: r.id.clone(),
            pos: r.pos(),
            style: r.incident_type.marker_style(),
            popup: popup_content(r),
        })
        .collect()
}

/// South-west and north-east corner that enclose all markers.
pub fn markers_bbox(markers: &[MapMarker]) -> Option<(MapPoint, MapPoint)> {
    let first = markers.first()?.pos;
    let (sw, ne) = markers.iter().skip(1).fold((first, first), |(sw, ne), m| {
        (
            MapPoint::from_lat_lng_deg(sw.lat().min(m.pos.lat()), sw.lng().min(m.pos.lng())),
            MapPoint::from_lat_lng_deg(ne.lat().max(m.pos.lat()), ne.lng().max(m.pos.lng())),
        )
    });
    Some((sw, ne))
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn reports() -> Vec<Report> {
        vec![
            Report::build()
                .id("3")
                .incident_type(IncidentType::Dumping)
                .pos(MapPoint::from_lat_lng_deg(-6.2, 106.8451))
                .description("Plastic <dumping> along canal")
                .finish(),
            Report::build()
                .id("2")
                .incident_type(IncidentType::Cutting)
                .pos(MapPoint::from_lat_lng_deg(-6.1754, 106.8272))
                .description("Tree cutting near city center")
                .image_url(Some("data:image/png;base64,AA=="))
                .finish(),
            Report::build()
                .id("1")
                .incident_type(IncidentType::Dumping)
                .pos(MapPoint::from_lat_lng_deg(-6.12, 106.9))
                .finish(),
        ]
    }

    #[test]
    fn parse_filter() {
        assert_eq!("All".parse::<IncidentFilter>().unwrap(), IncidentFilter::All);
        assert_eq!(
            "sand mining".parse::<IncidentFilter>().unwrap(),
            IncidentFilter::Only(IncidentType::SandMining)
        );
        assert!("nothing".parse::<IncidentFilter>().is_err());
    }

    #[test]
    fn filter_by_type() {
        let reports = reports();
        assert_eq!(filter_incidents(&reports, IncidentFilter::All).len(), 3);
        let dumping: Vec<_> =
            filter_incidents(&reports, IncidentFilter::Only(IncidentType::Dumping))
                .into_iter()
                .map(|r| r.id.as_str())
                .collect();
        assert_eq!(dumping, vec!["3", "1"]);
        assert!(filter_incidents(&reports, IncidentFilter::Only(IncidentType::OilSpill)).is_empty());
    }

    #[test]
    fn markers_with_style_and_popup() {
        let markers = map_markers(&reports(), IncidentFilter::Only(IncidentType::Cutting));
        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_eq!(marker.style.abbr, "C");
        assert_eq!(marker.style.color, "#059669");
        assert!(marker
            .popup
            .starts_with("<strong>Cutting</strong><br/>Tree cutting near city center<br/><img src='"));
        assert!(marker.popup.contains("base64,AA=="));
        assert!(marker.popup.ends_with("margin-top:4px'/>"));
    }

    #[test]
    fn escape_popup_text() {
        let markers = map_markers(&reports(), IncidentFilter::All);
        assert_eq!(
            markers[0].popup,
            "<strong>Dumping</strong><br/>Plastic &lt;dumping&gt; along canal"
        );
        let report = Report::build()
            .incident_type(IncidentType::Other)
            .description("Saplings & 'roots' uprooted")
            .finish();
        let popup = popup_content(&report);
        assert!(popup.starts_with("<strong>Other</strong><br/>Saplings &amp; "));
        assert!(!popup.contains("'roots'"));
    }

    #[test]
    fn enclose_all_markers() {
        assert_eq!(markers_bbox(&[]), None);
        let (sw, ne) = markers_bbox(&map_markers(&reports(), IncidentFilter::All)).unwrap();
        assert_eq!(sw, MapPoint::from_lat_lng_deg(-6.2, 106.8272));
        assert_eq!(ne, MapPoint::from_lat_lng_deg(-6.12, 106.9));
    }
}
