pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{approval_builder::*, report_builder::*};

pub mod report_builder {

    use super::*;
    use crate::{geo::*, id::*, incident::*, report::*, time::*};

    #[derive(Debug)]
    pub struct ReportBuild {
        report: Report,
    }

    impl ReportBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.report.id = id.into();
            self
        }
        pub fn incident_type(mut self, incident_type: IncidentType) -> Self {
            self.report.incident_type = incident_type;
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.report.lat = pos.lat();
            self.report.lng = pos.lng();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.report.description = desc.into();
            self
        }
        pub fn created_at(mut self, created_at: i64) -> Self {
            self.report.created_at = TimestampMs::from_inner(created_at);
            self
        }
        pub fn image_url(mut self, image_url: Option<&str>) -> Self {
            self.report.image_url = image_url.map(Into::into);
            self
        }
        pub fn finish(self) -> Report {
            self.report
        }
    }

    impl Builder for Report {
        type Build = ReportBuild;
        fn build() -> ReportBuild {
            let created_at = TimestampMs::now();
            ReportBuild {
                report: Report {
                    id: Id::from_timestamp(created_at),
                    incident_type: IncidentType::Other,
                    lat: MapPoint::FALLBACK.lat(),
                    lng: MapPoint::FALLBACK.lng(),
                    description: "".into(),
                    created_at,
                    image_url: None,
                },
            }
        }
    }
}

pub mod approval_builder {

    use super::*;
    use crate::{approval::*, report::*};

    #[derive(Debug)]
    pub struct ApprovalBuild {
        approval: Approval,
    }

    impl ApprovalBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.approval.report.id = id.into();
            self
        }
        pub fn report(mut self, report: Report) -> Self {
            self.approval.report = report;
            self
        }
        pub fn recipient_email(mut self, recipient_email: &str) -> Self {
            self.approval.recipient_email = recipient_email.into();
            self
        }
        pub fn subject(mut self, subject: &str) -> Self {
            self.approval.subject = subject.into();
            self
        }
        pub fn email_body(mut self, email_body: &str) -> Self {
            self.approval.email_body = email_body.into();
            self
        }
        pub fn finish(self) -> Approval {
            self.approval
        }
    }

    impl Builder for Approval {
        type Build = ApprovalBuild;
        fn build() -> ApprovalBuild {
            ApprovalBuild {
                approval: Approval {
                    report: Report::build().finish(),
                    recipient_email: "".into(),
                    subject: "".into(),
                    email_body: "".into(),
                },
            }
        }
    }

    #[test]
    fn build_approval_with_id() {
        let approval = Approval::build()
            .id("7-pending")
            .recipient_email("ngo@example.org")
            .finish();
        assert_eq!(approval.id.as_str(), "7-pending");
        assert_eq!(approval.recipient_email, "ngo@example.org");
    }
}
