pub mod prelude {

    use std::{cell::RefCell, path::Path};

    pub use cmw_core::{
        entities::*,
        repositories::*,
        usecases,
    };
    pub use cmw_entities::builders::*;

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::prelude as flows;

    pub fn new_report(incident_type: IncidentType) -> usecases::NewReport {
        usecases::NewReport {
            draft: usecases::ReportDraft::new(incident_type),
            role: Role::Community,
            points: usecases::DEFAULT_POINTS_PER_REPORT,
        }
    }

    pub fn new_approval(incident_type: IncidentType, recipient_email: &str) -> usecases::NewApproval {
        let draft = usecases::ReportDraft {
            pos: Some(MapPoint::from_lat_lng_deg(-6.2, 106.8451)),
            ..usecases::ReportDraft::new(incident_type)
        };
        let email = usecases::prepare_email(&draft);
        usecases::NewApproval {
            draft,
            recipient_email: recipient_email.into(),
            email,
        }
    }

    /// Records all compose requests instead of
    /// opening a mail client.
    #[derive(Default)]
    pub struct RecordingComposeGW {
        requests: RefCell<Vec<ComposeRequest>>,
    }

    impl RecordingComposeGW {
        pub fn requests(&self) -> Vec<ComposeRequest> {
            self.requests.borrow().clone()
        }
    }

    impl cmw_core::gateways::compose::ComposeGateway for RecordingComposeGW {
        fn compose(&self, request: &ComposeRequest) {
            self.requests.borrow_mut().push(request.clone());
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub compose_gw: RecordingComposeGW,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self::with_database(":memory:")
        }

        /// Multiple fixtures on the same file behave like
        /// separate processes.
        pub fn with_database_file(file: &Path) -> Self {
            Self::with_database(file.to_str().unwrap())
        }

        fn with_database(url: &str) -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(url, 1).unwrap();
            cmw_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self {
                db_connections,
                compose_gw: Default::default(),
            }
        }

        pub fn submit_for_approval(
            &self,
            incident_type: IncidentType,
            recipient_email: &str,
        ) -> Approval {
            flows::submit_for_approval(
                &self.db_connections,
                new_approval(incident_type, recipient_email),
            )
            .unwrap()
        }

        pub fn reports(&self) -> Vec<Report> {
            self.db_connections
                .shared()
                .unwrap()
                .load_reports()
                .unwrap()
        }

        pub fn points(&self) -> u64 {
            self.db_connections
                .shared()
                .unwrap()
                .load_points()
                .unwrap()
        }

        pub fn approval_ids(&self, status: ApprovalStatus) -> Vec<String> {
            self.db_connections
                .shared()
                .unwrap()
                .load_approvals(status)
                .unwrap()
                .into_iter()
                .map(|a| a.report.id.into())
                .collect()
        }
    }
}
