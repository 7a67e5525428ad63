use cmw_core::gateways::compose::ComposeGateway;
use cmw_entities::email::ComposeRequest;

mod open_mail_client;
mod send_to_json_file;

pub use self::{open_mail_client::*, send_to_json_file::*};

/// Only logs the compose request.
///
/// Used if no mail client has been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnly;

impl ComposeGateway for LogOnly {
    fn compose(&self, request: &ComposeRequest) {
        if !request.has_recipient() {
            log::info!("Prepared email without recipient: {}", request.content.subject);
        }
        log::info!("Compose email: {}", request.mailto_url());
    }
}
