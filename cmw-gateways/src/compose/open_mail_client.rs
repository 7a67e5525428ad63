use cmw_core::gateways::compose::ComposeGateway;
use cmw_entities::email::ComposeRequest;
#[cfg(not(test))]
use std::process::{Command, Stdio};
use std::io::Result;

/// Opens the `mailto:` URL with the default mail client.
#[derive(Debug, Clone)]
pub struct OpenMailClient {
    opener: String,
}

impl OpenMailClient {
    #[cfg(target_os = "macos")]
    pub const DEFAULT_OPENER: &'static str = "open";
    #[cfg(not(target_os = "macos"))]
    pub const DEFAULT_OPENER: &'static str = "xdg-open";

    pub fn new(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
        }
    }

    pub fn opener(&self) -> &str {
        &self.opener
    }

    fn open(&self, url: &str) {
        if let Err(err) = open_raw(&self.opener, url) {
            log::warn!("Could not open mail client with '{}': {err}", self.opener);
        }
    }
}

impl Default for OpenMailClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OPENER)
    }
}

// The child process is not awaited and outlives this process.
#[cfg(not(test))]
fn open_raw(opener: &str, url: &str) -> Result<()> {
    let child = Command::new(opener)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .spawn()?;
    log::debug!("Started '{opener}' (pid {})", child.id());
    Ok(())
}

/// Don't actually launch a mail client while running the tests.
#[cfg(test)]
fn open_raw(opener: &str, url: &str) -> Result<()> {
    log::debug!("Would run: {opener} {url}");
    Ok(())
}

impl ComposeGateway for OpenMailClient {
    fn compose(&self, request: &ComposeRequest) {
        if !request.has_recipient() {
            log::info!("Composing email without recipient");
        }
        let url = request.mailto_url();
        log::debug!("Opening {url}");
        self.open(&url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmw_entities::email::EmailContent;

    #[test]
    fn compose_without_launching() {
        let gw = OpenMailClient::default();
        assert_eq!(gw.opener(), OpenMailClient::DEFAULT_OPENER);
        gw.compose(&ComposeRequest {
            recipient: "ngo@example.org".into(),
            content: EmailContent {
                subject: "MangroveWatch Incident: Cutting".into(),
                body: "Type: Cutting".into(),
            },
        });
    }
}
