use cmw_core::{entities::TimestampMs, gateways::compose::ComposeGateway};
use cmw_entities::email::ComposeRequest;
use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{io, path::Path};

/// Collects compose requests as JSON files in an outbox
/// directory, e.g. for local testing.
pub struct ComposeToJsonFile {
    json_store: Store,
}

impl ComposeToJsonFile {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JsonEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub mailto: String,
}

impl From<&ComposeRequest> for JsonEmail {
    fn from(from: &ComposeRequest) -> Self {
        Self {
            to: from.recipient.clone(),
            subject: from.content.subject.clone(),
            body: from.content.body.clone(),
            mailto: from.mailto_url(),
        }
    }
}

// The id becomes the file name, so only characters that are
// safe in any file name and contain no extension remain.
fn file_id(now: TimestampMs, request: &ComposeRequest) -> String {
    let to = if request.has_recipient() {
        request.recipient.trim()
    } else {
        "unknown"
    };
    let to: String = to
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-{to}", now.into_inner())
}

impl ComposeGateway for ComposeToJsonFile {
    fn compose(&self, request: &ComposeRequest) {
        let key = file_id(TimestampMs::now(), request);
        let email = JsonEmail::from(request);
        match self.json_store.save_with_id(&email, &key) {
            Ok(_) => log::debug!("Saved email {key} in {}", self.path().display()),
            Err(err) => log::warn!("Unable to save email in JSON file: {err}"),
        }
    }
}
