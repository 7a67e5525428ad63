use std::time::Duration;

use super::{wakeup::periodic, *};

pub const DEFAULT_CHANGE_CHECK_INTERVAL: Duration = Duration::from_millis(250);

/// Publish commits of other processes that share the database
/// to the subscribers of these connections.
///
/// Runs until the task is aborted.
pub async fn watch_store_changes(connections: sqlite::Connections, check_interval: Duration) {
    let mut seen = connections.load_revisions().unwrap_or_else(|err| {
        warn!("Failed to load revisions: {err}");
        Default::default()
    });
    let mut interval = periodic(check_interval);
    loop {
        interval.tick().await;
        if let Err(err) = connections.publish_external_changes(&mut seen) {
            warn!("Failed to check for changes: {err}");
        }
    }
}
