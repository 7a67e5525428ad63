use std::time::Duration;

use cmw_core::repositories::Key;

use super::{approval_status::approval_status, wakeup::Wakeups, *};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

const APPROVAL_KEYS: [Key; 3] = [Key::Pending, Key::Approved, Key::Rejected];

/// Follow the status of an approval until it has been
/// approved or rejected.
///
/// The status is re-evaluated periodically and whenever one
/// of the approval lists has been changed. Every change,
/// including the initial status, is reported to `on_change`.
/// Unknown ids are reported as `None` and end the watch.
pub async fn watch_approval_status<F>(
    connections: &sqlite::Connections,
    id: &str,
    poll_interval: Duration,
    mut on_change: F,
) -> Result<Option<ApprovalStatus>>
where
    F: FnMut(Option<ApprovalStatus>),
{
    let mut wakeups = Wakeups::new(connections, poll_interval, &APPROVAL_KEYS);
    let mut last_status = None;
    loop {
        let status = approval_status(connections, id)?;
        if last_status != Some(status) {
            debug!("Status of {id}: {status:?}");
            on_change(status);
            last_status = Some(status);
        }
        match status {
            Some(status) if !status.is_terminal() => (),
            _ => return Ok(status),
        }
        wakeups.next().await;
    }
}
