use std::time::Duration;

use cmw_core::repositories::Key;

use super::{load::load_approvals, wakeup::Wakeups, *};

/// Keep the list of pending approvals up to date.
///
/// The list is reloaded periodically and whenever it has been
/// changed. `on_change` receives the initial list and every
/// list that differs from the previous one. Runs until an
/// error occurs.
pub async fn watch_pending_approvals<F>(
    connections: &sqlite::Connections,
    poll_interval: Duration,
    mut on_change: F,
) -> Result<()>
where
    F: FnMut(&[Approval]),
{
    let mut wakeups = Wakeups::new(connections, poll_interval, &[Key::Pending]);
    let mut last_pending = None;
    loop {
        let pending = load_approvals(connections, ApprovalStatus::Pending)?;
        if last_pending.as_ref() != Some(&pending) {
            debug!("{} pending approval(s)", pending.len());
            on_change(&pending);
            last_pending = Some(pending);
        }
        wakeups.next().await;
    }
}
