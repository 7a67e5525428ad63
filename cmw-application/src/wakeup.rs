use std::time::Duration;

use cmw_core::{notify::ChangeSubscription, repositories::Key};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};

use super::sqlite;

/// Ticks periodically, starting after the first period.
pub(crate) fn periodic(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Wakes up periodically and whenever one of the
/// observed keys has been changed.
pub(crate) struct Wakeups {
    interval: Interval,
    changes: Option<ChangeSubscription>,
    keys: &'static [Key],
}

impl Wakeups {
    /// Subscribes immediately to not miss any changes.
    pub fn new(connections: &sqlite::Connections, period: Duration, keys: &'static [Key]) -> Self {
        Self {
            interval: periodic(period),
            changes: Some(connections.subscribe()),
            keys,
        }
    }

    pub async fn next(&mut self) {
        let Some(changes) = &mut self.changes else {
            self.interval.tick().await;
            return;
        };
        let closed = loop {
            tokio::select! {
                _ = self.interval.tick() => break false,
                event = changes.recv() => match event {
                    Ok(event) => {
                        if event.affects_any(self.keys) {
                            break false;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Missed {skipped} change event(s)");
                        break false;
                    }
                    Err(RecvError::Closed) => break true,
                }
            }
        };
        if closed {
            debug!("No more change events, continue polling");
            self.changes = None;
        }
    }
}
