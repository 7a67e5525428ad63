//! Change notifications of committed writes.
//!
//! Observers like the administrator's list of pending approvals or
//! the status watch of a reporter subscribe to the notifier and
//! reload their state after receiving an event.

use tokio::sync::broadcast;

use crate::repositories::Key;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// The keys that have been written by a single commit
    pub keys: Vec<Key>,
}

impl StoreEvent {
    pub fn new(mut keys: Vec<Key>) -> Self {
        keys.sort_unstable();
        keys.dedup();
        Self { keys }
    }

    pub fn affects(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn affects_any(&self, keys: &[Key]) -> bool {
        keys.iter().any(|key| self.affects(*key))
    }
}

pub type ChangeSubscription = broadcast::Receiver<StoreEvent>;

#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<StoreEvent>,
}

impl ChangeNotifier {
    /// Slow subscribers will miss events if more than
    /// `capacity` events are buffered.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> ChangeSubscription {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: StoreEvent) {
        if event.keys.is_empty() {
            return;
        }
        log::debug!("Publishing change of {:?}", event.keys);
        if self.tx.send(event).is_err() {
            log::trace!("No subscribers for change event");
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
