//! Typed access to the key-value store.
//!
//! Missing values are read as their defaults. Values that cannot
//! be decoded are logged and treated like missing values.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    entities::*,
    notify::{ChangeNotifier, StoreEvent},
    repositories::{Error, *},
};

type Result<T> = std::result::Result<T, Error>;

/// Maximum number of reports that are kept.
pub const MAX_REPORTS: usize = 50;

/// Maximum number of approvals that are kept per status.
pub const MAX_APPROVALS_PER_STATUS: usize = 200;

/// Insert as the newest item and evict the oldest items
/// that exceed the given capacity.
pub fn prepend_capped<T>(items: &mut Vec<T>, item: T, capacity: usize) {
    items.insert(0, item);
    items.truncate(capacity);
}

fn load_list<S, T>(store: &S, key: Key) -> Result<Vec<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(json) = store.load_value(key)? else {
        return Ok(vec![]);
    };
    Ok(serde_json::from_str(&json).unwrap_or_else(|err| {
        log::warn!("Discarding malformed value of '{key}': {err}");
        vec![]
    }))
}

fn store_list<S, T>(store: &S, key: Key, items: &[T]) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(items).map_err(anyhow::Error::from)?;
    store.store_value(key, json)
}

impl<S> PointsRepo for S
where
    S: KeyValueStore,
{
    fn load_points(&self) -> Result<u64> {
        let Some(value) = self.load_value(Key::Points)? else {
            return Ok(0);
        };
        Ok(value.trim().parse().unwrap_or_else(|err| {
            log::warn!("Discarding malformed value of '{}': {err}", Key::Points);
            0
        }))
    }

    fn store_points(&self, points: u64) -> Result<()> {
        self.store_value(Key::Points, points.to_string())
    }
}

impl<S> RoleRepo for S
where
    S: KeyValueStore,
{
    fn load_role(&self) -> Result<Option<Role>> {
        let Some(value) = self.load_value(Key::Role)? else {
            return Ok(None);
        };
        Ok(value
            .parse()
            .map_err(|err| {
                log::warn!("Discarding malformed value of '{}': {err}", Key::Role);
            })
            .ok())
    }

    fn store_role(&self, role: Role) -> Result<()> {
        self.store_value(Key::Role, role.to_string())
    }
}

impl<S> ReportRepo for S
where
    S: KeyValueStore,
{
    fn load_reports(&self) -> Result<Vec<Report>> {
        load_list(self, Key::Reports)
    }

    fn store_reports(&self, reports: &[Report]) -> Result<()> {
        store_list(self, Key::Reports, reports)
    }
}

impl<S> ApprovalRepo for S
where
    S: KeyValueStore,
{
    fn load_approvals(&self, status: ApprovalStatus) -> Result<Vec<Approval>> {
        load_list(self, Key::approvals(status))
    }

    fn store_approvals(&self, status: ApprovalStatus, approvals: &[Approval]) -> Result<()> {
        store_list(self, Key::approvals(status), approvals)
    }
}

/// Volatile key-value store, e.g. for testing.
///
/// Every write is committed immediately and published
/// if a notifier has been attached.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<Key, String>>,
    notifier: Option<ChangeNotifier>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notifier(notifier: ChangeNotifier) -> Self {
        Self {
            values: Default::default(),
            notifier: Some(notifier),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn load_value(&self, key: Key) -> Result<Option<String>> {
        Ok(self.values.read().get(&key).cloned())
    }

    fn store_value(&self, key: Key, value: String) -> Result<()> {
        self.values.write().insert(key, value);
        if let Some(notifier) = &self.notifier {
            notifier.publish(StoreEvent::new(vec![key]));
        }
        Ok(())
    }
}
