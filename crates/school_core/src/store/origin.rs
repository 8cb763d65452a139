//! Multi-tab fan-out over one shared backend.
//!
//! # Responsibility
//! - Let several tabs of the same origin share one `KeyValueStore`.
//! - Deliver a `StorageChange` to every other open tab after a write.
//!
//! # Invariants
//! - The writing tab never receives its own change.
//! - Writing a value equal to the stored one is not announced.
//! - Writes are serialized through the origin; the last writer wins.

use super::{KeyValueStore, StorageChange, StoreError, StoreResult};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Identifier of one open tab.
pub type TabId = Uuid;

struct Subscriber {
    tab_id: TabId,
    sender: Sender<StorageChange>,
}

struct Shared {
    backend: Box<dyn KeyValueStore + Send + Sync>,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// Shared storage namespace; cheap to clone.
#[derive(Clone)]
pub struct Origin {
    shared: Arc<Shared>,
}

impl Origin {
    pub fn new(backend: impl KeyValueStore + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend: Box::new(backend),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Opens a new tab handle subscribed to writes made by other tabs.
    ///
    /// Fails with `Poisoned` when the subscriber list is unusable; a tab
    /// that could not subscribe is never handed out.
    pub fn open_tab(&self) -> StoreResult<TabStore> {
        let (sender, receiver) = mpsc::channel();
        let tab_id = Uuid::new_v4();
        let mut subscribers = self.shared.subscribers.lock().map_err(|_| {
            warn!("event=tab_open module=store status=error error_code=subscribers_poisoned");
            StoreError::Poisoned
        })?;
        subscribers.push(Subscriber { tab_id, sender });
        debug!(
            "event=tab_open module=store status=ok tab_id={} open_tabs={}",
            tab_id,
            subscribers.len()
        );
        Ok(TabStore {
            tab_id,
            shared: Arc::clone(&self.shared),
            changes: receiver,
        })
    }

    /// Number of tabs currently subscribed.
    pub fn open_tab_count(&self) -> usize {
        self.shared
            .subscribers
            .lock()
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }
}

/// Store handle of one tab.
pub struct TabStore {
    tab_id: TabId,
    shared: Arc<Shared>,
    changes: Receiver<StorageChange>,
}

impl TabStore {
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Returns the next pending change written by another tab.
    pub fn poll_change(&self) -> Option<StorageChange> {
        self.changes.try_recv().ok()
    }

    /// Returns all pending changes in delivery order.
    pub fn drain_changes(&self) -> Vec<StorageChange> {
        self.changes.try_iter().collect()
    }
}

impl KeyValueStore for TabStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.shared.backend.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut subscribers = self
            .shared
            .subscribers
            .lock()
            .map_err(|_| StoreError::Poisoned)?;

        let previous = self.shared.backend.get_item(key)?;
        self.shared.backend.set_item(key, value)?;
        if previous.as_deref() == Some(value) {
            return Ok(());
        }

        let change = StorageChange {
            key: key.to_string(),
            new_value: Some(value.to_string()),
        };
        // Closed receivers belong to tabs that are gone.
        subscribers.retain(|subscriber| {
            subscriber.tab_id == self.tab_id || subscriber.sender.send(change.clone()).is_ok()
        });
        debug!(
            "event=storage_change module=store status=ok key={} source_tab={} listeners={}",
            key,
            self.tab_id,
            subscribers.len().saturating_sub(1)
        );
        Ok(())
    }
}

impl Drop for TabStore {
    fn drop(&mut self) {
        if let Ok(mut subscribers) = self.shared.subscribers.lock() {
            subscribers.retain(|subscriber| subscriber.tab_id != self.tab_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Origin;
    use crate::store::{KeyValueStore, MemoryStore, StorageChange, StoreError};
    use std::sync::Arc;

    #[test]
    fn write_is_announced_to_other_tabs_only() {
        let origin = Origin::new(MemoryStore::new());
        let writer = origin.open_tab().unwrap();
        let reader = origin.open_tab().unwrap();

        writer.set_item("events", "[]").unwrap();

        assert!(writer.poll_change().is_none());
        assert_eq!(
            reader.drain_changes(),
            vec![StorageChange {
                key: "events".to_string(),
                new_value: Some("[]".to_string()),
            }]
        );
        assert_eq!(reader.get_item("events").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn unchanged_value_is_not_announced() {
        let origin = Origin::new(MemoryStore::new());
        let writer = origin.open_tab().unwrap();
        let reader = origin.open_tab().unwrap();

        writer.set_item("schoolManagementUnreadCsrCount", "0").unwrap();
        writer.set_item("schoolManagementUnreadCsrCount", "0").unwrap();

        assert_eq!(reader.drain_changes().len(), 1);
    }

    #[test]
    fn dropped_tab_is_unsubscribed() {
        let origin = Origin::new(MemoryStore::new());
        let writer = origin.open_tab().unwrap();
        let closed = origin.open_tab().unwrap();
        assert_eq!(origin.open_tab_count(), 2);

        drop(closed);
        assert_eq!(origin.open_tab_count(), 1);
        writer.set_item("students", "[]").unwrap();
        assert_eq!(origin.open_tab_count(), 1);
    }

    #[test]
    fn poisoned_subscriber_list_refuses_new_tabs() {
        let origin = Origin::new(MemoryStore::new());
        let shared = Arc::clone(&origin.shared);
        let _ = std::thread::spawn(move || {
            let _guard = shared.subscribers.lock().unwrap();
            panic!("writer crashed while holding the subscriber list");
        })
        .join();

        assert!(matches!(origin.open_tab(), Err(StoreError::Poisoned)));
    }
}
