//! Key-value store access.
//!
//! # Responsibility
//! - Define the opaque string-keyed persistence contract (`KeyValueStore`).
//! - Provide JSON read/write helpers with fallback-to-default reads.
//! - Name the persisted keys shared by every tab of one origin.
//!
//! # Invariants
//! - Reads never propagate failures: missing keys, unreadable backends and
//!   malformed JSON all degrade to the caller-supplied default and are logged.
//! - Writes overwrite the whole value for a key; there is no partial write.

mod memory;
mod origin;
mod sqlite;

pub use memory::MemoryStore;
pub use origin::{Origin, TabId, TabStore};
pub use sqlite::SqliteStore;

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store backend or encoding failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Backend lock poisoned by a panicking writer.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode stored value: {err}"),
            Self::Poisoned => write!(f, "store backend is unavailable"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed persistence shared by all tabs of one origin.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Notification delivered to a tab when another tab wrote a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    /// Serialized value after the write; `None` when the key was cleared.
    pub new_value: Option<String>,
}

/// Persisted keys of the school administration app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Students,
    AttendanceRecords,
    CsrSubmissions,
    Events,
    UnreadCsrCount,
    LoggedIn,
}

impl StoreKey {
    pub const ALL: [StoreKey; 6] = [
        Self::Students,
        Self::AttendanceRecords,
        Self::CsrSubmissions,
        Self::Events,
        Self::UnreadCsrCount,
        Self::LoggedIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::AttendanceRecords => "attendanceRecords",
            Self::CsrSubmissions => "csrSubmissions",
            Self::Events => "events",
            Self::UnreadCsrCount => "schoolManagementUnreadCsrCount",
            Self::LoggedIn => "sm_isLoggedIn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and parses one JSON value, falling back to `default`.
pub fn get_json_or<T, S>(store: &S, key: StoreKey, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key.as_str()) {
        Ok(Some(raw)) => decode_json(key.as_str(), &raw).unwrap_or(default),
        Ok(None) => default,
        Err(err) => {
            warn!(
                "event=store_read module=store status=fallback key={} error_code=backend_read_failed error={}",
                key, err
            );
            default
        }
    }
}

/// Parses a raw stored value, logging and returning `None` on failure.
pub fn decode_json<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event=store_read module=store status=fallback key={} error_code=parse_failed error={}",
                key, err
            );
            None
        }
    }
}

/// Serializes `value` to JSON and overwrites `key`.
pub fn set_json<T, S>(store: &S, key: StoreKey, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(StoreError::Encode)?;
    store.set_item(key.as_str(), &encoded)
}

#[cfg(test)]
mod tests {
    use super::{get_json_or, set_json, KeyValueStore, MemoryStore, StoreKey};

    #[test]
    fn store_key_parse_matches_as_str() {
        for key in StoreKey::ALL {
            assert_eq!(StoreKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(StoreKey::parse("unrelated"), None);
    }

    #[test]
    fn missing_key_returns_default() {
        let store = MemoryStore::new();
        let value: Vec<u32> = get_json_or(&store, StoreKey::Events, vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn malformed_json_returns_default() {
        let store = MemoryStore::new();
        store.set_item("students", "{not json").unwrap();
        let value: Vec<u32> = get_json_or(&store, StoreKey::Students, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn wrong_shape_returns_default() {
        let store = MemoryStore::new();
        store
            .set_item("schoolManagementUnreadCsrCount", "\"three\"")
            .unwrap();
        let value: u32 = get_json_or(&store, StoreKey::UnreadCsrCount, 0);
        assert_eq!(value, 0);
    }

    #[test]
    fn set_json_overwrites_previous_value() {
        let store = MemoryStore::new();
        set_json(&store, StoreKey::UnreadCsrCount, &3u32).unwrap();
        set_json(&store, StoreKey::UnreadCsrCount, &5u32).unwrap();
        assert_eq!(
            store.get_item("schoolManagementUnreadCsrCount").unwrap(),
            Some("5".to_string())
        );
    }
}
