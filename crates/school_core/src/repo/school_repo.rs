//! School repository contract and its key-value implementation.

use crate::model::attendance::AttendanceRecord;
use crate::model::event::EventRecord;
use crate::model::feedback::FeedbackSubmission;
use crate::model::student::Student;
use crate::store::{get_json_or, set_json, KeyValueStore, StorageChange, StoreKey, StoreResult};

/// Repository interface for the persisted school collections.
pub trait SchoolRepository {
    fn load_students(&self) -> Vec<Student>;
    fn save_students(&self, students: &[Student]) -> StoreResult<()>;
    fn load_attendance(&self) -> Vec<AttendanceRecord>;
    fn save_attendance(&self, records: &[AttendanceRecord]) -> StoreResult<()>;
    fn load_events(&self) -> Vec<EventRecord>;
    fn save_events(&self, events: &[EventRecord]) -> StoreResult<()>;
    fn load_submissions(&self) -> Vec<FeedbackSubmission>;
    fn save_submissions(&self, submissions: &[FeedbackSubmission]) -> StoreResult<()>;
    fn load_unread_count(&self) -> u32;
    fn save_unread_count(&self, count: u32) -> StoreResult<()>;
    fn load_logged_in(&self) -> bool;
    fn save_logged_in(&self, logged_in: bool) -> StoreResult<()>;
}

/// Source of store-change notifications written by other tabs.
pub trait ChangeSource {
    fn poll_change(&self) -> Option<StorageChange>;
}

impl ChangeSource for crate::store::TabStore {
    fn poll_change(&self) -> Option<StorageChange> {
        crate::store::TabStore::poll_change(self)
    }
}

/// `SchoolRepository` over any `KeyValueStore`.
pub struct StoreSchoolRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoreSchoolRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> SchoolRepository for StoreSchoolRepository<S> {
    fn load_students(&self) -> Vec<Student> {
        get_json_or(&self.store, StoreKey::Students, Vec::new())
    }

    fn save_students(&self, students: &[Student]) -> StoreResult<()> {
        set_json(&self.store, StoreKey::Students, students)
    }

    fn load_attendance(&self) -> Vec<AttendanceRecord> {
        get_json_or(&self.store, StoreKey::AttendanceRecords, Vec::new())
    }

    fn save_attendance(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        set_json(&self.store, StoreKey::AttendanceRecords, records)
    }

    fn load_events(&self) -> Vec<EventRecord> {
        get_json_or(&self.store, StoreKey::Events, Vec::new())
    }

    fn save_events(&self, events: &[EventRecord]) -> StoreResult<()> {
        set_json(&self.store, StoreKey::Events, events)
    }

    fn load_submissions(&self) -> Vec<FeedbackSubmission> {
        get_json_or(&self.store, StoreKey::CsrSubmissions, Vec::new())
    }

    fn save_submissions(&self, submissions: &[FeedbackSubmission]) -> StoreResult<()> {
        set_json(&self.store, StoreKey::CsrSubmissions, submissions)
    }

    fn load_unread_count(&self) -> u32 {
        get_json_or(&self.store, StoreKey::UnreadCsrCount, 0)
    }

    fn save_unread_count(&self, count: u32) -> StoreResult<()> {
        set_json(&self.store, StoreKey::UnreadCsrCount, &count)
    }

    fn load_logged_in(&self) -> bool {
        get_json_or(&self.store, StoreKey::LoggedIn, false)
    }

    fn save_logged_in(&self, logged_in: bool) -> StoreResult<()> {
        set_json(&self.store, StoreKey::LoggedIn, &logged_in)
    }
}

impl<S: KeyValueStore + ChangeSource> ChangeSource for StoreSchoolRepository<S> {
    fn poll_change(&self) -> Option<StorageChange> {
        self.store.poll_change()
    }
}
