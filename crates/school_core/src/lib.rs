//! Client-local core of the school administration app.
//! Owns the persisted collections, their per-tab mirrors and the
//! cross-tab refresh rules; rendering and storage are host seams.

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;

pub use auth::{Authenticator, StaticCredentials};
pub use clock::{Clock, FixedClock, IdGenerator, SystemClock};
pub use config::SessionConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::attendance::{
    AbsentEntry, AttendanceRecord, AttendanceStatus, AttendanceSummary, ClassDay,
};
pub use model::event::{EventDraft, EventForm, EventId, EventRecord};
pub use model::feedback::FeedbackSubmission;
pub use model::student::{classes_of, Student, StudentId};
pub use repo::school_repo::{ChangeSource, SchoolRepository, StoreSchoolRepository};
pub use session::{AppState, FormKind, SchoolSession, SessionError, SessionResult};
pub use store::{
    KeyValueStore, MemoryStore, Origin, SqliteStore, StorageChange, StoreError, StoreKey,
    StoreResult, TabStore,
};
pub use sync::SyncOutcome;
pub use view::{
    AttendanceFormRow, MarkAttendanceForm, Notice, NoticeKind, RecordingViewSink,
    RenderInstruction, View, ViewSink,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
