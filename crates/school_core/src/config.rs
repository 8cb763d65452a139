//! Session configuration.

use crate::view::View;

/// Notices disappear after this long.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 3_000;
/// Time prefilled in a blank event form.
pub const DEFAULT_EVENT_TIME: &str = "09:00";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// View shown right after login.
    pub initial_view: View,
    pub default_event_time: String,
    pub notice_duration_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_view: View::RegisterStudent,
            default_event_time: DEFAULT_EVENT_TIME.to_string(),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}
