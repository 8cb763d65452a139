//! Cross-tab synchronization.
//!
//! # Responsibility
//! - Reload in-memory state when another tab wrote a watched key.
//! - Re-render only the fragments whose visible section depends on it.
//!
//! # Invariants
//! - Notifications are applied one at a time on the session owner's turn.
//! - An unchanged feedback collection triggers no write and no render.
//! - A failed write leaves the in-memory mirrors as they were; the next
//!   change for the key retries the refresh.
//! - Keys that are not watched (including the login flag) are ignored.

use crate::model::feedback::{unread_count, FeedbackSubmission};
use crate::repo::school_repo::{ChangeSource, SchoolRepository};
use crate::session::{SchoolSession, SessionResult};
use crate::store::{decode_json, StorageChange, StoreKey};
use crate::view::{View, ViewSink};
use log::{debug, info, warn};

/// Result of applying one storage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Key is not watched.
    Ignored,
    /// Value matched the in-memory copy.
    Unchanged,
    Applied(StoreKey),
}

impl<R: SchoolRepository, V: ViewSink> SchoolSession<R, V> {
    /// Applies one change written by another tab.
    pub fn apply_storage_change(&mut self, change: &StorageChange) -> SessionResult<SyncOutcome> {
        let Some(key) = StoreKey::parse(&change.key) else {
            debug!(
                "event=sync_apply module=sync status=ignored key={}",
                change.key
            );
            return Ok(SyncOutcome::Ignored);
        };

        let outcome = match key {
            StoreKey::Students => {
                self.state.students = self.repo.load_students();
                if self.state.logged_in {
                    self.render_students();
                }
                SyncOutcome::Applied(key)
            }
            StoreKey::AttendanceRecords => {
                self.state.attendance = self.repo.load_attendance();
                if self.state.logged_in {
                    self.render_summary();
                }
                SyncOutcome::Applied(key)
            }
            StoreKey::CsrSubmissions => self.sync_submissions(change)?,
            StoreKey::UnreadCsrCount => {
                self.state.unread_count = change
                    .new_value
                    .as_deref()
                    .and_then(|raw| decode_json::<u32>(key.as_str(), raw))
                    .unwrap_or_else(|| self.repo.load_unread_count());
                self.render_badge();
                SyncOutcome::Applied(key)
            }
            StoreKey::Events => {
                self.state.events = self.repo.load_events();
                if self.state.logged_in && self.state.current_view == View::EventDetails {
                    self.render_events();
                }
                SyncOutcome::Applied(key)
            }
            StoreKey::LoggedIn => SyncOutcome::Ignored,
        };

        info!("event=sync_apply module=sync status=ok key={key} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Applies every pending change from the repository's change source.
    ///
    /// Failures are already surfaced as notices; processing continues with
    /// the next change. Returns the number of changes taken.
    pub fn process_pending_changes(&mut self) -> usize
    where
        R: ChangeSource,
    {
        let mut processed = 0;
        while let Some(change) = self.repo.poll_change() {
            processed += 1;
            if let Err(err) = self.apply_storage_change(&change) {
                warn!(
                    "event=sync_apply module=sync status=error key={} error_code={}",
                    change.key,
                    err.code()
                );
            }
        }
        processed
    }

    fn sync_submissions(&mut self, change: &StorageChange) -> SessionResult<SyncOutcome> {
        let incoming: Vec<FeedbackSubmission> = change
            .new_value
            .as_deref()
            .and_then(|raw| decode_json(StoreKey::CsrSubmissions.as_str(), raw))
            .unwrap_or_else(|| self.repo.load_submissions());
        if incoming == self.state.submissions {
            return Ok(SyncOutcome::Unchanged);
        }

        let notifications_visible = self.state.current_view == View::Notifications;

        if self.state.logged_in && notifications_visible {
            self.commit_all_read("sync_apply", incoming)?;
        } else {
            let unread = unread_count(&incoming);
            let saved = self.repo.save_unread_count(unread);
            self.persisted("sync_apply", saved)?;
            self.state.submissions = incoming;
            self.state.unread_count = unread;
            if notifications_visible {
                self.render_notifications();
            }
            self.render_badge();
        }

        Ok(SyncOutcome::Applied(StoreKey::CsrSubmissions))
    }
}
