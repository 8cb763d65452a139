//! Feedback notification use-cases.
//!
//! # Invariants
//! - Submissions and the unread counter are committed to memory together,
//!   and only after both store writes succeeded.
//! - A failed counter write puts the previous submissions back in the store.

use crate::model::feedback::FeedbackSubmission;
use crate::repo::school_repo::SchoolRepository;
use crate::session::{SchoolSession, SessionResult};
use crate::view::ViewSink;
use log::{error, info};

impl<R: SchoolRepository, V: ViewSink> SchoolSession<R, V> {
    /// Flags every known submission read and zeroes the unread counter.
    ///
    /// Submissions arriving later keep their own `isRead` value.
    pub fn mark_notifications_read(&mut self) -> SessionResult<()> {
        let stored = self.state.submissions.clone();
        self.commit_all_read("csr_mark_read", stored)
    }

    /// Writes `stored` back fully read with a zero counter, then commits
    /// both to memory and re-renders.
    ///
    /// `stored` must be what the store currently holds for submissions.
    pub(crate) fn commit_all_read(
        &mut self,
        operation: &str,
        stored: Vec<FeedbackSubmission>,
    ) -> SessionResult<()> {
        let submissions: Vec<_> = stored
            .iter()
            .cloned()
            .map(|mut submission| {
                submission.is_read = true;
                submission
            })
            .collect();

        let saved = self.repo.save_submissions(&submissions);
        self.persisted(operation, saved)?;

        if let Err(err) = self.repo.save_unread_count(0) {
            if let Err(restore_err) = self.repo.save_submissions(&stored) {
                error!(
                    "event={} module=session status=error error_code=submissions_restore_failed error={}",
                    operation, restore_err
                );
            }
            return self.persisted(operation, Err(err));
        }

        self.state.submissions = submissions;
        self.state.unread_count = 0;
        info!(
            "event={} module=session status=ok submissions={}",
            operation,
            self.state.submissions.len()
        );
        self.render_notifications();
        self.render_badge();
        Ok(())
    }
}
