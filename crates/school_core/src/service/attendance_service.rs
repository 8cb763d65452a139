//! Attendance marking and review use-cases.
//!
//! # Invariants
//! - Saving (class, date) replaces every record of that pair; it never
//!   merges with or duplicates earlier saves.
//! - A student without an explicit selection gets no record. "No record"
//!   and "recorded absent" stay distinct in storage; both count as absent
//!   in summaries.

use crate::model::attendance::{
    replace_class_day, AttendanceRecord, AttendanceStatus, AttendanceSummary, ClassDay,
};
use crate::model::student::{students_in_class, StudentId};
use crate::render;
use crate::repo::school_repo::SchoolRepository;
use crate::session::{FormKind, SchoolSession, SessionError, SessionResult};
use crate::view::{MarkAttendanceForm, NoticeKind, ViewSink};
use log::info;
use std::collections::HashMap;

impl<R: SchoolRepository, V: ViewSink> SchoolSession<R, V> {
    /// Selects the class and day to mark and renders the prefilled form.
    pub fn open_mark_attendance(&mut self, class_label: &str, date: &str) -> MarkAttendanceForm {
        self.state.mark_selection = ClassDay::new(class_label, date);
        self.render_mark_form();
        render::mark_attendance_form(&self.state)
    }

    /// Saves one day of attendance for a class.
    ///
    /// `selections` maps student ids to the chosen status. Students of the
    /// class missing from it are not recorded; entries for students outside
    /// the class are ignored. Returns the number of records written.
    pub fn save_attendance(
        &mut self,
        class_label: &str,
        date: &str,
        selections: &HashMap<StudentId, AttendanceStatus>,
    ) -> SessionResult<usize> {
        let Some(selection) = ClassDay::new(class_label, date) else {
            return self.reject(
                "attendance_save",
                SessionError::MissingFields(FormKind::AttendanceSelection),
            );
        };

        let timestamp = self.clock.timestamp();
        let marked: Vec<AttendanceRecord> =
            students_in_class(&self.state.students, &selection.class_label)
                .filter_map(|student| {
                    selections
                        .get(&student.id)
                        .map(|status| AttendanceRecord {
                            student_id: student.id,
                            class_label: selection.class_label.clone(),
                            date: selection.date.clone(),
                            status: *status,
                            timestamp: timestamp.clone(),
                        })
                })
                .collect();
        let written = marked.len();

        let records = replace_class_day(&self.state.attendance, &selection, marked);
        let saved = self.repo.save_attendance(&records);
        self.persisted("attendance_save", saved)?;
        self.state.attendance = records;

        info!(
            "event=attendance_save module=session status=ok records_written={} records_total={}",
            written,
            self.state.attendance.len()
        );
        self.notice(NoticeKind::Success, "Attendance saved successfully!");
        self.render_summary();
        Ok(written)
    }

    /// Selects the class and day to review and renders the summary.
    ///
    /// Returns `None` when class or date is blank.
    pub fn select_attendance_view(
        &mut self,
        class_label: &str,
        date: &str,
    ) -> Option<AttendanceSummary> {
        self.state.summary_selection = ClassDay::new(class_label, date);
        self.render_summary();
        render::attendance_summary(&self.state)
    }
}
