//! Student registration use-cases.
//!
//! # Invariants
//! - PEN numbers are unique among registered students (exact match).
//! - Deleting a student keeps their attendance records; summaries skip
//!   records whose student is gone.

use crate::model::all_present;
use crate::model::student::{find_by_pen, Student, StudentId};
use crate::repo::school_repo::SchoolRepository;
use crate::session::{FormKind, SchoolSession, SessionError, SessionResult};
use crate::view::{NoticeKind, ViewSink};
use log::info;

impl<R: SchoolRepository, V: ViewSink> SchoolSession<R, V> {
    /// Registers one student.
    ///
    /// # Errors
    /// - `MissingFields` when name, class or PEN is blank.
    /// - `DuplicatePen` when the PEN is already registered.
    /// - `Store` when the collection cannot be written.
    pub fn add_student(
        &mut self,
        name: &str,
        class_label: &str,
        pen_number: &str,
    ) -> SessionResult<Student> {
        if !all_present(&[name, class_label, pen_number]) {
            return self.reject("student_add", SessionError::MissingFields(FormKind::Student));
        }
        let pen_number = pen_number.trim();
        if find_by_pen(&self.state.students, pen_number).is_some() {
            return self.reject(
                "student_add",
                SessionError::DuplicatePen(pen_number.to_string()),
            );
        }

        let floor = self.state.students.iter().map(|student| student.id).max();
        let student = Student {
            id: self.ids.next(self.clock.now_millis(), floor),
            name: name.trim().to_string(),
            class_label: class_label.trim().to_string(),
            pen_number: pen_number.to_string(),
        };

        let mut students = self.state.students.clone();
        students.push(student.clone());
        let saved = self.repo.save_students(&students);
        self.persisted("student_add", saved)?;
        self.state.students = students;

        info!(
            "event=student_add module=session status=ok student_id={} students={}",
            student.id,
            self.state.students.len()
        );
        self.render_students();
        self.notice(
            NoticeKind::Success,
            format!(
                "New student added: {} in {} (PEN: {})",
                student.name, student.class_label, student.pen_number
            ),
        );
        Ok(student)
    }

    /// Removes the student with `student_id`; unknown ids leave the
    /// collection as is.
    pub fn delete_student(&mut self, student_id: StudentId) -> SessionResult<()> {
        let students: Vec<Student> = self
            .state
            .students
            .iter()
            .filter(|student| student.id != student_id)
            .cloned()
            .collect();
        let removed = self.state.students.len() - students.len();

        let saved = self.repo.save_students(&students);
        self.persisted("student_delete", saved)?;
        self.state.students = students;

        info!(
            "event=student_delete module=session status=ok student_id={} removed={}",
            student_id, removed
        );
        self.render_students();
        self.render_summary();
        self.notice(NoticeKind::Success, "Student deleted.");
        Ok(())
    }
}
