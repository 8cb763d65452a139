//! Pure projections from session state to view fragments.

use crate::model::attendance::{prefilled_status, summarize, AttendanceSummary, ClassDay};
use crate::model::event::chronological;
use crate::model::student::{classes_of, students_in_class};
use crate::session::AppState;
use crate::view::{AttendanceFormRow, MarkAttendanceForm, RenderInstruction};

pub fn students_list(state: &AppState) -> RenderInstruction {
    RenderInstruction::StudentsList(state.students.clone())
}

pub fn class_options(state: &AppState) -> RenderInstruction {
    RenderInstruction::ClassOptions(classes_of(&state.students))
}

/// Rows for the selected class, each prefilled from an existing record.
pub fn mark_attendance_form(state: &AppState) -> MarkAttendanceForm {
    match &state.mark_selection {
        None => MarkAttendanceForm::NoSelection,
        Some(selection) => attendance_form_rows(state, selection),
    }
}

fn attendance_form_rows(state: &AppState, selection: &ClassDay) -> MarkAttendanceForm {
    let rows: Vec<AttendanceFormRow> = students_in_class(&state.students, &selection.class_label)
        .map(|student| AttendanceFormRow {
            student_id: student.id,
            name: student.name.clone(),
            pen_number: student.pen_display().to_string(),
            status: prefilled_status(&state.attendance, student.id, &selection.date),
        })
        .collect();

    if rows.is_empty() {
        MarkAttendanceForm::EmptyClass(selection.clone())
    } else {
        MarkAttendanceForm::Rows {
            selection: selection.clone(),
            rows,
        }
    }
}

/// `None` until a class and date are selected for viewing.
pub fn attendance_summary(state: &AppState) -> Option<AttendanceSummary> {
    state
        .summary_selection
        .as_ref()
        .map(|selection| summarize(&state.students, &state.attendance, selection))
}

pub fn notifications(state: &AppState) -> RenderInstruction {
    RenderInstruction::Notifications(state.submissions.iter().rev().cloned().collect())
}

pub fn events_list(state: &AppState) -> RenderInstruction {
    RenderInstruction::EventsList(chronological(&state.events))
}

pub fn badge(state: &AppState) -> RenderInstruction {
    RenderInstruction::Badge((state.unread_count > 0).then_some(state.unread_count))
}

pub fn event_form(state: &AppState) -> RenderInstruction {
    RenderInstruction::EventForm(state.event_form.clone())
}
