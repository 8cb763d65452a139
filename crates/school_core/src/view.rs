//! View seam between session state and the rendering layer.
//!
//! # Responsibility
//! - Name the app sections and the fragments a host renders.
//! - Carry transient user notices.
//!
//! # Invariants
//! - Render instructions are full snapshots of one fragment; a host can
//!   replace the fragment wholesale without diffing.

use crate::model::attendance::{AttendanceStatus, AttendanceSummary, ClassDay};
use crate::model::event::{EventForm, EventRecord};
use crate::model::feedback::FeedbackSubmission;
use crate::model::student::{Student, StudentId};

/// Top-level content section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    RegisterStudent,
    AttendanceDetails,
    Notifications,
    EventDetails,
}

impl View {
    pub const ALL: [View; 4] = [
        Self::RegisterStudent,
        Self::AttendanceDetails,
        Self::Notifications,
        Self::EventDetails,
    ];

    /// Stable section id used by the host markup.
    pub fn section_id(self) -> &'static str {
        match self {
            Self::RegisterStudent => "register-student-section",
            Self::AttendanceDetails => "attendance-details-section",
            Self::Notifications => "notifications-section",
            Self::EventDetails => "event-details-section",
        }
    }

    pub fn from_section_id(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|view| view.section_id() == value.trim())
    }
}

/// One row of the mark-attendance form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceFormRow {
    pub student_id: StudentId,
    pub name: String,
    pub pen_number: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkAttendanceForm {
    /// Class or date not chosen yet.
    NoSelection,
    /// No registered student carries the chosen class label.
    EmptyClass(ClassDay),
    Rows {
        selection: ClassDay,
        rows: Vec<AttendanceFormRow>,
    },
}

/// Fragment update for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    LoginScreen,
    ShowView(View),
    StudentsList(Vec<Student>),
    /// Options of both class dropdowns.
    ClassOptions(Vec<String>),
    MarkAttendanceForm(MarkAttendanceForm),
    AttendanceSummary(AttendanceSummary),
    /// Newest first.
    Notifications(Vec<FeedbackSubmission>),
    /// Chronological.
    EventsList(Vec<EventRecord>),
    /// Unread counter; `None` hides the badge.
    Badge(Option<u32>),
    EventForm(EventForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration_ms: u64,
}

/// Rendering layer consuming instructions and notices.
pub trait ViewSink {
    fn render(&mut self, instruction: RenderInstruction);
    fn notify(&mut self, notice: Notice);
}

/// Sink that records everything it receives.
#[derive(Debug, Default)]
pub struct RecordingViewSink {
    pub instructions: Vec<RenderInstruction>,
    pub notices: Vec<Notice>,
}

impl RecordingViewSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
        self.notices.clear();
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Last instruction matching `predicate`.
    pub fn last_matching(
        &self,
        predicate: impl Fn(&RenderInstruction) -> bool,
    ) -> Option<&RenderInstruction> {
        self.instructions
            .iter()
            .rev()
            .find(|instruction| predicate(instruction))
    }
}

impl ViewSink for RecordingViewSink {
    fn render(&mut self, instruction: RenderInstruction) {
        self.instructions.push(instruction);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
