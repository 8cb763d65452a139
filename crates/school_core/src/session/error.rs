//! Session error taxonomy.
//!
//! `Display` output is the user-visible notice text.

use crate::model::event::EventId;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Form whose required fields were incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Student,
    Event,
    AttendanceSelection,
}

#[derive(Debug)]
pub enum SessionError {
    MissingFields(FormKind),
    DuplicatePen(String),
    EventNotFound(EventId),
    InvalidCredentials,
    NotLoggedIn,
    Store(StoreError),
}

impl SessionError {
    /// Stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => "missing_fields",
            Self::DuplicatePen(_) => "duplicate_pen",
            Self::EventNotFound(_) => "event_not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::NotLoggedIn => "not_logged_in",
            Self::Store(_) => "store_write_failed",
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(FormKind::Student) => {
                write!(f, "Please enter student name, class, and PEN number.")
            }
            Self::MissingFields(FormKind::Event) => write!(
                f,
                "Please fill in all event details (Name, Date, Time, Description)."
            ),
            Self::MissingFields(FormKind::AttendanceSelection) => write!(
                f,
                "Please select a class and date before saving attendance."
            ),
            Self::DuplicatePen(pen) => write!(
                f,
                "A student with PEN Number \"{pen}\" already exists. Please use a unique PEN Number."
            ),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::InvalidCredentials => write!(f, "Invalid username or password."),
            Self::NotLoggedIn => write!(f, "Please log in first."),
            Self::Store(err) => write!(f, "Could not save changes: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
