//! School event records and the add/edit form state.

use crate::model::all_present;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub type EventId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Local time of day, `HH:MM`.
    pub time: String,
    pub description: String,
}

impl EventRecord {
    /// Parsed start instant; `None` for malformed date/time text.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&format!("{}T{}", self.date, self.time), "%Y-%m-%dT%H:%M")
            .ok()
    }
}

/// User input for creating or updating an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub description: String,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
            description: description.into(),
        }
    }

    /// Trimmed copy when all four fields are present.
    pub fn normalized(&self) -> Option<Self> {
        if !all_present(&[
            self.name.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.description.as_str(),
        ]) {
            return None;
        }
        Some(Self::new(
            self.name.trim(),
            self.date.trim(),
            self.time.trim(),
            self.description.trim(),
        ))
    }

    pub fn into_record(self, id: EventId) -> EventRecord {
        EventRecord {
            id,
            name: self.name,
            date: self.date,
            time: self.time,
            description: self.description,
        }
    }
}

/// Add/update form shown in the event details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    /// Event being edited; `None` in "add" mode.
    pub editing: Option<EventId>,
    pub draft: EventDraft,
}

impl EventForm {
    /// Empty "add" form defaulting to `today` at `default_time`.
    pub fn blank(today: &str, default_time: &str) -> Self {
        Self {
            editing: None,
            draft: EventDraft::new("", today, default_time, ""),
        }
    }

    pub fn editing(event: &EventRecord) -> Self {
        Self {
            editing: Some(event.id),
            draft: EventDraft::new(
                event.name.clone(),
                event.date.clone(),
                event.time.clone(),
                event.description.clone(),
            ),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.editing {
            Some(_) => "Update Event Details",
            None => "Add New Event",
        }
    }
}

/// Events ordered by start time, earliest first. Malformed date/time
/// entries keep their relative order after all well-formed ones.
pub fn chronological(events: &[EventRecord]) -> Vec<EventRecord> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| match (a.starts_at(), b.starts_at()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}
