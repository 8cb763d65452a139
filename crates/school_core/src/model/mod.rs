//! Persisted record shapes.
//!
//! # Responsibility
//! - Define the JSON shapes stored under each key.
//! - Keep field names compatible with data written by the browser front end
//!   (`penNumber`, `studentId`, `isRead`, `class`).
//!
//! # Invariants
//! - The class-label set is never stored; it is always derived from students.

pub mod attendance;
pub mod event;
pub mod feedback;
pub mod student;

/// Returns `true` when every field has non-blank content.
pub(crate) fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|field| !field.trim().is_empty())
}
