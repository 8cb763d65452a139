//! User-action use-cases on `SchoolSession`.
//!
//! Each use-case validates, persists the whole affected collection and only
//! then swaps the in-memory copy and re-renders dependent views.

pub mod attendance_service;
pub mod event_service;
pub mod notification_service;
pub mod student_service;
