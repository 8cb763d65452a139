//! CLI probe for `school_core`.
//!
//! # Responsibility
//! - Verify core crate linkage with deterministic output.
//! - Optionally summarize the collections persisted in a SQLite store file.
//!
//! Usage: `school_cli [store.sqlite3]`

use school_core::{SchoolRepository, SqliteStore, StoreSchoolRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("school_core ping={}", school_core::ping());
    println!("school_core version={}", school_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let store = match SqliteStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = StoreSchoolRepository::new(store);
    println!(
        "students={} attendance_records={} events={} submissions={} unread={} logged_in={}",
        repo.load_students().len(),
        repo.load_attendance().len(),
        repo.load_events().len(),
        repo.load_submissions().len(),
        repo.load_unread_count(),
        repo.load_logged_in()
    );
    ExitCode::SUCCESS
}
