use school_core::{
    FixedClock, FormKind, KeyValueStore, MemoryStore, NoticeKind, RecordingViewSink,
    RenderInstruction, SchoolRepository, SchoolSession, SessionConfig, SessionError,
    StaticCredentials, StoreSchoolRepository,
};
use std::collections::HashSet;

const NOW_MS: i64 = 1_792_281_600_000;

type Session = SchoolSession<StoreSchoolRepository<MemoryStore>, RecordingViewSink>;

#[test]
fn added_student_is_persisted_once_with_unique_id() {
    let mut session = logged_in_session();

    let first = session.add_student("Asha Rao", "5A", "PEN-001").unwrap();
    let second = session.add_student("Ben Das", "5A", "PEN-002").unwrap();
    let third = session.add_student("Chen Li", "6B", "PEN-003").unwrap();

    let reloaded = session.repo().load_students();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(
        reloaded
            .iter()
            .filter(|student| student.pen_number == "PEN-002")
            .count(),
        1
    );
    let ids: HashSet<i64> = reloaded.iter().map(|student| student.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(first.id < second.id && second.id < third.id);
    assert_eq!(reloaded[0], first);
}

#[test]
fn duplicate_pen_is_rejected_without_mutation() {
    let mut session = logged_in_session();
    session.add_student("Asha Rao", "5A", "PEN-001").unwrap();
    let before_store = session.repo().store().get_item("students").unwrap();
    let before_memory = session.state().students.clone();
    session.view_mut().clear();

    let err = session
        .add_student("Someone Else", "6B", "PEN-001")
        .unwrap_err();

    assert!(matches!(err, SessionError::DuplicatePen(ref pen) if pen == "PEN-001"));
    assert_eq!(session.state().students, before_memory);
    assert_eq!(session.repo().store().get_item("students").unwrap(), before_store);
    let notice = session.view().last_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("PEN-001"));
    assert!(session.view().instructions.is_empty());
}

#[test]
fn pen_comparison_is_case_sensitive() {
    let mut session = logged_in_session();
    session.add_student("Asha Rao", "5A", "pen-001").unwrap();
    session.add_student("Ben Das", "5A", "PEN-001").unwrap();
    assert_eq!(session.repo().load_students().len(), 2);
}

#[test]
fn blank_fields_are_rejected() {
    let mut session = logged_in_session();

    let err = session.add_student("Asha Rao", "   ", "PEN-001").unwrap_err();

    assert!(matches!(err, SessionError::MissingFields(FormKind::Student)));
    assert!(session.state().students.is_empty());
    assert_eq!(session.repo().store().get_item("students").unwrap(), None);
}

#[test]
fn inputs_are_trimmed() {
    let mut session = logged_in_session();
    let student = session.add_student("  Asha Rao ", " 5A", "PEN-001 ").unwrap();
    assert_eq!(student.name, "Asha Rao");
    assert_eq!(student.class_label, "5A");
    assert_eq!(student.pen_number, "PEN-001");
}

#[test]
fn add_renders_students_and_class_options() {
    let mut session = logged_in_session();
    session.add_student("Asha Rao", "6B", "PEN-001").unwrap();
    session.add_student("Ben Das", "5A", "PEN-002").unwrap();

    let options = session
        .view()
        .last_matching(|instruction| matches!(instruction, RenderInstruction::ClassOptions(_)))
        .unwrap();
    assert_eq!(
        options,
        &RenderInstruction::ClassOptions(vec!["5A".to_string(), "6B".to_string()])
    );
    assert_eq!(
        session.view().last_notice().unwrap().message,
        "New student added: Ben Das in 5A (PEN: PEN-002)"
    );
}

#[test]
fn delete_recomputes_classes_and_keeps_attendance() {
    let mut session = logged_in_session();
    let asha = session.add_student("Asha Rao", "5A", "PEN-001").unwrap();
    session.add_student("Ben Das", "6B", "PEN-002").unwrap();
    session
        .save_attendance(
            "5A",
            "2026-10-18",
            &[(asha.id, school_core::AttendanceStatus::Present)]
                .into_iter()
                .collect(),
        )
        .unwrap();

    session.delete_student(asha.id).unwrap();

    assert_eq!(session.state().classes(), vec!["6B".to_string()]);
    assert_eq!(session.repo().load_students().len(), 1);
    assert_eq!(session.repo().load_attendance().len(), 1);

    let summary = session.select_attendance_view("5A", "2026-10-18").unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.present, 0);
}

#[test]
fn delete_unknown_id_leaves_students_unchanged() {
    let mut session = logged_in_session();
    session.add_student("Asha Rao", "5A", "PEN-001").unwrap();
    let before = session.state().students.clone();

    session.delete_student(42).unwrap();

    assert_eq!(session.state().students, before);
    assert_eq!(session.repo().load_students(), before);
}

fn logged_in_session() -> Session {
    let mut session = SchoolSession::open_with(
        StoreSchoolRepository::new(MemoryStore::new()),
        RecordingViewSink::new(),
        SessionConfig::default(),
        Box::new(StaticCredentials::default()),
        Box::new(FixedClock::from_millis(NOW_MS)),
    );
    session.login("admin", "admin123").unwrap();
    session.view_mut().clear();
    session
}
