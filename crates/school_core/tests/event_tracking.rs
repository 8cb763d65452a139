use school_core::{
    EventDraft, FixedClock, FormKind, MemoryStore, NoticeKind, RecordingViewSink,
    RenderInstruction, SchoolRepository, SchoolSession, SessionConfig, SessionError,
    StaticCredentials, StoreSchoolRepository, View,
};

const NOW_MS: i64 = 1_792_281_600_000;

type Session = SchoolSession<StoreSchoolRepository<MemoryStore>, RecordingViewSink>;

#[test]
fn delete_removes_exactly_one_event() {
    let mut session = logged_in_session();
    let sports = session.add_event(&draft("Sports day", "2026-11-02")).unwrap();
    let fair = session.add_event(&draft("Science fair", "2026-11-10")).unwrap();
    let meeting = session.add_event(&draft("PTA meeting", "2026-10-25")).unwrap();

    session.delete_event(fair.id).unwrap();

    let stored = session.repo().load_events();
    assert_eq!(stored, vec![sports, meeting]);
    assert_eq!(session.state().events, stored);
}

#[test]
fn delete_resets_edit_in_progress() {
    let mut session = logged_in_session();
    let sports = session.add_event(&draft("Sports day", "2026-11-02")).unwrap();
    session.open_edit_event(sports.id).unwrap();
    assert_eq!(session.state().event_form.editing, Some(sports.id));

    session.delete_event(sports.id).unwrap();

    let form = &session.state().event_form;
    assert_eq!(form.editing, None);
    assert_eq!(form.title(), "Add New Event");
    assert_eq!(form.draft.date, "2026-10-18");
    assert_eq!(form.draft.time, "09:00");
    assert!(form.draft.name.is_empty());
}

#[test]
fn update_of_missing_event_is_rejected_without_mutation() {
    let mut session = logged_in_session();
    session.add_event(&draft("Sports day", "2026-11-02")).unwrap();
    let before = session.repo().load_events();

    let err = session
        .update_event(12345, &draft("Renamed", "2026-12-01"))
        .unwrap_err();

    assert!(matches!(err, SessionError::EventNotFound(12345)));
    assert_eq!(session.repo().load_events(), before);
    assert_eq!(session.state().events, before);
    assert_eq!(session.view().last_notice().unwrap().kind, NoticeKind::Error);
}

#[test]
fn update_replaces_fields_in_place() {
    let mut session = logged_in_session();
    let first = session.add_event(&draft("Sports day", "2026-11-02")).unwrap();
    let second = session.add_event(&draft("Science fair", "2026-11-10")).unwrap();

    let updated = session
        .update_event(
            first.id,
            &EventDraft::new("Sports day (moved)", "2026-11-03", "10:30", "Bring water"),
        )
        .unwrap();

    let stored = session.repo().load_events();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], updated);
    assert_eq!(stored[0].id, first.id);
    assert_eq!(stored[0].time, "10:30");
    assert_eq!(stored[1], second);
}

#[test]
fn incomplete_drafts_are_rejected() {
    let mut session = logged_in_session();
    let existing = session.add_event(&draft("Sports day", "2026-11-02")).unwrap();

    let add_err = session
        .add_event(&EventDraft::new("Fair", "2026-11-10", "", "Stalls"))
        .unwrap_err();
    assert!(matches!(add_err, SessionError::MissingFields(FormKind::Event)));

    let update_err = session
        .update_event(existing.id, &EventDraft::new("Fair", "2026-11-10", "09:00", ""))
        .unwrap_err();
    assert!(matches!(
        update_err,
        SessionError::MissingFields(FormKind::Event)
    ));
    assert_eq!(session.repo().load_events(), vec![existing]);
}

#[test]
fn open_edit_populates_form_or_reports_missing() {
    let mut session = logged_in_session();
    let sports = session.add_event(&draft("Sports day", "2026-11-02")).unwrap();

    session.open_edit_event(sports.id).unwrap();
    let form = &session.state().event_form;
    assert_eq!(form.title(), "Update Event Details");
    assert_eq!(form.draft.name, "Sports day");

    let err = session.open_edit_event(7).unwrap_err();
    assert!(matches!(err, SessionError::EventNotFound(7)));
}

#[test]
fn events_render_chronologically() {
    let mut session = logged_in_session();
    session.add_event(&draft("Later", "2026-12-01")).unwrap();
    session.add_event(&draft("Sooner", "2026-10-20")).unwrap();

    let Some(RenderInstruction::EventsList(events)) = session
        .view()
        .last_matching(|instruction| matches!(instruction, RenderInstruction::EventsList(_)))
    else {
        panic!("events list was not rendered");
    };
    let names: Vec<&str> = events.iter().map(|event| event.name.as_str()).collect();
    assert_eq!(names, vec!["Sooner", "Later"]);
}

#[test]
fn opening_event_view_resets_form() {
    let mut session = logged_in_session();
    let sports = session.add_event(&draft("Sports day", "2026-11-02")).unwrap();
    session.open_edit_event(sports.id).unwrap();

    session.show_view(View::EventDetails).unwrap();

    assert_eq!(session.state().event_form.editing, None);
    assert_eq!(session.state().current_view, View::EventDetails);
}

fn draft(name: &str, date: &str) -> EventDraft {
    EventDraft::new(name, date, "09:00", format!("{name} details"))
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
