//! Event tracking use-cases.

use crate::model::event::{EventDraft, EventForm, EventId, EventRecord};
use crate::repo::school_repo::SchoolRepository;
use crate::session::{FormKind, SchoolSession, SessionError, SessionResult};
use crate::view::{NoticeKind, ViewSink};
use log::info;

impl<R: SchoolRepository, V: ViewSink> SchoolSession<R, V> {
    /// Creates an event from a complete draft.
    pub fn add_event(&mut self, draft: &EventDraft) -> SessionResult<EventRecord> {
        let Some(draft) = draft.normalized() else {
            return self.reject("event_add", SessionError::MissingFields(FormKind::Event));
        };

        let floor = self.state.events.iter().map(|event| event.id).max();
        let event = draft.into_record(self.ids.next(self.clock.now_millis(), floor));

        let mut events = self.state.events.clone();
        events.push(event.clone());
        let saved = self.repo.save_events(&events);
        self.persisted("event_add", saved)?;
        self.state.events = events;

        info!(
            "event=event_add module=session status=ok event_id={} events={}",
            event.id,
            self.state.events.len()
        );
        self.render_events();
        self.reset_event_form();
        self.notice(
            NoticeKind::Success,
            format!("Event \"{}\" added successfully!", event.name),
        );
        Ok(event)
    }

    /// Loads an existing event into the form for editing.
    pub fn open_edit_event(&mut self, event_id: EventId) -> SessionResult<()> {
        let Some(form) = self
            .state
            .events
            .iter()
            .find(|event| event.id == event_id)
            .map(EventForm::editing)
        else {
            return self.reject("event_edit_open", SessionError::EventNotFound(event_id));
        };

        self.state.event_form = form;
        self.render_event_form();
        Ok(())
    }

    /// Replaces the fields of an existing event, keeping its id and position.
    ///
    /// # Errors
    /// - `MissingFields` when any draft field is blank.
    /// - `EventNotFound` when no event has `event_id`.
    pub fn update_event(
        &mut self,
        event_id: EventId,
        draft: &EventDraft,
    ) -> SessionResult<EventRecord> {
        let Some(draft) = draft.normalized() else {
            return self.reject("event_update", SessionError::MissingFields(FormKind::Event));
        };
        let Some(index) = self
            .state
            .events
            .iter()
            .position(|event| event.id == event_id)
        else {
            return self.reject("event_update", SessionError::EventNotFound(event_id));
        };

        let updated = draft.into_record(event_id);
        let mut events = self.state.events.clone();
        events[index] = updated.clone();
        let saved = self.repo.save_events(&events);
        self.persisted("event_update", saved)?;
        self.state.events = events;

        info!("event=event_update module=session status=ok event_id={event_id}");
        self.render_events();
        self.reset_event_form();
        self.notice(
            NoticeKind::Success,
            format!("Event \"{}\" updated successfully!", updated.name),
        );
        Ok(updated)
    }

    /// Removes the event with `event_id` and clears any edit in progress.
    pub fn delete_event(&mut self, event_id: EventId) -> SessionResult<()> {
        let events: Vec<EventRecord> = self
            .state
            .events
            .iter()
            .filter(|event| event.id != event_id)
            .cloned()
            .collect();
        let removed = self.state.events.len() - events.len();

        let saved = self.repo.save_events(&events);
        self.persisted("event_delete", saved)?;
        self.state.events = events;

        info!(
            "event=event_delete module=session status=ok event_id={} removed={}",
            event_id, removed
        );
        self.render_events();
        self.notice(NoticeKind::Success, "Event deleted successfully.");
        self.reset_event_form();
        Ok(())
    }

    /// Puts the form back into "add" mode for today at the default time.
    pub fn reset_event_form(&mut self) {
        self.state.event_form =
            EventForm::blank(&self.clock.today(), &self.config.default_event_time);
        self.render_event_form();
    }
}
