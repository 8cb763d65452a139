//! Per-tab application session.
//!
//! # Responsibility
//! - Own the in-memory mirrors of every persisted collection.
//! - Sequence each user action as mutate, persist, then re-render.
//! - Gate the app behind the login check.
//!
//! # Invariants
//! - In-memory state only changes after the matching store write succeeded,
//!   so a rejected or failed operation leaves memory and store untouched.
//! - The class-label set is recomputed from `students` on every render.
//! - Every rejected operation emits exactly one error notice.

mod error;

pub use error::{FormKind, SessionError, SessionResult};

use crate::auth::{Authenticator, StaticCredentials};
use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::config::SessionConfig;
use crate::model::attendance::{AttendanceRecord, ClassDay};
use crate::model::event::{EventForm, EventRecord};
use crate::model::feedback::FeedbackSubmission;
use crate::model::student::{classes_of, Student};
use crate::render;
use crate::repo::school_repo::SchoolRepository;
use crate::store::StoreResult;
use crate::view::{Notice, NoticeKind, RenderInstruction, View, ViewSink};
use log::{error, info, warn};

/// In-memory state of one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub students: Vec<Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub events: Vec<EventRecord>,
    pub submissions: Vec<FeedbackSubmission>,
    pub unread_count: u32,
    pub logged_in: bool,
    pub current_view: View,
    /// Class and day chosen in the mark-attendance form.
    pub mark_selection: Option<ClassDay>,
    /// Class and day chosen in the attendance summary view.
    pub summary_selection: Option<ClassDay>,
    pub event_form: EventForm,
}

impl AppState {
    /// Distinct class labels of the current students.
    pub fn classes(&self) -> Vec<String> {
        classes_of(&self.students)
    }
}

/// One tab of the admin app bound to a repository and a view sink.
pub struct SchoolSession<R: SchoolRepository, V: ViewSink> {
    pub(crate) repo: R,
    pub(crate) view: V,
    pub(crate) auth: Box<dyn Authenticator>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) ids: IdGenerator,
    pub(crate) config: SessionConfig,
    pub(crate) state: AppState,
}

impl<R: SchoolRepository, V: ViewSink> SchoolSession<R, V> {
    /// Loads every collection with default configuration, static
    /// credentials and the system clock.
    pub fn open(repo: R, view: V) -> Self {
        Self::open_with(
            repo,
            view,
            SessionConfig::default(),
            Box::new(StaticCredentials::default()),
            Box::new(SystemClock),
        )
    }

    pub fn open_with(
        repo: R,
        view: V,
        config: SessionConfig,
        auth: Box<dyn Authenticator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let event_form = EventForm::blank(&clock.today(), &config.default_event_time);
        let state = AppState {
            students: repo.load_students(),
            attendance: repo.load_attendance(),
            events: repo.load_events(),
            submissions: repo.load_submissions(),
            unread_count: repo.load_unread_count(),
            logged_in: repo.load_logged_in(),
            current_view: config.initial_view,
            mark_selection: None,
            summary_selection: None,
            event_form,
        };
        info!(
            "event=session_open module=session status=ok students={} attendance_records={} events={} submissions={} logged_in={}",
            state.students.len(),
            state.attendance.len(),
            state.events.len(),
            state.submissions.len(),
            state.logged_in
        );

        Self {
            repo,
            view,
            auth,
            clock,
            ids: IdGenerator::default(),
            config,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Renders the app for the persisted login state: every view plus the
    /// current section when logged in, otherwise the login screen.
    pub fn start(&mut self) -> SessionResult<()> {
        if !self.state.logged_in {
            self.view.render(RenderInstruction::LoginScreen);
            return Ok(());
        }
        self.render_all();
        self.show_view(self.state.current_view)
    }

    /// Checks credentials and persists the login flag either way.
    pub fn login(&mut self, username: &str, password: &str) -> SessionResult<()> {
        let granted = self
            .auth
            .authenticate(username.trim(), password.trim());
        let saved = self.repo.save_logged_in(granted);
        self.persisted("login", saved)?;
        self.state.logged_in = granted;

        if !granted {
            info!("event=login module=session status=denied");
            return self.reject("login", SessionError::InvalidCredentials);
        }

        info!("event=login module=session status=ok");
        self.start()?;
        self.notice(NoticeKind::Success, "Logged in successfully!");
        Ok(())
    }

    pub fn logout(&mut self) -> SessionResult<()> {
        let saved = self.repo.save_logged_in(false);
        self.persisted("logout", saved)?;
        self.state.logged_in = false;
        info!("event=logout module=session status=ok");
        self.notice(NoticeKind::Success, "Logged out successfully!");
        self.view.render(RenderInstruction::LoginScreen);
        Ok(())
    }

    /// Account self-service is not available; tells the user so.
    pub fn request_new_registration(&mut self) {
        self.notice(
            NoticeKind::Info,
            "New admin accounts cannot be registered here. Ask an administrator for access.",
        );
    }

    pub fn request_password_reset(&mut self) {
        self.notice(
            NoticeKind::Info,
            "Password reset is not available here. Ask an administrator to reset your password.",
        );
    }

    /// Switches the visible section and refreshes what it shows.
    ///
    /// Opening the notifications section marks every submission read.
    pub fn show_view(&mut self, view: View) -> SessionResult<()> {
        if !self.state.logged_in {
            self.view.render(RenderInstruction::LoginScreen);
            return self.reject("show_view", SessionError::NotLoggedIn);
        }

        self.state.current_view = view;
        self.view.render(RenderInstruction::ShowView(view));
        match view {
            View::RegisterStudent => {}
            View::AttendanceDetails => {
                self.render_mark_form();
                self.render_summary();
            }
            View::Notifications => self.mark_notifications_read()?,
            View::EventDetails => {
                self.reset_event_form();
                self.render_events();
            }
        }
        Ok(())
    }

    pub(crate) fn render_all(&mut self) {
        self.render_students();
        self.render_notifications();
        self.render_events();
        self.render_badge();
    }

    /// Students list and both class dropdowns.
    pub(crate) fn render_students(&mut self) {
        self.view.render(render::students_list(&self.state));
        self.view.render(render::class_options(&self.state));
    }

    pub(crate) fn render_mark_form(&mut self) {
        let form = render::mark_attendance_form(&self.state);
        self.view.render(RenderInstruction::MarkAttendanceForm(form));
    }

    /// No-op until a summary selection exists.
    pub(crate) fn render_summary(&mut self) {
        if let Some(summary) = render::attendance_summary(&self.state) {
            self.view
                .render(RenderInstruction::AttendanceSummary(summary));
        }
    }

    pub(crate) fn render_notifications(&mut self) {
        self.view.render(render::notifications(&self.state));
    }

    pub(crate) fn render_events(&mut self) {
        self.view.render(render::events_list(&self.state));
    }

    pub(crate) fn render_badge(&mut self) {
        self.view.render(render::badge(&self.state));
    }

    pub(crate) fn render_event_form(&mut self) {
        self.view.render(render::event_form(&self.state));
    }

    pub(crate) fn notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.view.notify(Notice {
            kind,
            message: message.into(),
            duration_ms: self.config.notice_duration_ms,
        });
    }

    /// Surfaces `err` as an error notice and returns it.
    pub(crate) fn reject<T>(&mut self, operation: &str, err: SessionError) -> SessionResult<T> {
        warn!(
            "event={} module=session status=rejected error_code={}",
            operation,
            err.code()
        );
        self.notice(NoticeKind::Error, err.to_string());
        Err(err)
    }

    /// Maps a failed store write to a rejected operation.
    pub(crate) fn persisted<T>(
        &mut self,
        operation: &str,
        result: StoreResult<T>,
    ) -> SessionResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                error!(
                    "event={} module=session status=error error_code=store_write_failed error={}",
                    operation, err
                );
                self.reject(operation, SessionError::Store(err))
            }
        }
    }
}
