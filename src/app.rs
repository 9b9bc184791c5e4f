use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::engine::progression::{self, Progression, ToastKind};
use crate::error::{Error, ValidationError};
use crate::event::{AppEvent, StoreEvent};
use crate::generator::challenge::{self, Challenge};
use crate::generator::lesson::{
    Lesson, LessonGenerator, LevelDescriptor, MAX_LEVEL, visible_levels,
};
use crate::generator::words::TIPS;
use crate::session::input::KeyInput;
use crate::session::result::SessionResult;
use crate::session::typing::{KeyOutcome, SessionPhase, TypingSession};
use crate::store::Backend;
use crate::store::schema::{AuthSession, Post, ProfileUpdate, ReactionKind, UserProfile};
use crate::store::subscription::Subscription;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub const MAX_POST_CHARS: usize = 280;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Loading,
    Auth,
    Hub,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Hub,
    Levels,
    Lessons,
    Typing,
    Posts,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Hub, Tab::Levels, Tab::Lessons, Tab::Typing, Tab::Posts];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Hub => "Hub",
            Tab::Levels => "Levels",
            Tab::Lessons => "Lessons",
            Tab::Typing => "Typing",
            Tab::Posts => "Posts",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Fields of the login/registration form. `focus` walks email, password,
/// username, then one answer per challenge.
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: LineInput,
    pub password: LineInput,
    pub username: LineInput,
    pub challenges: Vec<Challenge>,
    pub answers: Vec<LineInput>,
    pub focus: usize,
}

impl AuthForm {
    fn new(challenges: Vec<Challenge>) -> Self {
        let answers = challenges.iter().map(|_| LineInput::new("")).collect();
        Self {
            mode: AuthMode::Login,
            email: LineInput::new(""),
            password: LineInput::masked(),
            username: LineInput::new("").with_max_chars(24),
            challenges,
            answers,
            focus: 0,
        }
    }

    pub fn field_count(&self) -> usize {
        match self.mode {
            AuthMode::Login => 2,
            AuthMode::Register => 3 + self.answers.len(),
        }
    }

    pub fn focused_mut(&mut self) -> &mut LineInput {
        match self.focus {
            0 => &mut self.email,
            1 => &mut self.password,
            2 => &mut self.username,
            n => {
                let idx = (n - 3).min(self.answers.len().saturating_sub(1));
                match self.answers.get_mut(idx) {
                    Some(answer) => answer,
                    None => &mut self.email,
                }
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    fn reset_challenges(&mut self, challenges: Vec<Challenge>) {
        self.answers = challenges.iter().map(|_| LineInput::new("")).collect();
        self.challenges = challenges;
        if self.focus >= self.field_count() {
            self.focus = 0;
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub tab: Tab,
    pub auth: AuthForm,
    pub session: Option<AuthSession>,
    pub profile: Option<UserProfile>,
    pub posts: Vec<Post>,
    pub typing: TypingSession,
    pub lesson: Option<Lesson>,
    pub lesson_preview: Option<Lesson>,
    pub last_result: Option<SessionResult>,
    pub last_progression: Option<Progression>,
    pub toasts: Vec<Toast>,
    pub level_cursor: usize,
    pub post_cursor: usize,
    pub composer: LineInput,
    pub composing: bool,
    pub theme: &'static Theme,
    pub config: Config,
    pub tip: &'static str,
    pub should_quit: bool,
    /// Level to open once the first profile arrives.
    pub pending_level: Option<u32>,
    return_to_levels_at: Option<Instant>,
    backend: Box<dyn Backend>,
    events: Sender<AppEvent>,
    auth_sub: Option<Subscription>,
    profile_sub: Option<Subscription>,
    posts_sub: Option<Subscription>,
    generator: LessonGenerator<SmallRng>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        theme: &'static Theme,
        backend: Box<dyn Backend>,
        events: Sender<AppEvent>,
        mut rng: SmallRng,
    ) -> Self {
        let generator = LessonGenerator::new(SmallRng::seed_from_u64(rng.next_u64()));
        let tip = TIPS[rng.gen_range(0..TIPS.len())];
        let challenges = challenge::generate_set(&mut rng);

        let mut app = Self {
            screen: AppScreen::Loading,
            tab: Tab::Hub,
            auth: AuthForm::new(challenges),
            session: None,
            profile: None,
            posts: Vec::new(),
            typing: TypingSession::default(),
            lesson: None,
            lesson_preview: None,
            last_result: None,
            last_progression: None,
            toasts: Vec::new(),
            level_cursor: 0,
            post_cursor: 0,
            composer: LineInput::new("").with_max_chars(MAX_POST_CHARS),
            composing: false,
            theme,
            config,
            tip,
            should_quit: false,
            pending_level: None,
            return_to_levels_at: None,
            backend,
            events,
            auth_sub: None,
            profile_sub: None,
            posts_sub: None,
            generator,
            rng,
        };

        let tx = app.events.clone();
        app.auth_sub = Some(app.backend.on_auth_state_change(Box::new(move |session| {
            let _ = tx.send(AppEvent::Store(StoreEvent::Auth(session.clone())));
        })));
        app
    }

    // ---- toasts ----

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        let secs = self.config.toast_secs;
        self.notify_for(message, kind, Duration::from_secs(secs));
    }

    pub fn notify_for(&mut self, message: impl Into<String>, kind: ToastKind, ttl: Duration) {
        let message = message.into();
        debug!(?kind, %message, "toast");
        self.toasts.push(Toast {
            message,
            kind,
            expires_at: Instant::now() + ttl,
        });
    }

    fn notify_error(&mut self, context: &str, err: impl Into<Error>) {
        let err = err.into();
        error!(%err, "{context}");
        self.notify(format!("{context}: {err}"), ToastKind::Error);
    }

    // ---- store events ----

    pub fn apply_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Auth(session) => self.handle_auth_state(session),
            StoreEvent::Profile(profile) => {
                debug!(level = profile.level, wpm = profile.wpm, "profile changed");
                self.profile = Some(profile);
                if self.screen == AppScreen::Loading && self.session.is_some() {
                    self.screen = AppScreen::Hub;
                    if let Some(level) = self.pending_level.take() {
                        self.start_level(level);
                    }
                }
                self.clamp_level_cursor();
            }
            StoreEvent::Posts(mut posts) => {
                posts.truncate(self.config.feed_limit);
                self.posts = posts;
                if self.post_cursor >= self.posts.len() {
                    self.post_cursor = self.posts.len().saturating_sub(1);
                }
            }
        }
    }

    pub fn handle_auth_state(&mut self, session: Option<AuthSession>) {
        let Some(session) = session else {
            if self.session.take().is_some() {
                info!("session ended");
            }
            self.profile_sub = None;
            self.posts_sub = None;
            self.profile = None;
            self.posts.clear();
            self.typing = TypingSession::default();
            self.lesson = None;
            self.lesson_preview = None;
            self.last_result = None;
            self.last_progression = None;
            self.return_to_levels_at = None;
            self.tab = Tab::Hub;
            self.screen = AppScreen::Auth;
            return;
        };

        let same_account = self
            .session
            .as_ref()
            .is_some_and(|s| s.account_id == session.account_id);
        if same_account && self.profile_sub.is_some() {
            return;
        }

        info!(account = %session.account_id, "session started");
        let account = session.account_id.clone();
        self.session = Some(session);
        self.profile = None;
        self.screen = AppScreen::Loading;

        if self.backend.read_profile(&account).is_err() {
            let defaults = UserProfile::new(&self.random_username());
            if let Err(e) = self.backend.initialize_profile(&account, defaults) {
                self.notify_error("Error initializing user data", e);
            }
        }
        let login_stamp = ProfileUpdate {
            last_login: Some(chrono::Utc::now()),
            ..Default::default()
        };
        if let Err(e) = self.backend.write_profile(&account, &login_stamp) {
            warn!(error = %e, "could not record login time");
        }

        // Replacing the handle releases the previous account's listener.
        let tx = self.events.clone();
        self.profile_sub = Some(self.backend.subscribe_profile(
            &account,
            Box::new(move |profile| {
                let _ = tx.send(AppEvent::Store(StoreEvent::Profile(profile.clone())));
            }),
        ));
        if self.posts_sub.is_none() {
            let tx = self.events.clone();
            self.posts_sub = Some(self.backend.subscribe_posts(Box::new(move |posts| {
                let _ = tx.send(AppEvent::Store(StoreEvent::Posts(posts.clone())));
            })));
        }
    }

    fn random_username(&mut self) -> String {
        format!("user{}", self.rng.gen_range(1000..10000))
    }

    // ---- auth ----

    pub fn set_auth_mode(&mut self, mode: AuthMode) {
        self.auth.mode = mode;
        self.auth.focus = 0;
    }

    pub fn submit_login(&mut self) {
        let email = self.auth.email.value().trim().to_string();
        let password = self.auth.password.value().to_string();
        if email.is_empty() {
            self.notify_error("Login failed", ValidationError::MissingField("email"));
            return;
        }
        if password.is_empty() {
            self.notify_error("Login failed", ValidationError::MissingField("password"));
            return;
        }

        match self.backend.login(&email, &password) {
            Ok(_) => {
                self.auth.password.clear();
                self.notify("Welcome back!", ToastKind::Success);
            }
            Err(e) => self.notify_error("Login failed", e),
        }
    }

    pub fn submit_register(&mut self) {
        let email = self.auth.email.value().trim().to_string();
        let password = self.auth.password.value().to_string();
        if email.is_empty() {
            self.notify_error("Registration failed", ValidationError::MissingField("email"));
            return;
        }
        if password.is_empty() {
            self.notify_error(
                "Registration failed",
                ValidationError::MissingField("password"),
            );
            return;
        }

        let answers: Vec<&str> = self.auth.answers.iter().map(LineInput::value).collect();
        if challenge::verify_all(&self.auth.challenges, &answers).is_err() {
            warn!("registration challenge failed");
            let fresh = challenge::generate_set(&mut self.rng);
            self.auth.reset_challenges(fresh);
            self.notify("Please complete all captchas correctly", ToastKind::Warning);
            return;
        }

        let username = match self.auth.username.value().trim() {
            "" => self.random_username(),
            name => name.to_string(),
        };

        match self.backend.register(&email, &password, &username) {
            Ok(account) => {
                if let Err(e) = self
                    .backend
                    .initialize_profile(&account, UserProfile::new(&username))
                {
                    self.notify_error("Error initializing user data", e);
                }
                self.auth.password.clear();
                let fresh = challenge::generate_set(&mut self.rng);
                self.auth.reset_challenges(fresh);
                self.notify(format!("Welcome, {username}!"), ToastKind::Success);
            }
            Err(e) => self.notify_error("Registration failed", e),
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.backend.logout() {
            self.notify_error("Logout failed", e);
        }
    }

    // ---- navigation ----

    pub fn select_tab(&mut self, tab: Tab) {
        if self.screen != AppScreen::Hub {
            return;
        }
        self.tab = tab;
        self.composing = false;
        self.return_to_levels_at = None;
        if tab == Tab::Typing && self.lesson.is_none() {
            let level = self.profile_level();
            self.start_level(level);
        }
    }

    pub fn profile_level(&self) -> u32 {
        self.profile.as_ref().map_or(1, |p| p.level.max(1))
    }

    pub fn visible_levels(&self) -> Vec<LevelDescriptor> {
        visible_levels(self.profile_level(), self.config.level_window)
    }

    pub fn move_level_cursor(&mut self, delta: isize) {
        let count = self.visible_levels().len();
        if count == 0 {
            return;
        }
        let next = self.level_cursor as isize + delta;
        self.level_cursor = next.clamp(0, count as isize - 1) as usize;
    }

    fn clamp_level_cursor(&mut self) {
        let count = self.visible_levels().len();
        if self.level_cursor >= count {
            self.level_cursor = count.saturating_sub(1);
        }
    }

    pub fn selected_level(&self) -> Option<LevelDescriptor> {
        self.visible_levels().get(self.level_cursor).copied()
    }

    // ---- typing ----

    /// Refuses locked levels. Returns whether a session started.
    pub fn start_level(&mut self, level: u32) -> bool {
        let level = level.clamp(1, MAX_LEVEL);
        let lesson = self.generator.generate(level);
        self.start_lesson(lesson)
    }

    fn start_lesson(&mut self, lesson: Lesson) -> bool {
        let descriptor = LevelDescriptor::new(lesson.level);
        if !descriptor.is_unlocked(self.profile_level()) {
            let message = format!(
                "Level {} is locked. Reach level {} first.",
                descriptor.id, descriptor.required_level
            );
            self.notify(message, ToastKind::Warning);
            return false;
        }
        info!(level = lesson.level, target_wpm = lesson.target_wpm, "level started");
        self.typing.start(&lesson);
        self.lesson = Some(lesson);
        self.last_result = None;
        self.last_progression = None;
        self.return_to_levels_at = None;
        self.tab = Tab::Typing;
        true
    }

    pub fn restart_level(&mut self) {
        let level = self
            .lesson
            .as_ref()
            .map_or_else(|| self.profile_level(), |l| l.level);
        self.start_level(level);
    }

    /// Draws the lesson shown on the Lessons tab.
    pub fn preview_lesson(&mut self, level: u32) {
        let descriptor = LevelDescriptor::new(level);
        if !descriptor.is_unlocked(self.profile_level()) {
            self.notify(format!("Level {} is locked.", descriptor.id), ToastKind::Warning);
            return;
        }
        self.lesson_preview = Some(self.generator.generate(descriptor.id));
    }

    pub fn start_previewed_lesson(&mut self) -> bool {
        match self.lesson_preview.take() {
            Some(lesson) => self.start_lesson(lesson),
            None => false,
        }
    }

    pub fn type_key(&mut self, key: KeyEvent) {
        self.type_input(KeyInput::from(key), Instant::now());
    }

    pub fn type_input(&mut self, key: KeyInput, now: Instant) {
        if let KeyOutcome::Completed(result) = self.typing.on_key_at(key, now) {
            self.finish_level(result);
        }
    }

    fn finish_level(&mut self, result: SessionResult) {
        let Some(profile) = self.profile.clone() else {
            warn!(level = result.level, "level finished without a profile");
            self.notify(
                "Result not saved: your profile is not loaded yet. Press r to retry.",
                ToastKind::Error,
            );
            self.last_result = Some(result);
            return;
        };
        let verdict = progression::evaluate(&profile, &result);
        info!(
            level = result.level,
            wpm = result.wpm,
            accuracy = result.accuracy,
            passed = verdict.passed,
            "level finished"
        );

        if let (Some(update), Some(session)) = (&verdict.update, &self.session) {
            let account = session.account_id.clone();
            if let Err(e) = self.backend.write_profile(&account, update) {
                self.notify_error("Error updating user data", e);
            }
        }

        let ttl = Duration::from_secs(self.config.result_toast_secs);
        self.notify_for(verdict.message.clone(), verdict.kind, ttl);
        self.return_to_levels_at = Some(Instant::now() + ttl);
        self.last_result = Some(result);
        self.last_progression = Some(verdict);
    }

    pub fn tick(&mut self, now: Instant) {
        self.typing.tick(now);
        self.toasts.retain(|t| t.expires_at > now);
        if let Some(at) = self.return_to_levels_at {
            if now >= at {
                self.return_to_levels_at = None;
                if self.tab == Tab::Typing && self.typing.phase() == SessionPhase::Finished {
                    self.tab = Tab::Levels;
                }
            }
        }
    }

    // ---- posts ----

    pub fn submit_post(&mut self) {
        let Some(session) = self.session.clone() else {
            self.notify("Please log in to post.", ToastKind::Warning);
            return;
        };
        let content = self.composer.value().trim().to_string();
        if content.is_empty() {
            warn!(error = %ValidationError::EmptyPost, "post rejected");
            self.notify("Post content cannot be empty.", ToastKind::Warning);
            return;
        }
        let author = self
            .profile
            .as_ref()
            .map_or_else(|| "Anonymous".to_string(), |p| p.username.clone());

        match self
            .backend
            .create_post(&session.account_id, &author, &content)
        {
            Ok(_) => {
                self.composer.clear();
                self.composing = false;
                self.post_cursor = 0;
                self.notify("Post submitted successfully!", ToastKind::Success);
            }
            Err(e) => self.notify_error("Error submitting post", e),
        }
    }

    pub fn react(&mut self, kind: ReactionKind) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let Some(post) = self.posts.get(self.post_cursor) else {
            return;
        };
        let post_id = post.id.clone();
        if let Err(e) = self
            .backend
            .toggle_reaction(&post_id, kind, &session.account_id)
        {
            self.notify_error("Error updating reaction", e);
        }
    }

    pub fn move_post_cursor(&mut self, delta: isize) {
        if self.posts.is_empty() {
            return;
        }
        let next = self.post_cursor as isize + delta;
        self.post_cursor = next.clamp(0, self.posts.len() as isize - 1) as usize;
    }
}
