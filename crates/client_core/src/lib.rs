//! Session controller for the messenger front end.
//!
//! Validates credential input, drives the in-memory account registry, owns
//! the single active session, and sequences screen/auth-mode switches through
//! the timed transition protocol so the rendering layer can play exit effects
//! before a state change becomes visible.

use std::sync::Arc;

use async_trait::async_trait;
use registry::AccountRegistry;
use serde::Serialize;
use shared::{
    domain::{is_valid_username, normalize_username, Account, AuthMode, MainTab, Screen, Session},
    error::{AuthError, AuthFlow},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod avatar;
pub mod transition;

pub use avatar::{AvatarResolver, DicebearAvatarResolver};
pub use transition::{TransitionFamily, TransitionPhase};

use transition::TransitionGate;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Raw-length cap applied to the register username input while typing. Bounds
/// the field, not the 4-24 rule; that rule is enforced only at submission.
pub const REGISTER_USERNAME_RAW_CAP: usize = 25;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Outbound notifications for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TransitionStarted { family: TransitionFamily },
    ScreenChanged(Screen),
    AuthModeChanged(AuthMode),
    TabChanged(MainTab),
    SessionEstablished { username: String },
    ErrorRaised(String),
}

/// Point-in-time view of everything the rendering layer needs to pick
/// visuals: logical state plus the per-family transition phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiSnapshot {
    pub screen: Screen,
    pub auth_mode: AuthMode,
    pub active_tab: MainTab,
    pub search_active: bool,
    pub session: Option<Session>,
    pub error: Option<String>,
    pub screen_phase: TransitionPhase,
    pub auth_mode_phase: TransitionPhase,
}

struct ControllerState {
    registry: AccountRegistry,
    session: Option<Session>,
    screen: Screen,
    auth_mode: AuthMode,
    active_tab: MainTab,
    search_active: bool,
    error: Option<AuthError>,
    login_form: LoginForm,
    register_form: RegisterForm,
    screen_gate: TransitionGate,
    mode_gate: TransitionGate,
}

impl ControllerState {
    fn new(registry: AccountRegistry) -> Self {
        Self {
            registry,
            session: None,
            screen: Screen::Login,
            auth_mode: AuthMode::Login,
            active_tab: MainTab::Chats,
            search_active: false,
            error: None,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            screen_gate: TransitionGate::screen(),
            mode_gate: TransitionGate::auth_mode(),
        }
    }
}

pub struct SessionController {
    inner: Mutex<ControllerState>,
    avatars: Arc<dyn AvatarResolver>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionController {
    pub fn new() -> Arc<Self> {
        Self::with_avatar_resolver(Arc::new(DicebearAvatarResolver::default()))
    }

    pub fn with_avatar_resolver(avatars: Arc<dyn AvatarResolver>) -> Arc<Self> {
        Self::with_registry(AccountRegistry::new(), avatars)
    }

    /// Builds a controller over an explicit registry so callers and tests can
    /// seed isolated instances.
    pub fn with_registry(registry: AccountRegistry, avatars: Arc<dyn AvatarResolver>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            inner: Mutex::new(ControllerState::new(registry)),
            avatars,
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> UiSnapshot {
        let state = self.inner.lock().await;
        UiSnapshot {
            screen: state.screen,
            auth_mode: state.auth_mode,
            active_tab: state.active_tab,
            search_active: state.search_active,
            session: state.session.clone(),
            error: state.error.as_ref().map(|err| err.to_string()),
            screen_phase: state.screen_gate.phase(),
            auth_mode_phase: state.mode_gate.phase(),
        }
    }

    fn session_for(&self, account: &Account) -> Session {
        Session {
            username: account.username.clone(),
            email: account.email.clone(),
            avatar_ref: self.avatars.resolve(&account.username),
        }
    }

    fn run_login(
        &self,
        state: &ControllerState,
        username_input: &str,
        password_input: &str,
    ) -> Result<Session, AuthError> {
        if username_input.is_empty() || password_input.is_empty() {
            return Err(AuthError::MissingField);
        }
        let normalized = normalize_username(username_input);
        if !is_valid_username(&normalized) {
            return Err(AuthError::InvalidFormat {
                flow: AuthFlow::Login,
            });
        }
        let account = state
            .registry
            .verify(&normalized, password_input)
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(self.session_for(account))
    }

    fn run_register(
        &self,
        state: &mut ControllerState,
        email: &str,
        username_input: &str,
        password_input: &str,
    ) -> Result<Session, AuthError> {
        if email.is_empty() || username_input.is_empty() || password_input.is_empty() {
            return Err(AuthError::MissingField);
        }
        let normalized = normalize_username(username_input);
        if !is_valid_username(&normalized) {
            return Err(AuthError::InvalidFormat {
                flow: AuthFlow::Register,
            });
        }
        if state.registry.exists(&normalized) {
            return Err(AuthError::UsernameTaken);
        }
        let account = Account::new(normalized, email, password_input);
        let session = self.session_for(&account);
        // The exists() check above already excludes the only failure cause;
        // the conversion stays in case a conflicting writer ever appears.
        state.registry.register(account)?;
        info!(username = %session.username, "account registered");
        Ok(session)
    }

    fn report_failure(&self, state: &mut ControllerState, flow: &'static str, error: &AuthError) {
        warn!(flow, %error, "authentication attempt rejected");
        let _ = self.events.send(SessionEvent::ErrorRaised(error.to_string()));
        state.error = Some(error.clone());
    }
}

fn activate_session(
    controller: &Arc<SessionController>,
    state: &mut ControllerState,
    session: Session,
) {
    info!(username = %session.username, "session established");
    let _ = controller.events.send(SessionEvent::SessionEstablished {
        username: session.username.clone(),
    });
    state.session = Some(session);
    begin_screen_transition(controller, state, Screen::Main);
}

fn begin_screen_transition(
    controller: &Arc<SessionController>,
    state: &mut ControllerState,
    target: Screen,
) {
    if !state.screen_gate.begin() {
        debug!("screen transition already in flight; trigger ignored");
        return;
    }
    let window = state.screen_gate.window();
    let _ = controller.events.send(SessionEvent::TransitionStarted {
        family: TransitionFamily::Screen,
    });
    let controller = Arc::clone(controller);
    tokio::spawn(async move {
        tokio::time::sleep(window).await;
        let mut state = controller.inner.lock().await;
        state.screen = target;
        state.screen_gate.complete();
        info!(screen = ?target, "screen transition committed");
        let _ = controller.events.send(SessionEvent::ScreenChanged(target));
    });
}

/// Inbound surface consumed by the rendering layer. Implemented for
/// `Arc<SessionController>` so transition commits can be scheduled off the
/// calling task.
#[async_trait]
pub trait SessionFrontend: Send + Sync {
    async fn attempt_login(
        &self,
        username_input: &str,
        password_input: &str,
    ) -> Result<Session, AuthError>;
    async fn attempt_register(
        &self,
        email: &str,
        username_input: &str,
        password_input: &str,
    ) -> Result<Session, AuthError>;
    /// Submits the currently edited login form.
    async fn submit_login(&self) -> Result<Session, AuthError>;
    /// Submits the currently edited register form.
    async fn submit_register(&self) -> Result<Session, AuthError>;
    async fn switch_auth_mode(&self);
    async fn edit_login_username(&self, value: &str);
    async fn edit_login_password(&self, value: &str);
    async fn edit_register_email(&self, value: &str);
    async fn edit_register_username(&self, value: &str);
    async fn edit_register_password(&self, value: &str);
    async fn select_tab(&self, tab: MainTab);
    async fn toggle_search(&self) -> bool;
    async fn snapshot(&self) -> UiSnapshot;
    fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent>;
}

#[async_trait]
impl SessionFrontend for Arc<SessionController> {
    async fn attempt_login(
        &self,
        username_input: &str,
        password_input: &str,
    ) -> Result<Session, AuthError> {
        let mut state = self.inner.lock().await;
        state.error = None;
        match self.run_login(&state, username_input, password_input) {
            Ok(session) => {
                activate_session(self, &mut state, session.clone());
                Ok(session)
            }
            Err(error) => {
                self.report_failure(&mut state, "login", &error);
                Err(error)
            }
        }
    }

    async fn attempt_register(
        &self,
        email: &str,
        username_input: &str,
        password_input: &str,
    ) -> Result<Session, AuthError> {
        let mut state = self.inner.lock().await;
        state.error = None;
        match self.run_register(&mut state, email, username_input, password_input) {
            Ok(session) => {
                activate_session(self, &mut state, session.clone());
                Ok(session)
            }
            Err(error) => {
                self.report_failure(&mut state, "register", &error);
                Err(error)
            }
        }
    }

    async fn submit_login(&self) -> Result<Session, AuthError> {
        let form = self.inner.lock().await.login_form.clone();
        self.attempt_login(&form.username, &form.password).await
    }

    async fn submit_register(&self) -> Result<Session, AuthError> {
        let form = self.inner.lock().await.register_form.clone();
        self.attempt_register(&form.email, &form.username, &form.password)
            .await
    }

    async fn switch_auth_mode(&self) {
        let mut state = self.inner.lock().await;
        if !state.mode_gate.begin() {
            debug!("auth mode switch already in flight; trigger ignored");
            return;
        }
        // Error slot clears on the trigger, not after the window elapses.
        state.error = None;
        let window = state.mode_gate.window();
        let target = state.auth_mode.toggled();
        let _ = self.events.send(SessionEvent::TransitionStarted {
            family: TransitionFamily::AuthMode,
        });
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut state = controller.inner.lock().await;
            state.auth_mode = target;
            state.mode_gate.complete();
            debug!(mode = ?target, "auth mode switch committed");
            let _ = controller.events.send(SessionEvent::AuthModeChanged(target));
        });
    }

    async fn edit_login_username(&self, value: &str) {
        let mut state = self.inner.lock().await;
        state.error = None;
        state.login_form.username = value.to_string();
    }

    async fn edit_login_password(&self, value: &str) {
        let mut state = self.inner.lock().await;
        state.error = None;
        state.login_form.password = value.to_string();
    }

    async fn edit_register_email(&self, value: &str) {
        let mut state = self.inner.lock().await;
        state.error = None;
        state.register_form.email = value.to_string();
    }

    /// Input shaping, not validation: characters outside letters, digits and
    /// `@` are discarded, and an edit whose filtered value exceeds the raw
    /// cap is dropped whole, keeping the previous value. Never errors.
    async fn edit_register_username(&self, value: &str) {
        let mut state = self.inner.lock().await;
        state.error = None;
        let filtered: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '@')
            .collect();
        if filtered.len() <= REGISTER_USERNAME_RAW_CAP {
            state.register_form.username = filtered;
        } else {
            debug!("register username edit exceeds raw cap; edit dropped");
        }
    }

    async fn edit_register_password(&self, value: &str) {
        let mut state = self.inner.lock().await;
        state.error = None;
        state.register_form.password = value.to_string();
    }

    /// Tab switches have no timed phase; the change is visible immediately.
    async fn select_tab(&self, tab: MainTab) {
        let mut state = self.inner.lock().await;
        if state.active_tab != tab {
            state.active_tab = tab;
            let _ = self.events.send(SessionEvent::TabChanged(tab));
        }
    }

    async fn toggle_search(&self) -> bool {
        let mut state = self.inner.lock().await;
        state.search_active = !state.search_active;
        state.search_active
    }

    async fn snapshot(&self) -> UiSnapshot {
        SessionController::snapshot(self).await
    }

    fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        SessionController::subscribe_events(self)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
