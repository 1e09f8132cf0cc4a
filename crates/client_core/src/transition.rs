//! Two-phase transition protocol for screen and auth-mode switches.
//!
//! A trigger first moves the gate into `Transitioning` (the signal for the
//! rendering layer to play its exit effect); the underlying state change is
//! committed only after the gate's fixed window has elapsed, at which point
//! the gate returns to `Idle`. At most one transition per family is in
//! flight; triggering a gate that is already `Transitioning` is a no-op.

use std::time::Duration;

use serde::Serialize;

/// Delay between the auth-success signal and the switch to the main screen.
pub const SCREEN_TRANSITION_WINDOW: Duration = Duration::from_millis(300);
/// Delay between a login/register mode-switch trigger and the mode flip.
pub const AUTH_MODE_TRANSITION_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    Idle,
    Transitioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionFamily {
    Screen,
    AuthMode,
}

#[derive(Debug)]
pub struct TransitionGate {
    family: TransitionFamily,
    window: Duration,
    phase: TransitionPhase,
}

impl TransitionGate {
    pub fn new(family: TransitionFamily, window: Duration) -> Self {
        Self {
            family,
            window,
            phase: TransitionPhase::Idle,
        }
    }

    pub fn screen() -> Self {
        Self::new(TransitionFamily::Screen, SCREEN_TRANSITION_WINDOW)
    }

    pub fn auth_mode() -> Self {
        Self::new(TransitionFamily::AuthMode, AUTH_MODE_TRANSITION_WINDOW)
    }

    pub fn family(&self) -> TransitionFamily {
        self.family
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == TransitionPhase::Transitioning
    }

    /// Enters `Transitioning`. Returns `false` when a transition of this
    /// family is already in flight, in which case the trigger must be
    /// ignored and no second commit scheduled.
    pub fn begin(&mut self) -> bool {
        if self.is_transitioning() {
            return false;
        }
        self.phase = TransitionPhase::Transitioning;
        true
    }

    /// Returns the gate to `Idle` once the window has elapsed and the
    /// underlying state change has been committed.
    pub fn complete(&mut self) {
        self.phase = TransitionPhase::Idle;
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
