use std::time::Duration;

use super::*;

#[test]
fn gate_starts_idle() {
    let gate = TransitionGate::screen();
    assert_eq!(gate.phase(), TransitionPhase::Idle);
    assert!(!gate.is_transitioning());
}

#[test]
fn begin_enters_transitioning() {
    let mut gate = TransitionGate::auth_mode();
    assert!(gate.begin());
    assert_eq!(gate.phase(), TransitionPhase::Transitioning);
}

#[test]
fn begin_rejects_reentrant_trigger() {
    let mut gate = TransitionGate::screen();
    assert!(gate.begin());
    assert!(!gate.begin());
    assert!(gate.is_transitioning());
}

#[test]
fn complete_returns_to_idle_and_allows_next_trigger() {
    let mut gate = TransitionGate::screen();
    assert!(gate.begin());
    gate.complete();
    assert_eq!(gate.phase(), TransitionPhase::Idle);
    assert!(gate.begin());
}

#[test]
fn family_windows_are_protocol_constants() {
    let screen = TransitionGate::screen();
    let mode = TransitionGate::auth_mode();
    assert_eq!(screen.family(), TransitionFamily::Screen);
    assert_eq!(mode.family(), TransitionFamily::AuthMode);
    assert_eq!(screen.window(), Duration::from_millis(300));
    assert_eq!(mode.window(), Duration::from_millis(200));
    assert!(mode.window() < screen.window());
}
