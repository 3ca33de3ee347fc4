//! Session Lifecycle Monitor: ACTIVE → ENDING → CLOSED
//!
//! Watches completed agent utterances for the sign-off, then hands the
//! caller a grace delay to schedule the close. A forced close (peer
//! departure, explicit cancel) jumps straight to CLOSED from either live
//! state. The close signal fires exactly once no matter how many
//! close-triggering events race in afterwards.

use std::time::Duration;

use crate::types::LifecycleState;
use crate::{GRACE_DELAY_MS, TERMINATION_MARKER};

/// Predicate over a completed agent utterance deciding whether the
/// conversation is over. Pluggable so a structured end-of-conversation
/// signal can replace string matching without touching the state machine.
pub type EndPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Default detector: case-insensitive containment of the sign-off phrase
pub fn marker_predicate(marker: &str) -> EndPredicate {
    let marker = marker.to_lowercase();
    Box::new(move |text: &str| text.to_lowercase().contains(&marker))
}

/// What the monitor wants the caller to do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Nothing changed
    None,
    /// Sign-off detected; schedule a close after `grace`
    ScheduleClose { grace: Duration },
    /// The session just reached CLOSED; fire the termination callback
    SignalClose,
}

/// Per-session lifecycle state machine
pub struct LifecycleMonitor {
    state: LifecycleState,
    grace: Duration,
    detector: EndPredicate,
    close_signaled: bool,
}

impl std::fmt::Debug for LifecycleMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleMonitor")
            .field("state", &self.state)
            .field("grace", &self.grace)
            .field("close_signaled", &self.close_signaled)
            .finish()
    }
}

impl Default for LifecycleMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleMonitor {
    /// Create monitor with the default sign-off marker and grace delay
    pub fn new() -> Self {
        Self::with_predicate(
            marker_predicate(TERMINATION_MARKER),
            Duration::from_millis(GRACE_DELAY_MS),
        )
    }

    /// Create monitor with a custom grace delay (default marker)
    pub fn with_grace(grace: Duration) -> Self {
        Self::with_predicate(marker_predicate(TERMINATION_MARKER), grace)
    }

    /// Create monitor with a custom termination predicate and grace delay
    pub fn with_predicate(detector: EndPredicate, grace: Duration) -> Self {
        Self {
            state: LifecycleState::Active,
            grace,
            detector,
            close_signaled: false,
        }
    }

    /// Feed one completed agent utterance
    pub fn note_agent_utterance(&mut self, text: &str) -> LifecycleAction {
        if self.state != LifecycleState::Active {
            return LifecycleAction::None;
        }
        if (self.detector)(text) {
            self.state = LifecycleState::Ending;
            return LifecycleAction::ScheduleClose { grace: self.grace };
        }
        LifecycleAction::None
    }

    /// The scheduled grace delay elapsed. Safe to call even if a forced
    /// close already landed; the signal fires at most once.
    pub fn grace_elapsed(&mut self) -> LifecycleAction {
        match self.state {
            LifecycleState::Ending => self.close(),
            LifecycleState::Active | LifecycleState::Closed => LifecycleAction::None,
        }
    }

    /// Forced close: peer departure or explicit cancel. Bypasses the grace
    /// delay and works from ACTIVE as well as ENDING.
    pub fn force_close(&mut self) -> LifecycleAction {
        match self.state {
            LifecycleState::Active | LifecycleState::Ending => self.close(),
            LifecycleState::Closed => LifecycleAction::None,
        }
    }

    fn close(&mut self) -> LifecycleAction {
        self.state = LifecycleState::Closed;
        if self.close_signaled {
            return LifecycleAction::None;
        }
        self.close_signaled = true;
        LifecycleAction::SignalClose
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Configured grace delay
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// True once the session has reached CLOSED
    pub fn is_closed(&self) -> bool {
        self.state == LifecycleState::Closed
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_active() {
        let monitor = LifecycleMonitor::new();
        assert_eq!(monitor.state(), LifecycleState::Active);
        assert!(!monitor.is_closed());
    }

    #[test]
    fn test_plain_utterance_keeps_active() {
        let mut monitor = LifecycleMonitor::new();
        let action = monitor.note_agent_utterance("Tell me about your weekends.");
        assert_eq!(action, LifecycleAction::None);
        assert_eq!(monitor.state(), LifecycleState::Active);
    }

    #[test]
    fn test_sign_off_schedules_close() {
        let mut monitor = LifecycleMonitor::new();
        let action = monitor
            .note_agent_utterance("I'll start working on some matches. Talk soon.");

        assert_eq!(
            action,
            LifecycleAction::ScheduleClose {
                grace: Duration::from_millis(GRACE_DELAY_MS)
            }
        );
        assert_eq!(monitor.state(), LifecycleState::Ending);
    }

    #[test]
    fn test_sign_off_detection_is_case_insensitive() {
        let mut monitor = LifecycleMonitor::new();
        let action = monitor.note_agent_utterance("TALK SOON.");
        assert!(matches!(action, LifecycleAction::ScheduleClose { .. }));
    }

    #[test]
    fn test_grace_elapsed_closes_from_ending() {
        let mut monitor = LifecycleMonitor::new();
        monitor.note_agent_utterance("Talk soon.");

        assert_eq!(monitor.grace_elapsed(), LifecycleAction::SignalClose);
        assert_eq!(monitor.state(), LifecycleState::Closed);
    }

    #[test]
    fn test_grace_elapsed_is_noop_while_active() {
        let mut monitor = LifecycleMonitor::new();
        assert_eq!(monitor.grace_elapsed(), LifecycleAction::None);
        assert_eq!(monitor.state(), LifecycleState::Active);
    }

    #[test]
    fn test_force_close_from_active() {
        let mut monitor = LifecycleMonitor::new();
        assert_eq!(monitor.force_close(), LifecycleAction::SignalClose);
        assert_eq!(monitor.state(), LifecycleState::Closed);
    }

    #[test]
    fn test_close_signal_fires_exactly_once() {
        let mut monitor = LifecycleMonitor::new();
        monitor.note_agent_utterance("Talk soon.");

        // Forced close races the grace timer and wins.
        assert_eq!(monitor.force_close(), LifecycleAction::SignalClose);
        // The timer fires afterwards anyway; must be a no-op.
        assert_eq!(monitor.grace_elapsed(), LifecycleAction::None);
        assert_eq!(monitor.force_close(), LifecycleAction::None);
        assert_eq!(monitor.state(), LifecycleState::Closed);
    }

    #[test]
    fn test_closed_ignores_further_utterances() {
        let mut monitor = LifecycleMonitor::new();
        monitor.force_close();

        let action = monitor.note_agent_utterance("Talk soon.");
        assert_eq!(action, LifecycleAction::None);
        assert_eq!(monitor.state(), LifecycleState::Closed);
    }

    #[test]
    fn test_second_sign_off_while_ending_does_not_reschedule() {
        let mut monitor = LifecycleMonitor::new();
        assert!(matches!(
            monitor.note_agent_utterance("Talk soon."),
            LifecycleAction::ScheduleClose { .. }
        ));
        assert_eq!(
            monitor.note_agent_utterance("Talk soon!"),
            LifecycleAction::None
        );
    }

    #[test]
    fn test_custom_predicate_replaces_marker() {
        let mut monitor = LifecycleMonitor::with_predicate(
            Box::new(|text| text.contains("<end>")),
            Duration::from_millis(50),
        );

        assert_eq!(
            monitor.note_agent_utterance("Talk soon."),
            LifecycleAction::None
        );
        assert!(matches!(
            monitor.note_agent_utterance("goodbye <end>"),
            LifecycleAction::ScheduleClose { .. }
        ));
    }
}
