//! Session Engine: the per-session extraction pipeline
//!
//! Composes classifier, registry, reconciler, and lifecycle monitor behind
//! one synchronous surface. All mutation for a session flows through
//! `&mut self`, which keeps chip mutations serialized per session. The
//! engine never blocks and never errors; it reports what happened as a
//! sequence of events and leaves delivery to the caller.

use std::time::Duration;

use tracing::{debug, info};

use crate::core::{Classifier, ChipRegistry, LifecycleAction, LifecycleMonitor, Reconciler};
use crate::types::{EngineEvent, LifecycleState, ProfileSnapshot, Role, Chip};

/// Per-session pipeline: classification → registration → reconciliation →
/// lifecycle.
#[derive(Debug)]
pub struct SessionEngine {
    classifier: Classifier,
    reconciler: Reconciler,
    registry: ChipRegistry,
    lifecycle: LifecycleMonitor,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEngine {
    /// Create engine with default lifecycle settings
    pub fn new() -> Self {
        Self::with_lifecycle(LifecycleMonitor::new())
    }

    /// Create engine with a custom lifecycle monitor (tests, alternative
    /// termination detectors)
    pub fn with_lifecycle(lifecycle: LifecycleMonitor) -> Self {
        Self {
            classifier: Classifier::new(),
            reconciler: Reconciler::new(),
            registry: ChipRegistry::new(),
            lifecycle,
        }
    }

    /// Process one finalized utterance to completion.
    ///
    /// Returns chip events (Created then Updated) followed by an Ending
    /// event when the agent signed off. Input after CLOSED is ignored.
    pub fn on_utterance(&mut self, speaker: Role, text: &str) -> Vec<EngineEvent> {
        if self.lifecycle.is_closed() {
            debug!(%speaker, "utterance ignored, session closed");
            return Vec::new();
        }

        let mut events = Vec::new();

        for detection in self.classifier.classify(text, speaker) {
            if let Some(event) = self.registry.register(&detection) {
                info!(
                    category = %event.chip.category,
                    label = %event.chip.label,
                    "chip created"
                );
                events.push(EngineEvent::Chip(event));
            }
        }

        if speaker == Role::Agent {
            for boost in self.reconciler.reconcile(text) {
                if let Some(event) =
                    self.registry
                        .boost(&boost.fragment, boost.category, boost.delta)
                {
                    debug!(
                        label = %event.chip.label,
                        confidence = event.chip.confidence,
                        "chip confirmed"
                    );
                    events.push(EngineEvent::Chip(event));
                }
            }

            if let LifecycleAction::ScheduleClose { .. } =
                self.lifecycle.note_agent_utterance(text)
            {
                info!("sign-off detected, session ending");
                events.push(EngineEvent::Ending);
            }
        }

        events
    }

    /// The grace delay elapsed; returns the at-most-once Closed event
    pub fn grace_elapsed(&mut self) -> Option<EngineEvent> {
        match self.lifecycle.grace_elapsed() {
            LifecycleAction::SignalClose => Some(EngineEvent::Closed),
            _ => None,
        }
    }

    /// Peer left the conversation; close immediately
    pub fn on_peer_departure(&mut self) -> Option<EngineEvent> {
        self.forced_close("peer departure")
    }

    /// Explicit cancel from the orchestration layer; close immediately
    pub fn on_force_cancel(&mut self) -> Option<EngineEvent> {
        self.forced_close("forced cancel")
    }

    fn forced_close(&mut self, cause: &str) -> Option<EngineEvent> {
        match self.lifecycle.force_close() {
            LifecycleAction::SignalClose => {
                info!(cause, "session closed");
                Some(EngineEvent::Closed)
            }
            _ => None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Configured grace delay
    pub fn grace(&self) -> Duration {
        self.lifecycle.grace()
    }

    /// Chips registered so far, in insertion order
    pub fn chips(&self) -> &[Chip] {
        self.registry.chips()
    }

    /// Grouped profile of everything extracted so far
    pub fn snapshot(&self) -> ProfileSnapshot {
        self.registry.snapshot()
    }
}

// =============================================================================
// TESTS
// =============================================================================
