//! Outbound event structures
//!
//! `ChipEvent` and `EngineEvent` are what the session engine hands back to
//! its caller; `ClientMessage` is the wire shape delivered to the client UI.

use serde::{Deserialize, Serialize};

use crate::types::Chip;

/// What happened to a chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipEventKind {
    /// A new chip was registered
    Created,
    /// An existing chip's confidence was raised
    Updated,
}

/// A chip-level event produced by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipEvent {
    pub kind: ChipEventKind,
    pub chip: Chip,
}

impl ChipEvent {
    pub fn created(chip: Chip) -> Self {
        Self {
            kind: ChipEventKind::Created,
            chip,
        }
    }

    pub fn updated(chip: Chip) -> Self {
        Self {
            kind: ChipEventKind::Updated,
            chip,
        }
    }
}

/// Everything the session engine can report after processing an input
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A chip was created or updated
    Chip(ChipEvent),
    /// The agent signed off; a close should be scheduled after the grace delay
    Ending,
    /// The session reached CLOSED; fired exactly once per session
    Closed,
}

/// Structured message delivered to the client UI.
///
/// Chip payload shape: `{"type":"CHIP","payload":{"id":...,"category":...,
/// "label":...,"emoji":...,"confidence":...}}`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    #[serde(rename = "CHIP")]
    Chip(ChipPayload),
    #[serde(rename = "SESSION_CLOSING")]
    SessionClosing { session_id: String },
}

/// Wire payload for a chip event
#[derive(Debug, Clone, Serialize)]
pub struct ChipPayload {
    pub id: String,
    pub category: String,
    pub label: String,
    pub emoji: String,
    pub confidence: f64,
}

impl From<&Chip> for ChipPayload {
    fn from(chip: &Chip) -> Self {
        Self {
            id: chip.id.clone(),
            category: chip.category.to_string(),
            label: chip.label.clone(),
            emoji: chip.emoji.clone(),
            confidence: chip.confidence,
        }
    }
}

impl ClientMessage {
    /// Wrap a chip event for delivery
    pub fn chip(event: &ChipEvent) -> Self {
        ClientMessage::Chip(ChipPayload::from(&event.chip))
    }

    /// Session-closing notification
    pub fn session_closing(session_id: impl Into<String>) -> Self {
        ClientMessage::SessionClosing {
            session_id: session_id.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
