//! Session lifecycle state definitions

use serde::{Deserialize, Serialize};

/// The three lifecycle states of a session.
///
/// Transitions are one-directional: ACTIVE → ENDING → CLOSED, with a forced
/// shortcut straight to CLOSED. There is no way back from CLOSED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Conversation in progress
    Active,
    /// Sign-off detected, waiting out the grace delay
    Ending,
    /// Terminal; all further input is ignored
    Closed,
}

impl LifecycleState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            LifecycleState::Active => "\x1b[32m", // Green
            LifecycleState::Ending => "\x1b[33m", // Yellow
            LifecycleState::Closed => "\x1b[90m", // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            LifecycleState::Active => "🎙",
            LifecycleState::Ending => "👋",
            LifecycleState::Closed => "🔚",
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleState::Active => "ACTIVE",
            LifecycleState::Ending => "ENDING",
            LifecycleState::Closed => "CLOSED",
        };
        write!(f, "{}", name)
    }
}
