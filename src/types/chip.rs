//! Chip and detection structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Role, TraitCategory};
use crate::{CONFIDENCE_INITIAL, CONFIDENCE_MAX};

/// Whether a detection was backed by a qualifying-context phrase or only a
/// bare trigger term. Both are accepted; a bare trigger is sufficient
/// evidence by design (recall over precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    /// Trigger phrase alone
    Bare,
    /// Trigger phrase plus a qualifying-context phrase
    Qualified,
}

/// A transient candidate trait match produced by classification.
///
/// Not persisted; it either becomes a chip in the registry or is dropped as
/// a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Category the trigger rule belongs to
    pub category: TraitCategory,
    /// Canonical label from the trigger rule (e.g. "Smoking")
    pub label: String,
    /// Emoji hint from the trigger rule
    pub emoji: String,
    /// Who said it
    pub speaker: Role,
    /// The normalized utterance that triggered the match
    pub source: String,
    /// Bare trigger vs trigger + qualifier
    pub strength: MatchStrength,
}

/// A discrete, UI-displayable unit of extracted intelligence.
///
/// At most one chip exists per (category, normalized label) pair within a
/// session. Chips are never deleted while a session lives; only their
/// confidence moves, and only upward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chip {
    /// Unique id
    pub id: String,
    /// Trait category
    pub category: TraitCategory,
    /// Display label (e.g. "Family", "No Smoking")
    pub label: String,
    /// Emoji hint for the UI
    pub emoji: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Insertion order within the session (0-based)
    pub order: usize,
    /// When this chip was created
    pub created_at: DateTime<Utc>,
}

impl Chip {
    /// Create a new chip from a detection at initial confidence
    pub fn from_detection(detection: &Detection, order: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category: detection.category,
            label: detection.label.clone(),
            emoji: detection.emoji.clone(),
            confidence: CONFIDENCE_INITIAL,
            order,
            created_at: Utc::now(),
        }
    }

    /// Raise confidence by `delta`, clamped to the allowed range
    pub fn raise_confidence(&mut self, delta: f64) {
        self.confidence = (self.confidence + delta).clamp(0.0, CONFIDENCE_MAX);
    }

    /// Case-insensitive label comparison key
    pub fn label_key(&self) -> String {
        self.label.to_lowercase()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(label: &str) -> Detection {
        Detection {
            category: TraitCategory::Dealbreaker,
            label: label.to_string(),
            emoji: "🚭".to_string(),
            speaker: Role::User,
            source: "i can't stand smoking".to_string(),
            strength: MatchStrength::Qualified,
        }
    }

    #[test]
    fn test_new_chip_starts_at_full_confidence() {
        let chip = Chip::from_detection(&detection("Smoking"), 0);
        assert_eq!(chip.confidence, 1.0);
        assert_eq!(chip.label, "Smoking");
        assert!(!chip.id.is_empty());
    }

    #[test]
    fn test_raise_confidence_saturates() {
        let mut chip = Chip::from_detection(&detection("Smoking"), 0);
        for _ in 0..5 {
            chip.raise_confidence(0.2);
        }
        assert_eq!(chip.confidence, 1.0);
    }

    #[test]
    fn test_raise_confidence_never_negative() {
        let mut chip = Chip::from_detection(&detection("Smoking"), 0);
        chip.raise_confidence(-5.0);
        assert_eq!(chip.confidence, 0.0);
    }

    #[test]
    fn test_label_key_lowercases() {
        let chip = Chip::from_detection(&detection("Poor Communication"), 0);
        assert_eq!(chip.label_key(), "poor communication");
    }
}
