//! Structured profile snapshot
//!
//! The grouped view of a session's chips handed to downstream consumers.
//! This is the only artifact an external caller may choose to persist.

use serde::{Deserialize, Serialize};

/// Single-slot personality reads. "Best" means most recently registered chip
/// in the category, not highest confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalityTags {
    pub energy: Option<String>,
    pub humor: Option<String>,
}

/// Chips grouped by category for downstream consumption
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Things the user won't tolerate
    pub dealbreakers: Vec<String>,
    /// Things the user cares about
    pub values: Vec<String>,
    /// Activities the user enjoys
    pub hobbies: Vec<String>,
    /// Planning / communication styles
    pub styles: Vec<String>,
    /// Everyday preferences
    pub preferences: Vec<String>,
    /// Single-slot reads
    #[serde(rename = "personalityTags")]
    pub personality_tags: PersonalityTags,
}

impl ProfileSnapshot {
    /// Total labels captured across all groups
    pub fn len(&self) -> usize {
        self.dealbreakers.len()
            + self.values.len()
            + self.hobbies.len()
            + self.styles.len()
            + self.preferences.len()
            + self.personality_tags.energy.iter().count()
            + self.personality_tags.humor.iter().count()
    }

    /// True when nothing was captured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
