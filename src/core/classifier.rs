//! Utterance Classifier: maps normalized text to candidate trait detections
//!
//! Pure function of (text, speaker, taxonomy). Each category yields at most
//! one detection per call; the first matching trigger in table order wins.
//! A bare trigger hit is sufficient evidence; a qualifying-context phrase
//! merely upgrades the match strength. This is deliberately permissive:
//! over-triggering is the accepted tradeoff for responsiveness.

use crate::core::taxonomy::{Taxonomy, TriggerRule};
use crate::types::{Detection, MatchStrength, Role};

/// Stateless utterance classifier over the taxonomy table
#[derive(Debug, Default, Clone, Copy)]
pub struct Classifier {
    taxonomy: Taxonomy,
}

impl Classifier {
    /// Create new classifier
    pub fn new() -> Self {
        Self {
            taxonomy: Taxonomy::new(),
        }
    }

    /// Classify one finalized utterance.
    ///
    /// Returns detections in taxonomy-declaration order. Unmatched text
    /// yields an empty vec, which is steady-state behavior, not an error.
    pub fn classify(&self, text: &str, speaker: Role) -> Vec<Detection> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut detections = Vec::new();

        for &category in self.taxonomy.all_categories() {
            let hit = self
                .taxonomy
                .lookup(category)
                .find(|rule| trigger_hit(rule, &normalized));

            if let Some(rule) = hit {
                detections.push(Detection {
                    category,
                    label: rule.label.to_string(),
                    emoji: rule.emoji.to_string(),
                    speaker,
                    source: normalized.clone(),
                    strength: match_strength(rule, &normalized),
                });
            }
        }

        detections
    }
}

/// Does any trigger phrase occur as a substring of the normalized text?
fn trigger_hit(rule: &TriggerRule, text: &str) -> bool {
    rule.triggers.iter().any(|trigger| text.contains(trigger))
}

/// Qualifier presence upgrades the match; absence never blocks it.
fn match_strength(rule: &TriggerRule, text: &str) -> MatchStrength {
    if rule.qualifiers.iter().any(|q| text.contains(q)) {
        MatchStrength::Qualified
    } else {
        MatchStrength::Bare
    }
}

// =============================================================================
// TESTS
// =============================================================================
