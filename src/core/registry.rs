//! Chip Registry: deduplication and confidence accumulation
//!
//! Owns the canonical chip set for one session. Terminal point of the
//! extraction pipeline: malformed or unknown input is a no-op, never an
//! error, so nothing here can stall the live conversation.
//!
//! Asymmetry to preserve: `register` does NOT raise confidence on a
//! duplicate raw detection; confidence only rises through `boost`, driven
//! by the confirmation reconciler. Raw re-detection and confirmed detection
//! are different kinds of evidence.

use tracing::debug;

use crate::types::{
    Chip, ChipEvent, Detection, PersonalityTags, ProfileSnapshot, TraitCategory,
};

/// Per-session chip store, insertion-ordered
#[derive(Debug, Default)]
pub struct ChipRegistry {
    chips: Vec<Chip>,
}

impl ChipRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self { chips: Vec::new() }
    }

    /// Register a candidate detection.
    ///
    /// New (category, label) pairs create a chip at full confidence and
    /// return a Created event. A duplicate is idempotent and returns None.
    pub fn register(&mut self, detection: &Detection) -> Option<ChipEvent> {
        let key = detection.label.to_lowercase();
        if self
            .chips
            .iter()
            .any(|c| c.category == detection.category && c.label_key() == key)
        {
            debug!(
                category = %detection.category,
                label = %detection.label,
                "duplicate detection ignored"
            );
            return None;
        }

        let chip = Chip::from_detection(detection, self.chips.len());
        self.chips.push(chip.clone());
        Some(ChipEvent::created(chip))
    }

    /// Raise confidence of an existing chip matched by category and a
    /// case-insensitive label fragment. Returns an Updated event on a match
    /// (even when confidence was already saturated), else None.
    pub fn boost(
        &mut self,
        label_fragment: &str,
        category: TraitCategory,
        delta: f64,
    ) -> Option<ChipEvent> {
        let fragment = label_fragment.to_lowercase();
        if fragment.is_empty() {
            return None;
        }

        let chip = self
            .chips
            .iter_mut()
            .find(|c| c.category == category && c.label_key().contains(&fragment))?;

        chip.raise_confidence(delta);
        Some(ChipEvent::updated(chip.clone()))
    }

    /// All chips in insertion order
    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// Number of chips registered so far
    pub fn len(&self) -> usize {
        self.chips.len()
    }

    /// True when no chips have been registered
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Structured profile grouped by category.
    ///
    /// List categories keep insertion order. Single-slot reads (energy,
    /// humor) take the most recently registered chip in that category.
    pub fn snapshot(&self) -> ProfileSnapshot {
        let labels = |category: TraitCategory| -> Vec<String> {
            self.chips
                .iter()
                .filter(|c| c.category == category)
                .map(|c| c.label.clone())
                .collect()
        };
        let latest = |category: TraitCategory| -> Option<String> {
            self.chips
                .iter()
                .rev()
                .find(|c| c.category == category)
                .map(|c| c.label.clone())
        };

        ProfileSnapshot {
            dealbreakers: labels(TraitCategory::Dealbreaker),
            values: labels(TraitCategory::Value),
            hobbies: labels(TraitCategory::Hobby),
            styles: labels(TraitCategory::Style),
            preferences: labels(TraitCategory::Preference),
            personality_tags: PersonalityTags {
                energy: latest(TraitCategory::Energy),
                humor: latest(TraitCategory::Humor),
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChipEventKind, MatchStrength, Role};

    fn detection(category: TraitCategory, label: &str) -> Detection {
        Detection {
            category,
            label: label.to_string(),
            emoji: "✨".to_string(),
            speaker: Role::User,
            source: String::new(),
            strength: MatchStrength::Bare,
        }
    }

    #[test]
    fn test_register_creates_chip() {
        let mut registry = ChipRegistry::new();
        let event = registry
            .register(&detection(TraitCategory::Dealbreaker, "Smoking"))
            .unwrap();

        assert_eq!(event.kind, ChipEventKind::Created);
        assert_eq!(event.chip.confidence, 1.0);
        assert_eq!(event.chip.order, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_duplicate_is_silent_noop() {
        let mut registry = ChipRegistry::new();
        let d = detection(TraitCategory::Dealbreaker, "Smoking");

        assert!(registry.register(&d).is_some());
        assert!(registry.register(&d).is_none());
        assert_eq!(registry.len(), 1);
        // Confidence untouched by the duplicate - no raise on raw re-detection.
        assert_eq!(registry.chips()[0].confidence, 1.0);
    }

    #[test]
    fn test_same_label_different_category_is_distinct() {
        let mut registry = ChipRegistry::new();
        assert!(registry
            .register(&detection(TraitCategory::Value, "Humor"))
            .is_some());
        assert!(registry
            .register(&detection(TraitCategory::Humor, "Humor"))
            .is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let mut registry = ChipRegistry::new();
        assert!(registry
            .register(&detection(TraitCategory::Value, "Family"))
            .is_some());
        assert!(registry
            .register(&detection(TraitCategory::Value, "FAMILY"))
            .is_none());
    }

    #[test]
    fn test_boost_matches_fragment_and_category() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Dealbreaker, "Smoking"));

        // Wrong category: no-op.
        assert!(registry
            .boost("smoking", TraitCategory::Value, 0.2)
            .is_none());

        // Right category, fragment match.
        let event = registry
            .boost("smoking", TraitCategory::Dealbreaker, 0.2)
            .unwrap();
        assert_eq!(event.kind, ChipEventKind::Updated);
    }

    #[test]
    fn test_boost_saturates_but_still_reports() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Dealbreaker, "Smoking"));

        for _ in 0..4 {
            let event = registry
                .boost("smoking", TraitCategory::Dealbreaker, 0.2)
                .unwrap();
            assert_eq!(event.kind, ChipEventKind::Updated);
            assert!(event.chip.confidence <= 1.0);
        }
        assert_eq!(registry.chips()[0].confidence, 1.0);
    }

    #[test]
    fn test_boost_unknown_fragment_is_noop() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Dealbreaker, "Smoking"));

        assert!(registry
            .boost("gambling", TraitCategory::Dealbreaker, 0.2)
            .is_none());
        assert!(registry.boost("", TraitCategory::Dealbreaker, 0.2).is_none());
    }

    #[test]
    fn test_chip_set_never_shrinks() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Value, "Family"));
        registry.register(&detection(TraitCategory::Value, "Family"));
        registry.boost("family", TraitCategory::Value, 0.2);
        registry.boost("nothing", TraitCategory::Energy, 0.2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Value, "Family"));
        registry.register(&detection(TraitCategory::Dealbreaker, "Smoking"));
        registry.register(&detection(TraitCategory::Value, "Loyalty"));

        let orders: Vec<_> = registry.chips().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_snapshot_groups_by_category() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Dealbreaker, "Smoking"));
        registry.register(&detection(TraitCategory::Value, "Family"));
        registry.register(&detection(TraitCategory::Value, "Loyalty"));
        registry.register(&detection(TraitCategory::Hobby, "Hiking"));

        let snap = registry.snapshot();
        assert_eq!(snap.dealbreakers, vec!["Smoking"]);
        assert_eq!(snap.values, vec!["Family", "Loyalty"]);
        assert_eq!(snap.hobbies, vec!["Hiking"]);
        assert!(snap.personality_tags.energy.is_none());
    }

    #[test]
    fn test_snapshot_single_slots_take_most_recent() {
        let mut registry = ChipRegistry::new();
        registry.register(&detection(TraitCategory::Energy, "Chill"));
        registry.register(&detection(TraitCategory::Energy, "High Energy"));

        let snap = registry.snapshot();
        assert_eq!(snap.personality_tags.energy.as_deref(), Some("High Energy"));
    }
}
