//! Confirmation Reconciler: strengthens chips from agent paraphrases
//!
//! When the agent reflects something back ("so you value family", "got it,
//! no smoking"), that is confirmed detection and earns a confidence boost.
//! Only existing chips are strengthened; a capture with no matching chip is
//! dropped silently by the registry.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::TraitCategory;
use crate::RECONCILE_BOOST;

lazy_static! {
    // Paraphrase templates with their confirmed category. Captures are
    // single words; multi-word labels are matched by fragment downstream.
    static ref TEMPLATES: Vec<(Regex, TraitCategory)> = vec![
        (
            Regex::new(r"so you value (\w+)").unwrap(),
            TraitCategory::Value
        ),
        (
            Regex::new(r"you're looking for (\w+)").unwrap(),
            TraitCategory::Value
        ),
        (
            Regex::new(r"no (\w+)s? for you").unwrap(),
            TraitCategory::Dealbreaker
        ),
        (
            Regex::new(r"got it.* no (\w+)").unwrap(),
            TraitCategory::Dealbreaker
        ),
        (
            Regex::new(r"you seem (\w+)").unwrap(),
            TraitCategory::Energy
        ),
    ];
}

/// A single confidence-boost instruction for the registry
#[derive(Debug, Clone, PartialEq)]
pub struct BoostInstruction {
    /// Captured label fragment (lowercase)
    pub fragment: String,
    /// Category the template confirms
    pub category: TraitCategory,
    /// Confidence delta to apply
    pub delta: f64,
}

/// Scans agent utterances for paraphrase-style confirmations
#[derive(Debug, Default, Clone, Copy)]
pub struct Reconciler;

impl Reconciler {
    /// Create new reconciler
    pub fn new() -> Self {
        Self
    }

    /// Extract boost instructions from one completed agent utterance.
    /// Multiple matches each yield an independent instruction.
    pub fn reconcile(&self, agent_text: &str) -> Vec<BoostInstruction> {
        let text = agent_text.trim().to_lowercase();
        if text.is_empty() {
            return Vec::new();
        }

        let mut instructions = Vec::new();
        for (template, category) in TEMPLATES.iter() {
            for caps in template.captures_iter(&text) {
                if let Some(capture) = caps.get(1) {
                    instructions.push(BoostInstruction {
                        fragment: capture.as_str().to_string(),
                        category: *category,
                        delta: RECONCILE_BOOST,
                    });
                }
            }
        }
        instructions
    }
}

// =============================================================================
// TESTS
// =============================================================================
