//! Taxonomy Store: the declarative trait-trigger table
//!
//! One row per canonical trait label. The classifier walks this table and
//! nothing else; extending the taxonomy means adding rows, not code paths.
//! The table is process-wide, read-only, and safe to share across sessions.

use crate::types::TraitCategory;

/// A single row of the taxonomy: what text maps to what trait.
#[derive(Debug, Clone, Copy)]
pub struct TriggerRule {
    /// Category this rule belongs to
    pub category: TraitCategory,
    /// Canonical label for the resulting chip
    pub label: &'static str,
    /// Emoji hint for the UI
    pub emoji: &'static str,
    /// Lexical phrases that trigger a detection (substring match)
    pub triggers: &'static [&'static str],
    /// Context phrases that strengthen a match; empty = none required
    pub qualifiers: &'static [&'static str],
}

/// Phrases that mark a dealbreaker mention as an explicit rejection
const DEALBREAKER_QUALIFIERS: &[&str] = &[
    "can't stand",
    "hate",
    "no ",
    "won't tolerate",
    "dealbreaker",
    "can't do",
    "don't like",
];

/// Phrases that mark a value mention as something the user wants
const VALUE_QUALIFIERS: &[&str] = &[
    "value",
    "important to me",
    "love",
    "care about",
    "want",
    "looking for",
];

// =============================================================================
// THE TABLE - declaration order is emission order
// =============================================================================

// Triggers are matched as substrings, so short words that hide inside
// everyday speech ("lie" in "believe", "art" in "partner", "fun" in
// "funny") stay out of the table.
static RULES: &[TriggerRule] = &[
    // -------------------------------------------------------------------------
    // Dealbreakers (things the user won't tolerate)
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Smoking",
        emoji: "🚭",
        triggers: &["smoke", "smoking", "smoker", "cigarette", "vape", "vaping"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Cheating",
        emoji: "💔",
        triggers: &["cheat", "cheating", "cheater", "unfaithful", "infidelity"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Lying",
        emoji: "🤥",
        triggers: &["lying", "liar", "dishonest", "dishonesty"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Drugs",
        emoji: "💊",
        triggers: &["drugs", "drug use", "substance"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Disrespect",
        emoji: "🙅",
        triggers: &["disrespect", "rude", "unkind"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Laziness",
        emoji: "🛋️",
        triggers: &["lazy", "unmotivated", "no ambition"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Jealousy",
        emoji: "😤",
        triggers: &["jealous", "possessive", "controlling"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Dealbreaker,
        label: "Poor Communication",
        emoji: "🤐",
        triggers: &["doesn't communicate", "won't talk", "silent treatment"],
        qualifiers: DEALBREAKER_QUALIFIERS,
    },
    // -------------------------------------------------------------------------
    // Values (things the user cares about)
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Value,
        label: "Family",
        emoji: "👨‍👩‍👧‍👦",
        triggers: &["family", "kids", "children", "parents"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Career",
        emoji: "💼",
        triggers: &["career", "ambitious", "driven", "professional"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Adventure",
        emoji: "🌍",
        triggers: &["adventure", "travel", "explore", "try new things"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Stability",
        emoji: "🏡",
        triggers: &["stable", "stability", "secure", "security", "settled"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Growth",
        emoji: "🌱",
        triggers: &["growth", "growing", "learning", "self-improvement", "better myself"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Fitness",
        emoji: "💪",
        triggers: &["fitness", "gym", "workout", "health", "active lifestyle"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Creativity",
        emoji: "🎨",
        triggers: &["creative", "artistic", "music", "writing"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Spirituality",
        emoji: "🧘",
        triggers: &["spiritual", "faith", "religion", "meditation", "mindfulness"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Humor",
        emoji: "😄",
        triggers: &["funny", "humor", "laugh", "jokes", "sense of humor"],
        qualifiers: VALUE_QUALIFIERS,
    },
    TriggerRule {
        category: TraitCategory::Value,
        label: "Loyalty",
        emoji: "🤝",
        triggers: &["loyal", "loyalty", "faithful", "committed", "dependable"],
        qualifiers: VALUE_QUALIFIERS,
    },
    // -------------------------------------------------------------------------
    // Energy level
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Energy,
        label: "Chill",
        emoji: "😌",
        triggers: &["chill", "relaxed", "laid back", "calm", "homebody", "quiet night"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Energy,
        label: "High Energy",
        emoji: "⚡",
        triggers: &["energetic", "outgoing", "social", "party", "go out"],
        qualifiers: &[],
    },
    // -------------------------------------------------------------------------
    // Humor style
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Humor,
        label: "Dry Humor",
        emoji: "😏",
        triggers: &["dry humor", "sarcastic", "deadpan", "witty"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Humor,
        label: "Playful Humor",
        emoji: "😜",
        triggers: &["playful", "goofy", "silly"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Humor,
        label: "Dark Humor",
        emoji: "🖤",
        triggers: &["dark humor", "morbid", "edgy"],
        qualifiers: &[],
    },
    // -------------------------------------------------------------------------
    // Hobbies
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Hobby,
        label: "Hiking",
        emoji: "🥾",
        triggers: &["hike", "hiking", "trail"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Hobby,
        label: "Gaming",
        emoji: "🎮",
        triggers: &["gaming", "video games", "gamer"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Hobby,
        label: "Cooking",
        emoji: "🍳",
        triggers: &["cooking", "baking", "recipes"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Hobby,
        label: "Reading",
        emoji: "📚",
        triggers: &["reading", "books", "novels"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Hobby,
        label: "Photography",
        emoji: "📷",
        triggers: &["photography", "taking photos", "camera"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Hobby,
        label: "Dancing",
        emoji: "💃",
        triggers: &["dancing", "dance"],
        qualifiers: &[],
    },
    // -------------------------------------------------------------------------
    // Planning / communication style
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Style,
        label: "Spontaneous",
        emoji: "🎲",
        triggers: &["spontaneous", "go with the flow", "last minute"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Style,
        label: "Planner",
        emoji: "📅",
        triggers: &["planner", "planning", "organized", "schedule"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Style,
        label: "Direct",
        emoji: "🗣️",
        triggers: &["straightforward", "blunt", "tell it like it is"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Style,
        label: "Conflict-Avoidant",
        emoji: "🕊️",
        triggers: &["avoid conflict", "avoid arguments", "keep the peace"],
        qualifiers: &[],
    },
    // -------------------------------------------------------------------------
    // Everyday preferences
    // -------------------------------------------------------------------------
    TriggerRule {
        category: TraitCategory::Preference,
        label: "Night Owl",
        emoji: "🦉",
        triggers: &["night owl", "stay up late", "late nights"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Preference,
        label: "Early Bird",
        emoji: "🌅",
        triggers: &["early bird", "morning person", "early riser"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Preference,
        label: "Dog Person",
        emoji: "🐶",
        triggers: &["dog person", "dogs", "my dog"],
        qualifiers: &[],
    },
    TriggerRule {
        category: TraitCategory::Preference,
        label: "Cat Person",
        emoji: "🐱",
        triggers: &["cat person", "cats", "my cat"],
        qualifiers: &[],
    },
];

/// Read-only access to the taxonomy table
#[derive(Debug, Default, Clone, Copy)]
pub struct Taxonomy;

impl Taxonomy {
    pub fn new() -> Self {
        Self
    }

    /// All rules in declaration order
    pub fn rules(&self) -> &'static [TriggerRule] {
        RULES
    }

    /// Rules for a single category, in declaration order
    pub fn lookup(&self, category: TraitCategory) -> impl Iterator<Item = &'static TriggerRule> {
        RULES.iter().filter(move |rule| rule.category == category)
    }

    /// All categories, in declaration order
    pub fn all_categories(&self) -> &'static [TraitCategory] {
        &TraitCategory::ALL
    }
}

// =============================================================================
// TESTS
// =============================================================================
