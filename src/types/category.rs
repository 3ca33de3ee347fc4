//! Trait category definitions

use serde::{Deserialize, Serialize};

/// The fixed set of trait categories a conversation can surface.
///
/// Process-wide and immutable after startup. Adding a category means adding
/// a variant here and rows to the taxonomy table, never a new code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCategory {
    /// Something the user won't tolerate in a partner
    Dealbreaker,
    /// Something the user cares about
    Value,
    /// Energy level (chill vs high energy)
    Energy,
    /// Humor style (dry, playful, dark)
    Humor,
    /// An activity the user enjoys
    Hobby,
    /// Planning / communication style
    Style,
    /// Everyday preference
    Preference,
}

impl TraitCategory {
    /// All categories in declaration order
    pub const ALL: [TraitCategory; 7] = [
        TraitCategory::Dealbreaker,
        TraitCategory::Value,
        TraitCategory::Energy,
        TraitCategory::Humor,
        TraitCategory::Hobby,
        TraitCategory::Style,
        TraitCategory::Preference,
    ];
}

impl std::fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TraitCategory::Dealbreaker => "Dealbreaker",
            TraitCategory::Value => "Value",
            TraitCategory::Energy => "Energy",
            TraitCategory::Humor => "Humor",
            TraitCategory::Hobby => "Hobby",
            TraitCategory::Style => "Style",
            TraitCategory::Preference => "Preference",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for TraitCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dealbreaker" => Ok(TraitCategory::Dealbreaker),
            "value" => Ok(TraitCategory::Value),
            "energy" => Ok(TraitCategory::Energy),
            "humor" => Ok(TraitCategory::Humor),
            "hobby" => Ok(TraitCategory::Hobby),
            "style" => Ok(TraitCategory::Style),
            "preference" => Ok(TraitCategory::Preference),
            _ => Err(()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_contains_every_variant_once() {
        let mut seen = std::collections::HashSet::new();
        for cat in TraitCategory::ALL {
            assert!(seen.insert(cat), "duplicate category in ALL: {}", cat);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for cat in TraitCategory::ALL {
            let parsed: TraitCategory = cat.to_string().parse().unwrap();
            assert_eq!(parsed, cat);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!("nonsense".parse::<TraitCategory>().is_err());
    }
}
