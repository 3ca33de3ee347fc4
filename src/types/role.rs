//! Speaker roles

use serde::{Deserialize, Serialize};

/// Who produced an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human participant
    User,
    /// The conversational agent
    Agent,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::User => "user",
            Role::Agent => "agent",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" | "u" | "human" => Ok(Role::User),
            "agent" | "a" | "bot" => Ok(Role::Agent),
            _ => Err(()),
        }
    }
}
