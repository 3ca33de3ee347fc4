//! Core types for Liaison

mod category;
mod chip;
mod event;
mod lifecycle;
mod profile;
mod role;

pub use category::TraitCategory;
pub use chip::{Chip, Detection, MatchStrength};
pub use event::{ChipEvent, ChipEventKind, ClientMessage, EngineEvent};
pub use lifecycle::LifecycleState;
pub use profile::{PersonalityTags, ProfileSnapshot};
pub use role::Role;
