//! Liaison: real-time intelligence-chip extraction for live voice conversations
//!
//! Streams finalized utterances (user + agent) through a trait classifier,
//! deduplicates findings into chips, reconciles agent confirmations, and
//! watches the agent's output for the conversation sign-off.

pub mod core;
pub mod types;

// =============================================================================
// EXTRACTION TUNABLES
// =============================================================================

/// Confidence assigned to a freshly created chip
pub const CONFIDENCE_INITIAL: f64 = 1.0;

/// Upper clamp for chip confidence
pub const CONFIDENCE_MAX: f64 = 1.0;

/// Confidence boost applied per reconciled confirmation
pub const RECONCILE_BOOST: f64 = 0.2;

// =============================================================================
// LIFECYCLE TUNABLES
// =============================================================================

/// Phrase the agent ends its final utterance with (checked case-insensitively)
pub const TERMINATION_MARKER: &str = "talk soon";

/// Wait after the sign-off before closing, so trailing audio can finish (milliseconds)
pub const GRACE_DELAY_MS: u64 = 2000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
