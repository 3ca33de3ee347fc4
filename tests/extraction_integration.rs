//! Integration tests for the extraction pipeline
//!
//! Runs real conversation scripts through the session engine and checks the
//! chip stream end to end: classification, deduplication, reconciliation.

use pretty_assertions::assert_eq;

use liaison::core::SessionEngine;
use liaison::types::{ChipEvent, ChipEventKind, EngineEvent, Role, TraitCategory};

fn chip_events(events: &[EngineEvent]) -> Vec<&ChipEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Chip(c) => Some(c),
            _ => None,
        })
        .collect()
}

#[test]
fn scenario_dealbreaker_detection() {
    // User rejects smoking; one Created event, full confidence.
    let mut engine = SessionEngine::new();
    let events = engine.on_utterance(Role::User, "I can't stand smoking");

    let chips = chip_events(&events);
    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].kind, ChipEventKind::Created);
    assert_eq!(chips[0].chip.category, TraitCategory::Dealbreaker);
    assert_eq!(chips[0].chip.label, "Smoking");
    assert_eq!(chips[0].chip.confidence, 1.0);
}

#[test]
fn scenario_agent_confirmation_boosts_existing_chip() {
    // Agent paraphrases the dealbreaker back; chip is updated, saturated at 1.0.
    let mut engine = SessionEngine::new();
    engine.on_utterance(Role::User, "I can't stand smoking");

    let events = engine.on_utterance(Role::Agent, "Got it, no smoking for you");
    let updates: Vec<_> = chip_events(&events)
        .into_iter()
        .filter(|e| e.kind == ChipEventKind::Updated)
        .collect();

    assert!(!updates.is_empty());
    for update in updates {
        assert_eq!(update.chip.label, "Smoking");
        assert_eq!(update.chip.confidence, 1.0);
    }
    // Still exactly one chip; the confirmation created nothing.
    assert_eq!(engine.chips().len(), 1);
}

#[test]
fn test_confirmation_without_matching_chip_is_dropped() {
    let mut engine = SessionEngine::new();
    // No chips registered yet; the paraphrase has nothing to boost.
    let events = engine.on_utterance(Role::Agent, "So you value gardening, interesting.");
    assert!(chip_events(&events).is_empty());
    assert!(engine.chips().is_empty());
}

#[test]
fn test_chip_set_grows_monotonically() {
    let mut engine = SessionEngine::new();
    let script = [
        (Role::User, "I can't stand smoking"),
        (Role::Agent, "Got it, no smoking for you. What do you care about?"),
        (Role::User, "family is important to me, and I love hiking"),
        (Role::User, "family really matters"),
        (Role::Agent, "So you value family. You seem chill."),
        (Role::User, "yeah I'm pretty laid back"),
    ];

    let mut last_count = 0;
    for (speaker, text) in script {
        engine.on_utterance(speaker, text);
        let count = engine.chips().len();
        assert!(count >= last_count, "chip set shrank from {} to {}", last_count, count);
        last_count = count;
    }

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.dealbreakers, vec!["Smoking"]);
    assert_eq!(snapshot.values, vec!["Family"]);
    assert_eq!(snapshot.hobbies, vec!["Hiking"]);
    assert_eq!(snapshot.personality_tags.energy.as_deref(), Some("Chill"));
}

#[test]
fn test_confidence_stays_in_bounds_under_repeated_boosts() {
    let mut engine = SessionEngine::new();
    engine.on_utterance(Role::User, "family is important to me");

    for _ in 0..10 {
        engine.on_utterance(Role::Agent, "So you value family.");
    }

    for chip in engine.chips() {
        assert!(chip.confidence >= 0.0 && chip.confidence <= 1.0);
    }
}

#[test]
fn test_duplicate_registration_is_idempotent() {
    let mut engine = SessionEngine::new();
    let first = engine.on_utterance(Role::User, "no smoking around me please");
    let second = engine.on_utterance(Role::User, "seriously, smoking is the worst");

    assert_eq!(chip_events(&first).len(), 1);
    assert!(chip_events(&second).is_empty());
    assert_eq!(engine.chips().len(), 1);
}

#[test]
fn test_sessions_are_independent() {
    let mut a = SessionEngine::new();
    let mut b = SessionEngine::new();

    a.on_utterance(Role::User, "I can't stand smoking");
    b.on_utterance(Role::User, "family is important to me");

    assert_eq!(a.snapshot().dealbreakers, vec!["Smoking"]);
    assert!(a.snapshot().values.is_empty());
    assert_eq!(b.snapshot().values, vec!["Family"]);
    assert!(b.snapshot().dealbreakers.is_empty());
}

#[test]
fn test_full_conversation_profile() {
    let mut engine = SessionEngine::new();
    let script = [
        (Role::Agent, "Hi there. What won't you tolerate in a partner?"),
        (Role::User, "definitely no cheating, that's a dealbreaker"),
        (Role::Agent, "Got it, no cheating for you. What matters most?"),
        (Role::User, "loyalty matters most to me"),
        (Role::User, "and I want someone close to their family"),
        (Role::Agent, "So you value loyalty. What do you do for fun?"),
        (Role::User, "I'm big on hiking and cooking, pretty chill evenings mostly"),
        (Role::User, "oh and I'm a total night owl, very sarcastic"),
    ];

    for (speaker, text) in script {
        engine.on_utterance(speaker, text);
    }

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.dealbreakers, vec!["Cheating"]);
    assert_eq!(snapshot.values, vec!["Loyalty", "Family"]);
    assert!(snapshot.hobbies.contains(&"Hiking".to_string()));
    assert_eq!(snapshot.personality_tags.energy.as_deref(), Some("Chill"));
    assert_eq!(snapshot.personality_tags.humor.as_deref(), Some("Dry Humor"));
    assert_eq!(snapshot.preferences, vec!["Night Owl"]);
}
