//! Core modules for Liaison

pub mod api;
pub mod classifier;
pub mod engine;
pub mod lifecycle;
pub mod reconciler;
pub mod registry;
pub mod taxonomy;

pub use api::{create_router, create_router_with_state, run_server, AppState};
pub use classifier::Classifier;
pub use engine::SessionEngine;
pub use lifecycle::{marker_predicate, EndPredicate, LifecycleAction, LifecycleMonitor};
pub use reconciler::{BoostInstruction, Reconciler};
pub use registry::ChipRegistry;
pub use taxonomy::{Taxonomy, TriggerRule};
