//! Assessment domain module.
//!
//! Accumulates condition/confidence pairs reported by the model across a
//! session.

mod condition;
mod state;
mod tracker;

pub use condition::{Condition, KNOWN_CONDITIONS};
pub use state::{AssessmentState, DEFAULT_CONFIDENCE_THRESHOLD};
pub use tracker::AssessmentTracker;
