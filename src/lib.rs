//! Mindbridge - conversational mental-health support assistant.
//!
//! Each user turn derives the conversation phase from history, composes a
//! phase-aware prompt, sends it to a generation service, parses the
//! sectioned reply, screens for crisis language and folds condition
//! confidence into a running assessment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
