//! Domain layer: conversation state machine, response parsing, assessment
//! and crisis screening. Nothing here performs I/O.
//!
//! # Module Organization
//!
//! - `foundation` - Shared value objects (ids, timestamps, confidence, errors)
//! - `conversation` - History, phase derivation, prompt composition, response parsing
//! - `assessment` - Condition/confidence extraction and the running assessment
//! - `safety` - Emergency keyword tiers, crisis resources, specialist matching
//! - `session` - Session state, the turn reducer and the export report

pub mod assessment;
pub mod conversation;
pub mod foundation;
pub mod safety;
pub mod session;
