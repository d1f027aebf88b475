//! Specialist roster port.

use crate::domain::safety::{ConcernCategory, Specialist};

/// Read-only lookup of referral specialists by concern category.
///
/// Rosters are static reference data, so lookups are synchronous.
pub trait SpecialistDirectory: Send + Sync {
    /// Specialists for a category in roster order. Unknown or empty
    /// categories return an empty list.
    fn roster(&self, category: ConcernCategory) -> Vec<Specialist>;
}
