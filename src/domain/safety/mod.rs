//! Crisis detection and specialist referral.

mod emergency;
mod keywords;
mod screen;
mod specialist;

pub use emergency::{
    CrisisResource, Detection, EmergencyDetector, EmergencyVerdict, SeverityTier,
    CRISIS_RESOURCES, MODERATE_MATCHES_FOR_EMERGENCY,
};
pub use keywords::{normalize_for_matching, MODERATE_KEYWORDS, SEVERE_KEYWORDS};
pub use screen::CrisisScreen;
pub use specialist::{ConcernCategory, Specialist, SpecialistMatcher};
