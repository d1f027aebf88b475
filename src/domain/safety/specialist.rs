//! Specialist referral matching for emergency verdicts.

use serde::{Deserialize, Serialize};

use crate::ports::SpecialistDirectory;

/// A referral entry. Identity is `(name, contact)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialist {
    pub name: String,
    pub specialty: String,
    pub experience: String,
    pub contact: String,
    pub availability: String,
    pub location: String,
}

impl Specialist {
    pub fn identity(&self) -> (&str, &str) {
        (&self.name, &self.contact)
    }
}

/// Concern areas that map to a specialist roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernCategory {
    Suicide,
    Trauma,
    Depression,
}

impl ConcernCategory {
    /// Lookup order. Earlier categories list their specialists first.
    pub const ALL: [ConcernCategory; 3] = [
        ConcernCategory::Suicide,
        ConcernCategory::Trauma,
        ConcernCategory::Depression,
    ];

    /// Stems that select this category. "suicid" covers suicide and suicidal.
    pub fn stems(&self) -> &'static [&'static str] {
        match self {
            ConcernCategory::Suicide => &["suicid"],
            ConcernCategory::Trauma => &["trauma", "ptsd"],
            ConcernCategory::Depression => &["depress"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernCategory::Suicide => "suicide",
            ConcernCategory::Trauma => "trauma",
            ConcernCategory::Depression => "depression",
        }
    }

    fn matches(&self, normalized_text: &str) -> bool {
        self.stems().iter().any(|stem| normalized_text.contains(stem))
    }
}

/// Selects specialists whose category stems occur in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialistMatcher;

impl SpecialistMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Expects text already lowercased by `normalize_for_matching`.
    ///
    /// Returns specialists in category order, each `(name, contact)` at most once.
    /// An empty result is valid.
    pub fn match_specialists(
        &self,
        directory: &dyn SpecialistDirectory,
        normalized_text: &str,
    ) -> Vec<Specialist> {
        let mut matched: Vec<Specialist> = Vec::new();

        for category in ConcernCategory::ALL {
            if !category.matches(normalized_text) {
                continue;
            }
            for specialist in directory.roster(category) {
                let identity = specialist.identity();
                if !matched.iter().any(|m| m.identity() == identity) {
                    matched.push(specialist);
                }
            }
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedDirectory(HashMap<ConcernCategory, Vec<Specialist>>);

    impl SpecialistDirectory for FixedDirectory {
        fn roster(&self, category: ConcernCategory) -> Vec<Specialist> {
            self.0.get(&category).cloned().unwrap_or_default()
        }
    }

    fn specialist(name: &str, contact: &str) -> Specialist {
        Specialist {
            name: name.to_string(),
            specialty: "General".to_string(),
            experience: "10 years".to_string(),
            contact: contact.to_string(),
            availability: "Weekdays".to_string(),
            location: "Remote".to_string(),
        }
    }

    fn directory() -> FixedDirectory {
        let shared = specialist("Dr. Shared", "555-0100");
        let mut map = HashMap::new();
        map.insert(
            ConcernCategory::Suicide,
            vec![specialist("Dr. Crisis", "555-0001"), shared.clone()],
        );
        map.insert(
            ConcernCategory::Trauma,
            vec![specialist("Dr. Trauma", "555-0002"), shared.clone()],
        );
        map.insert(
            ConcernCategory::Depression,
            vec![specialist("Dr. Mood", "555-0003"), shared],
        );
        FixedDirectory(map)
    }

    #[test]
    fn suicidal_matches_suicide_category() {
        let found = SpecialistMatcher::new().match_specialists(&directory(), "i feel suicidal");
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Crisis", "Dr. Shared"]);
    }

    #[test]
    fn ptsd_selects_trauma_roster() {
        let found = SpecialistMatcher::new().match_specialists(&directory(), "my ptsd is back");
        assert_eq!(found[0].name, "Dr. Trauma");
    }

    #[test]
    fn overlapping_categories_deduplicate_by_identity() {
        let found = SpecialistMatcher::new()
            .match_specialists(&directory(), "suicidal thoughts, trauma and depression");
        let shared = found.iter().filter(|s| s.name == "Dr. Shared").count();
        assert_eq!(shared, 1);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn same_name_different_contact_is_distinct() {
        let mut map = HashMap::new();
        map.insert(
            ConcernCategory::Depression,
            vec![specialist("Dr. Lee", "555-1"), specialist("Dr. Lee", "555-2")],
        );
        let found = SpecialistMatcher::new().match_specialists(&FixedDirectory(map), "depressed");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn same_identity_with_different_details_keeps_first_seen() {
        let mut relisted = specialist("Dr. Shared", "555-0100");
        relisted.specialty = "Trauma".to_string();
        let mut map = HashMap::new();
        map.insert(
            ConcernCategory::Suicide,
            vec![specialist("Dr. Shared", "555-0100")],
        );
        map.insert(ConcernCategory::Trauma, vec![relisted]);

        let found = SpecialistMatcher::new()
            .match_specialists(&FixedDirectory(map), "suicidal after the trauma");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specialty, "General");
    }

    #[test]
    fn no_category_match_is_empty() {
        let found =
            SpecialistMatcher::new().match_specialists(&directory(), "hearing voices at night");
        assert!(found.is_empty());
    }
}
