//! Keyword taxonomy and text normalization for crisis matching.
//!
//! Matching is English-only substring matching. Multilingual or obfuscated
//! crisis language is not detected.

/// Lowercases and drops apostrophes so "Can't" and "cant" compare equal.
pub fn normalize_for_matching(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '\u{2018}'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Any single match makes the turn an emergency.
pub const SEVERE_KEYWORDS: &[&str] = &[
    // self-harm and suicidal ideation
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "end it all",
    "want to die",
    "better off dead",
    "no reason to live",
    "self-harm",
    "self harm",
    "hurt myself",
    "cutting myself",
    "cant take it anymore",
    "cant go on",
    // psychosis
    "hearing voices",
    "hallucinating",
    "psychosis",
    "psychotic",
    // violence toward others
    "kill someone",
    "hurt someone",
    "harm others",
    "want to hurt people",
];

/// Two distinct matches make the turn an emergency; one alone does not.
pub const MODERATE_KEYWORDS: &[&str] = &[
    "severe depression",
    "panic attack",
    "trauma",
    "crisis",
    "hopeless",
    "worthless",
    "abuse",
    "ptsd",
    "overdose",
    "cant stop crying",
    "not eating",
    "cant sleep",
];
