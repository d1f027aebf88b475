//! Static specialist roster loaded from YAML.
//!
//! The default roster is embedded in the binary and parsed once on first
//! use. Custom rosters can be supplied with `from_yaml_str`.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::safety::{ConcernCategory, Specialist};
use crate::ports::SpecialistDirectory;

const EMBEDDED_ROSTER: &str = include_str!("roster.yaml");

static DEFAULT_ROSTER: Lazy<Result<RosterMap, DirectoryError>> =
    Lazy::new(|| parse_roster(EMBEDDED_ROSTER));

type RosterMap = BTreeMap<ConcernCategory, Vec<Specialist>>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("invalid roster YAML: {0}")]
    Parse(String),

    #[error("roster entry {index} in '{category}' is missing a {field}")]
    MissingField {
        category: &'static str,
        index: usize,
        field: &'static str,
    },
}

/// In-memory roster keyed by concern category.
#[derive(Debug, Clone, Default)]
pub struct StaticSpecialistDirectory {
    roster: RosterMap,
}

impl StaticSpecialistDirectory {
    /// The roster shipped with the crate.
    pub fn embedded() -> Result<Self, DirectoryError> {
        DEFAULT_ROSTER
            .as_ref()
            .map(|roster| Self {
                roster: roster.clone(),
            })
            .map_err(Clone::clone)
    }

    /// Parses a roster of the form `category: [specialist, ...]`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DirectoryError> {
        Ok(Self {
            roster: parse_roster(yaml)?,
        })
    }

    pub fn len(&self) -> usize {
        self.roster.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpecialistDirectory for StaticSpecialistDirectory {
    fn roster(&self, category: ConcernCategory) -> Vec<Specialist> {
        self.roster.get(&category).cloned().unwrap_or_default()
    }
}

fn parse_roster(yaml: &str) -> Result<RosterMap, DirectoryError> {
    let roster: RosterMap =
        serde_yaml::from_str(yaml).map_err(|e| DirectoryError::Parse(e.to_string()))?;

    for (category, specialists) in &roster {
        for (index, specialist) in specialists.iter().enumerate() {
            let missing = if specialist.name.trim().is_empty() {
                Some("name")
            } else if specialist.contact.trim().is_empty() {
                Some("contact")
            } else {
                None
            };
            if let Some(field) = missing {
                return Err(DirectoryError::MissingField {
                    category: category.as_str(),
                    index,
                    field,
                });
            }
        }
    }

    Ok(roster)
}
