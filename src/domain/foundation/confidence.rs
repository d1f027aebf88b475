//! Confidence value object (0.0 to 1.0 scale, built from whole percentages).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Degree of belief that a condition applies, stored as a whole percentage.
///
/// Serialized as a fraction so that exported reports read `0.8`, not `80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Confidence(u8);

impl Confidence {
    /// No confidence.
    pub const ZERO: Self = Self(0);

    /// Certainty.
    pub const FULL: Self = Self(100);

    /// Creates a Confidence from a whole percentage, returning error if above 100.
    pub fn from_percent(value: u32) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "confidence",
                0,
                100,
                i64::from(value),
            ));
        }
        Ok(Self(value as u8))
    }

    /// Creates a Confidence from a fraction, rounding to the nearest percent.
    pub fn from_fraction(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::invalid_format(
                "confidence",
                format!("{} is not within 0.0..=1.0", value),
            ));
        }
        Ok(Self((value * 100.0).round() as u8))
    }

    /// Returns the whole percentage.
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for Confidence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_fraction())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fraction = f64::deserialize(deserializer)?;
        Confidence::from_fraction(fraction).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_percent_accepts_bounds() {
        assert_eq!(Confidence::from_percent(0).unwrap(), Confidence::ZERO);
        assert_eq!(Confidence::from_percent(100).unwrap(), Confidence::FULL);
    }

    #[test]
    fn from_percent_rejects_over_100() {
        match Confidence::from_percent(101) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "confidence");
                assert_eq!(actual, 101);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn as_fraction_divides_by_hundred() {
        let c = Confidence::from_percent(80).unwrap();
        assert!((c.as_fraction() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn from_fraction_rejects_out_of_range() {
        assert!(Confidence::from_fraction(1.2).is_err());
        assert!(Confidence::from_fraction(-0.1).is_err());
        assert!(Confidence::from_fraction(f64::NAN).is_err());
    }

    #[test]
    fn serializes_as_fraction() {
        let c = Confidence::from_percent(75).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "0.75");
        let back: Confidence = serde_json::from_str("0.75").unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn displays_as_percentage() {
        assert_eq!(Confidence::from_percent(42).unwrap().to_string(), "42%");
    }
}
