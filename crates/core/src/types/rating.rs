//! Product review rating type.

use serde::{Deserialize, Serialize};

/// Error returned when a rating is outside the allowed range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating must be between {min} and {max}, got {got}")]
pub struct RatingError {
    /// Minimum allowed rating.
    pub min: u8,
    /// Maximum allowed rating.
    pub max: u8,
    /// The rejected value.
    pub got: u8,
}

/// A star rating between 1 and 5 inclusive.
///
/// Review averages are computed over these values, so the range is
/// enforced at construction rather than at aggregation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Minimum allowed rating.
    pub const MIN: u8 = 1;
    /// Maximum allowed rating.
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if `value` is 0 or greater than 5.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingError {
                min: Self::MIN,
                max: Self::MAX,
                got: value,
            })
        }
    }

    /// Get the rating as a plain integer.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
