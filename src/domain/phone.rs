//! Phone number normalization and the digit-only canonical form.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| {
    // ASCII digits only; unicode digit classes are deliberately not accepted
    Regex::new(r"^[0-9]+$").expect("digit pattern is valid")
});

/// Strip common formatting characters from a raw phone string.
///
/// Removes all whitespace and hyphens. Pure, total, and idempotent; it does
/// NOT guarantee digit-only output. The digit check is a separate concern,
/// see [`CanonicalNumber`].
pub fn normalize_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// A phone number that passed the digit-only format check.
///
/// This is the shape a number must have before the validation pipeline will
/// touch it: non-empty and nothing but ASCII digits. It is a candidate, not
/// the stored value; the stored number is derived from the identity returned
/// by the messaging network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalNumber(String);

impl CanonicalNumber {
    /// Check a normalized number against the digit-only format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidNumberFormat` if the input is empty
    /// or contains anything other than ASCII digits.
    pub fn new(number: impl Into<String>) -> Result<Self, ValidationError> {
        let number = number.into();

        if !DIGITS_ONLY.is_match(&number) {
            return Err(ValidationError::InvalidNumberFormat(number));
        }

        Ok(Self(number))
    }

    /// Get the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
