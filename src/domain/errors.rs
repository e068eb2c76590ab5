//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The contact name is empty.
    EmptyName,

    /// The number is not a non-empty digit string after normalization.
    InvalidNumberFormat(String),

    /// The provided email address is invalid.
    InvalidEmail(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::InvalidNumberFormat(number) => {
                write!(f, "invalid number format, only digits are allowed: {}", number)
            }
            Self::InvalidEmail(email) => write!(f, "invalid email address: {}", email),
        }
    }
}

impl std::error::Error for ValidationError {}
