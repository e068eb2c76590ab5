//! Error types for the contact sync service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the messaging-network identity service.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Identity service returned an error status code
    #[error("identity service error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("request timeout")]
    Timeout,

    /// Number unknown to the messaging network
    #[error("number not known to the messaging network: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("authentication with the identity service failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("identity service rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur in the contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No contact with this id exists for the acting tenant
    #[error("contact not found: {0}")]
    NotFound(String),

    /// The storage backend failed
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the contact pipeline.
///
/// Everything here is reported to the caller with a message; nothing is
/// swallowed. Bulk import collects these per record instead of aborting.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Malformed name or number, rejected before any external call is made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Number rejected by tenant acceptability rules.
    #[error("number {0} is not accepted for messaging")]
    InvalidContact(String),

    /// External resolution failed, either a transport error or a number the
    /// messaging network does not recognize. Reported as a client error.
    #[error("could not resolve number {number}: {reason}")]
    UnreachableNumber { number: String, reason: String },

    /// Operation on a nonexistent tenant-scoped contact id.
    #[error("contact not found: {0}")]
    NotFound(String),

    /// Store backend failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ContactError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ContactError::NotFound(id),
            other => ContactError::Store(other),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with IdentityError
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContactError::InvalidContact("5511999999999".to_string());
        assert_eq!(
            err.to_string(),
            "number 5511999999999 is not accepted for messaging"
        );

        let err = ContactError::NotFound("42".to_string());
        assert_eq!(err.to_string(), "contact not found: 42");

        let err = ConfigError::MissingVar("IDENTITY_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: IDENTITY_API_KEY"
        );
    }

    #[test]
    fn test_store_not_found_maps_to_contact_not_found() {
        let err: ContactError = StoreError::NotFound("7".to_string()).into();
        assert!(matches!(err, ContactError::NotFound(id) if id == "7"));

        let err: ContactError = StoreError::Backend("lock poisoned".to_string()).into();
        assert!(matches!(err, ContactError::Store(StoreError::Backend(_))));
    }

    #[test]
    fn test_unreachable_number_message() {
        let err = ContactError::UnreachableNumber {
            number: "11999999999".to_string(),
            reason: "request timeout".to_string(),
        };
        assert!(err.to_string().contains("11999999999"));
        assert!(err.to_string().contains("request timeout"));
    }
}
