//! EmailAddress value object.

use super::errors::ValidationError;
use std::fmt;

/// A structurally validated email address.
///
/// Validation is intentionally shallow: one `@`, a non-empty local part, and
/// a dotted domain with no empty labels. Used by bulk import to reject rows
/// with obviously broken optional emails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an email address.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the structure is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();

        let Some((local, domain)) = email.split_once('@') else {
            return Err(ValidationError::InvalidEmail(email));
        };

        let well_formed = !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && domain.split('.').all(|label| !label.is_empty())
            && !email.chars().any(char::is_whitespace);

        if !well_formed {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validates_structure() {
        assert!(EmailAddress::new("user@example.com").is_ok());
        assert!(EmailAddress::new("user.name+tag@example.co.uk").is_ok());

        assert!(EmailAddress::new("plainaddress").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@").is_err());
        assert!(EmailAddress::new("user@domain").is_err());
        assert!(EmailAddress::new("user@@example.com").is_err());
        assert!(EmailAddress::new("user@example..com").is_err());
        assert!(EmailAddress::new("user name@example.com").is_err());
    }

    #[test]
    fn test_email_accessors() {
        let email = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
        assert_eq!(format!("{}", email), "user@example.com");
        assert_eq!(email.into_inner(), "user@example.com");
    }
}
