//! Domain value objects and types.
//!
//! Type-safe wrappers for domain concepts: tenant identifiers, phone number
//! normalization and the digit-only canonical form, and email addresses.
//! Validation happens at construction time so invalid data cannot be
//! represented further down the pipeline.

pub mod email;
pub mod errors;
pub mod phone;
pub mod tenant;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::{normalize_number, CanonicalNumber};
pub use tenant::TenantId;
