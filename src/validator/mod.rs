//! Two-stage contact validation.
//!
//! Stage one checks tenant acceptability rules locally, so obviously bad
//! input never costs a network round-trip. Stage two resolves the number
//! against the external messaging network; the identity it returns is the
//! source of the stored number, which keeps records from diverging when the
//! network reformats input (country-code normalization and the like).

use crate::client::{AsyncIdentityClient, ResolvedIdentity};
use crate::domain::{CanonicalNumber, TenantId};
use crate::error::{ContactError, IdentityError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Validates candidate numbers for the contact pipeline.
pub struct ContactValidator {
    client: Arc<dyn AsyncIdentityClient>,
    blocked_numbers: HashSet<String>,
}

impl ContactValidator {
    pub fn new(
        client: Arc<dyn AsyncIdentityClient>,
        blocked_numbers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            client,
            blocked_numbers: blocked_numbers.into_iter().collect(),
        }
    }

    /// Check tenant acceptability rules for a candidate number.
    ///
    /// Runs no network I/O. Failing here is terminal for the enclosing
    /// request: a blocked or malformed number is never resolved.
    pub fn check_is_valid_contact(
        &self,
        number: &str,
        tenant: TenantId,
    ) -> Result<(), ContactError> {
        debug!(%tenant, number, "checking contact acceptability");

        if CanonicalNumber::new(number).is_err() || self.blocked_numbers.contains(number) {
            return Err(ContactError::InvalidContact(number.to_string()));
        }

        Ok(())
    }

    /// Resolve the candidate number to its canonical routable identity.
    ///
    /// A full network round-trip with no retries; transport failures and
    /// numbers the network does not know both surface as
    /// [`ContactError::UnreachableNumber`].
    pub async fn check_contact_number(
        &self,
        number: &str,
        tenant: TenantId,
    ) -> Result<ResolvedIdentity, ContactError> {
        let identity = self
            .client
            .resolve_number(number, tenant)
            .await
            .map_err(|e| unreachable_number(number, e))?;

        if !identity.exists {
            return Err(ContactError::UnreachableNumber {
                number: number.to_string(),
                reason: "number is not registered on the messaging network".to_string(),
            });
        }

        Ok(identity)
    }
}

fn unreachable_number(number: &str, err: IdentityError) -> ContactError {
    ContactError::UnreachableNumber {
        number: number.to_string(),
        reason: err.to_string(),
    }
}
