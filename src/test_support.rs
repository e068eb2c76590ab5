//! Test doubles shared across unit tests.

use crate::client::{AsyncIdentityClient, ResolvedIdentity};
use crate::domain::TenantId;
use crate::error::{IdentityError, IdentityResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the mock identity service responds to every lookup.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Every number resolves; the returned jid prepends a country code to the
    /// input, mimicking network-side normalization.
    ResolveAll,
    /// Every number is unknown to the network.
    Unknown,
    /// Every lookup fails at the transport level.
    Fail,
}

/// In-process stand-in for the identity service, with a call counter so tests
/// can assert that no network round-trip happened.
pub struct MockIdentityClient {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockIdentityClient {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AsyncIdentityClient for MockIdentityClient {
    async fn resolve_number(
        &self,
        number: &str,
        _tenant: TenantId,
    ) -> IdentityResult<ResolvedIdentity> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::ResolveAll => Ok(ResolvedIdentity {
                jid: format!("55{}@s.whatsapp.net", number),
                exists: true,
            }),
            MockBehavior::Unknown => Ok(ResolvedIdentity {
                jid: String::new(),
                exists: false,
            }),
            MockBehavior::Fail => Err(IdentityError::HttpError("Connection failed".to_string())),
        }
    }
}
