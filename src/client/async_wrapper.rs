//! Async wrapper around the synchronous IdentityClient.
//!
//! HTTP operations run on the blocking thread pool via
//! `tokio::task::spawn_blocking`, keeping the async runtime responsive while
//! a resolution round-trip is in flight.

use crate::client::{IdentityClient, ResolvedIdentity};
use crate::domain::TenantId;
use crate::error::{IdentityError, IdentityResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface to the identity-resolution service.
///
/// The trait seam is what lets the validator and its tests substitute a mock
/// for the real HTTP client.
#[async_trait]
pub trait AsyncIdentityClient: Send + Sync {
    async fn resolve_number(
        &self,
        number: &str,
        tenant: TenantId,
    ) -> IdentityResult<ResolvedIdentity>;
}

/// Production implementation backed by the sync ureq client.
#[derive(Clone)]
pub struct AsyncIdentityClientImpl {
    client: Arc<IdentityClient>,
}

impl AsyncIdentityClientImpl {
    pub fn new(client: IdentityClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncIdentityClient for AsyncIdentityClientImpl {
    async fn resolve_number(
        &self,
        number: &str,
        tenant: TenantId,
    ) -> IdentityResult<ResolvedIdentity> {
        let client = self.client.clone();
        let number = number.to_string();

        tokio::task::spawn_blocking(move || client.resolve_number(&number, tenant))
            .await
            .map_err(|e| IdentityError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_async_wrapper_delegates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/sessions/9/contacts/check")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"exists":true,"jid":"5511777777777@s.whatsapp.net"}"#)
            .create_async()
            .await;

        let sync_client = IdentityClient::with_base_url(server.url(), "key".to_string());
        let client = AsyncIdentityClientImpl::new(sync_client);

        let identity = client
            .resolve_number("11777777777", TenantId::new(9))
            .await
            .unwrap();
        assert_eq!(identity.digits(), "5511777777777");
    }
}
