//! HTTP client for the messaging-network identity service.
//!
//! This module provides a synchronous HTTP client that can be used from async
//! contexts via `tokio::task::spawn_blocking`. The client handles
//! authentication, error mapping, and the number-resolution round-trip.

mod async_wrapper;
pub use async_wrapper::{AsyncIdentityClient, AsyncIdentityClientImpl};

use crate::config::Config;
use crate::domain::TenantId;
use crate::error::{IdentityError, IdentityResult};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// A canonical identity resolved by the messaging network.
///
/// The digits extracted from `jid` become the stored contact number; the
/// network may reformat what the caller supplied (country-code
/// normalization), so the raw input is only ever a candidate.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Routable identifier, e.g. `5511999999999@s.whatsapp.net`.
    pub jid: String,

    /// Whether the number is registered on the network.
    #[serde(default)]
    pub exists: bool,
}

impl ResolvedIdentity {
    /// Digit-only form of the routable identifier.
    pub fn digits(&self) -> String {
        self.jid.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// HTTP client for the identity-resolution endpoint.
///
/// Uses `ureq` for synchronous requests; call it from async code through
/// [`AsyncIdentityClient`].
#[derive(Clone)]
pub struct IdentityClient {
    /// Base URL of the identity service
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl IdentityClient {
    /// Create a new IdentityClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.identity_api_url.clone(),
            api_key: config.identity_api_key.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create an IdentityClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Resolve a number against the messaging network for one tenant session.
    ///
    /// This is the slow call of the pipeline: a full network round-trip with
    /// no retries. A hung call stalls the enclosing request until the agent
    /// timeout fires.
    pub fn resolve_number(
        &self,
        number: &str,
        tenant: TenantId,
    ) -> IdentityResult<ResolvedIdentity> {
        let path = format!(
            "/sessions/{}/contacts/check?number={}",
            tenant,
            urlencoding::encode(number)
        );
        let url = self.build_url(&path);

        tracing::debug!(%tenant, number, "resolving number against identity service");

        let response = self
            .agent
            .get(&url)
            .set("x-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| self.map_error(e))?;

        let body = response
            .into_string()
            .map_err(|e| IdentityError::HttpError(e.to_string()))?;

        let identity: ResolvedIdentity =
            serde_json::from_str(&body).map_err(IdentityError::JsonError)?;

        tracing::debug!(%tenant, jid = %identity.jid, exists = identity.exists, "number resolved");
        Ok(identity)
    }

    /// Map a ureq error to an IdentityError.
    fn map_error(&self, error: ureq::Error) -> IdentityError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => IdentityError::Unauthorized,
                    404 => IdentityError::NotFound(message),
                    429 => IdentityError::RateLimitExceeded,
                    _ => IdentityError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    IdentityError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    IdentityError::Timeout
                } else {
                    IdentityError::HttpError(transport.to_string())
                }
            }
        }
    }
}
