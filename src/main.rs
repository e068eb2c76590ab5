//! Contact sync service - main entry point.
//!
//! Wires the identity client, validator, store, broadcaster, and service
//! together and serves the HTTP API.

use anyhow::Result;
use contact_sync::client::{AsyncIdentityClient, AsyncIdentityClientImpl, IdentityClient};
use contact_sync::server::{run_server, AppState};
use contact_sync::services::{ContactService, ContactServiceImpl};
use contact_sync::store::{ContactStore, InMemoryContactStore};
use contact_sync::validator::ContactValidator;
use contact_sync::{Config, EventBroadcaster};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("configuration loaded");
            cfg
        }
        Err(e) => {
            error!("failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        identity_api_url = %config.identity_api_url,
        blocked_numbers = config.blocked_numbers.len(),
        "starting contact sync service"
    );

    let sync_client = IdentityClient::new(&config);
    let client = Arc::new(AsyncIdentityClientImpl::new(sync_client)) as Arc<dyn AsyncIdentityClient>;
    let validator = Arc::new(ContactValidator::new(
        client,
        config.blocked_numbers.iter().cloned(),
    ));
    let store = Arc::new(InMemoryContactStore::new(config.page_size)) as Arc<dyn ContactStore>;
    let broadcaster = EventBroadcaster::new();
    let service = Arc::new(ContactServiceImpl::new(store, validator, broadcaster.clone()))
        as Arc<dyn ContactService>;

    run_server(
        AppState {
            service,
            broadcaster,
        },
        &config.bind_addr,
    )
    .await
}
