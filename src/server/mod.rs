//! HTTP API and WebSocket event stream.
//!
//! Routing is a thin surface over [`ContactService`]; every route resolves
//! the acting tenant from the `x-company-id` header. Authentication and
//! tenant-resolution middleware live outside this service.

mod handlers;
mod ws;

use crate::broadcast::EventBroadcaster;
use crate::services::ContactService;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
    pub broadcaster: EventBroadcaster,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(handlers::list).post(handlers::create))
        .route("/contacts/import", post(handlers::bulk_import))
        .route("/contacts/lookup", post(handlers::lookup))
        .route("/contacts/simple", get(handlers::simple_list))
        .route(
            "/contacts/{id}",
            get(handlers::show)
                .put(handlers::update)
                .delete(handlers::remove),
        )
        .route("/ws/contacts", get(ws::contact_events_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(%bind_addr, "contact sync server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
