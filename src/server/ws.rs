//! Per-tenant WebSocket event streaming.
//!
//! Connected clients receive the tenant's contact change events as JSON text
//! frames. The channel is one-way and informational: no commands are accepted
//! over the socket, and clients must query the HTTP API for authoritative
//! state.

use crate::broadcast::{ContactEvent, EventBroadcaster};
use crate::domain::TenantId;
use crate::server::handlers::tenant_from_headers;
use crate::server::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Upgrade handler; the tenant header is checked before the upgrade so a
/// missing tenant is rejected with a plain HTTP error.
pub(super) async fn contact_events_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    match tenant_from_headers(&headers) {
        Ok(tenant) => {
            ws.on_upgrade(move |socket| handle_socket(socket, state.broadcaster.clone(), tenant))
        }
        Err(err) => err.into_response(),
    }
}

/// Stream the tenant's events until the client disconnects.
async fn handle_socket(socket: WebSocket, broadcaster: EventBroadcaster, tenant: TenantId) {
    info!(%tenant, "client subscribed to contact events");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<ContactEvent> = broadcaster.subscribe(tenant);

    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "failed to serialize contact event");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    debug!("client sent close frame");
                    break;
                }
                Ok(_) => {
                    // One-way channel; inbound frames are ignored
                }
                Err(e) => {
                    debug!(?e, "websocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!(%tenant, "client disconnected from contact events");
}
