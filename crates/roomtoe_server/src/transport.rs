//! WebSocket transport.
//!
//! Each socket gets a fresh connection id. A writer task drains the
//! connection's outbox into the socket while the read loop forwards parsed
//! frames to the hub. Frames that do not parse are logged and dropped.

use crate::config::ServerConfig;
use crate::hub::HubHandle;
use crate::protocol::ClientMessage;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::Method;
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

/// Builds the HTTP application: `/ws`, `/health`, and optional static files.
pub fn router(hub: HubHandle, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .with_state(hub);

    let app = match config.static_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving static files");
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    };

    app.layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any),
        ),
    )
}

async fn health() -> &'static str {
    "ok"
}

async fn ws_handler(State(hub): State<HubHandle>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(hub, socket))
}

#[instrument(skip_all)]
async fn handle_socket(hub: HubHandle, socket: WebSocket) {
    let (id, mut outbox) = hub.connect();
    info!(connection = %id, "Client connected");

    let (mut sink, mut stream) = socket.split();

    // Ends once the hub drops this connection's sender.
    tokio::spawn(async move {
        while let Some(message) = outbox.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    warn!(connection = %id, error = %e, "Failed to encode message");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!(connection = %id, "Socket closed while sending");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(message) => hub.send(id, message),
                Err(e) => warn!(connection = %id, error = %e, "Malformed message dropped"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(connection = %id, error = %e, "Socket read failed");
                break;
            }
        }
    }

    hub.disconnect(id);
    info!(connection = %id, "Client disconnected");
}
