//! Process entry: hub task plus HTTP listener.

use crate::config::ServerConfig;
use crate::coordinator::RoomCoordinator;
use crate::hub::Hub;
use crate::store::MemoryRoomStore;
use crate::transport::router;
use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Binds the configured address and serves until Ctrl+C.
#[instrument(skip(config), fields(host = %config.host(), port = *config.port()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind((config.host().as_str(), *config.port())).await?;
    serve_with_listener(listener, config).await
}

/// Serves on an already bound listener until Ctrl+C.
pub async fn serve_with_listener(listener: TcpListener, config: ServerConfig) -> Result<()> {
    let (hub, handle) = Hub::new(RoomCoordinator::new(MemoryRoomStore::new()));
    tokio::spawn(hub.run());

    let app = router(handle, &config);
    let addr = listener.local_addr()?;
    info!(%addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
