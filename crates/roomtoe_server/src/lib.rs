//! Two-player tic-tac-toe room server.
//!
//! # Architecture
//!
//! - **Coordinator**: owns every room, applies player intents, and decides
//!   which connections hear about the result
//! - **Store**: the injectable code-to-room mapping the coordinator works on
//! - **Hub**: a single task feeding transport events to the coordinator one at
//!   a time and delivering its dispatches
//! - **Transport**: axum WebSocket endpoint speaking the JSON [`protocol`]
//!
//! All room state lives in one process. Running several server processes
//! would need an external shared store behind [`RoomStore`] and a shared
//! broadcast channel; neither exists here.
//!
//! # Example
//!
//! ```no_run
//! use roomtoe_server::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod connection;
mod coordinator;
mod error;
mod hub;
pub mod protocol;
mod room;
mod server;
mod store;
mod transport;

pub use config::{ConfigError, DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use connection::{ConnectionId, ConnectionRegistry, OUTBOX_CAPACITY};
pub use coordinator::{Dispatch, RoomCoordinator};
pub use error::RoomError;
pub use hub::{Hub, HubEvent, HubHandle};
pub use room::{MAX_PLAYERS, Player, Room, RoomCode, RoomPhase};
pub use server::{serve, serve_with_listener};
pub use store::{MemoryRoomStore, RoomStore};
pub use transport::router;
