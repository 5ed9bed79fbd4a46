//! Command-line interface for roomtoe_server.

use clap::Parser;
use roomtoe_server::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use std::path::PathBuf;

/// Roomtoe - two-player tic-tac-toe rooms over WebSockets
#[derive(Parser, Debug)]
#[command(name = "roomtoe_server")]
#[command(about = "Two-player tic-tac-toe room server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Directory of browser client files to serve
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        ServerConfig::new(cli.host, cli.port, cli.static_dir)
    }
}
