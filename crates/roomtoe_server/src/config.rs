//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Bind address used when neither `--host` nor `HOST` is set.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Resolved settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,
    /// Port to listen on.
    port: u16,
    /// Directory served for paths other than `/ws` and `/health`.
    static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST.to_string(), DEFAULT_PORT, None)
    }
}

impl ServerConfig {
    /// Checks the settings before the server binds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a blank host or a static directory that
    /// does not exist.
    #[instrument]
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::new("Host must not be empty".to_string()));
        }

        if let Some(dir) = &self.static_dir
            && !dir.is_dir()
        {
            return Err(ConfigError::new(format!(
                "Static directory not found: {}",
                dir.display()
            )));
        }

        debug!("Config validated");
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
