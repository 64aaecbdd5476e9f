//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `RENTALS_*` environment variables, configuration files
//! and command-line flags, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{ParseSchemaModeError, PoolConfig, SchemaMode};

const DEFAULT_DB_PATH: &str = "rentals.sqlite";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuration values for the rentals server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RENTALS")]
pub struct ServerSettings {
    /// SQLite database file.
    pub db_path: Option<PathBuf>,
    /// Use an ephemeral in-memory store instead of `db_path`.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// `replace` rebuilds the schema at startup; `preserve` keeps stored rows.
    pub schema_mode: Option<String>,
}

impl ServerSettings {
    /// Return the configured database path, falling back to the default.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.db_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DB_PATH))
    }

    /// Pool settings for the selected store.
    ///
    /// # Examples
    /// ```
    /// use rentals::settings::ServerSettings;
    ///
    /// let settings = ServerSettings {
    ///     db_path: None,
    ///     in_memory: true,
    ///     bind_addr: None,
    ///     schema_mode: None,
    /// };
    /// assert!(settings.pool_config().is_in_memory());
    /// ```
    #[must_use]
    pub fn pool_config(&self) -> PoolConfig {
        if self.in_memory {
            PoolConfig::in_memory()
        } else {
            PoolConfig::new(self.db_path().to_string_lossy())
        }
    }

    /// Parse the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Parse the schema mode, defaulting to [`SchemaMode::Replace`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseSchemaModeError`] for values other than `replace` or
    /// `preserve`.
    pub fn schema_mode(&self) -> Result<SchemaMode, ParseSchemaModeError> {
        self.schema_mode
            .as_deref()
            .map_or(Ok(SchemaMode::default()), str::parse)
    }
}
