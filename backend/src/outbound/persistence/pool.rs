//! Async-safe connection pool for Diesel SQLite connections.
//!
//! This module wraps `diesel-async` and `bb8` to provide an ergonomic async
//! connection pool for the persistence layer. SQLite connections are
//! synchronous, so each one runs behind diesel-async's
//! [`SyncConnectionWrapper`], which moves blocking work off the runtime.
//!
//! # Design
//!
//! - Every new connection enables foreign keys and a busy timeout before it
//!   is handed out.
//! - An in-memory store lives inside exactly one connection, so in-memory
//!   pools hold a single connection that never expires.
//! - All errors are mapped to [`PoolError`] variants.

use std::time::Duration;

use diesel::{ConnectionError, ConnectionResult, SqliteConnection};
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Async SQLite connection type used by every repository.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Database location that keeps the store in memory.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Statements run on every freshly opened connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Underlying failure description.
        message: String,
    },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Underlying failure description.
        message: String,
    },
}

impl PoolError {
    /// Create a checkout error with the given message.
    #[must_use]
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    #[must_use]
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rentals::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("rentals.sqlite")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "rentals.sqlite");
/// assert!(!config.is_in_memory());
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the SQLite file at `database_url`.
    ///
    /// Uses sensible defaults:
    /// - `max_size`: 8 connections
    /// - `min_idle`: 1 connection
    /// - `connection_timeout`: 30 seconds
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 8,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Create a configuration for a private in-memory store.
    ///
    /// The store is discarded when the pool is dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_DATABASE).with_max_size(1)
    }

    /// Set the maximum number of connections in the pool.
    ///
    /// Ignored for in-memory stores, which always use one connection.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    #[must_use]
    pub const fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// `true` when the store lives in memory rather than in a file.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE
    }

    fn effective_max_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_size.max(1)
        }
    }

    // An idle or aged-out in-memory connection would take the store with it.
    fn idle_timeout(&self) -> Option<Duration> {
        (!self.is_in_memory()).then_some(IDLE_TIMEOUT)
    }

    fn max_lifetime(&self) -> Option<Duration> {
        (!self.is_in_memory()).then_some(MAX_LIFETIME)
    }

    fn effective_min_idle(&self) -> Option<u32> {
        if self.is_in_memory() {
            Some(1)
        } else {
            self.min_idle
        }
    }
}

fn establish_connection(url: &str) -> BoxFuture<'_, ConnectionResult<SqliteConn>> {
    async move {
        let mut conn = SqliteConn::establish(url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

/// Async connection pool for SQLite via Diesel.
///
/// # Example
///
/// ```ignore
/// let pool = DbPool::new(PoolConfig::in_memory()).await?;
/// let mut conn = pool.get().await?;
/// // Use conn for Diesel operations...
/// ```
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<SqliteConn>,
}

impl DbPool {
    /// Create a new connection pool, opening the initial connections now.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed (e.g.,
    /// the database file cannot be opened).
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let pool = Pool::builder()
            .max_size(config.effective_max_size())
            .min_idle(config.effective_min_idle())
            .connection_timeout(config.connection_timeout)
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .build(Self::manager(&config))
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Create a pool that opens connections on first use.
    ///
    /// Failures surface later as `PoolError::Checkout` from [`DbPool::get`],
    /// which lets the server start while the store is unavailable.
    #[must_use]
    pub fn new_lazy(config: &PoolConfig) -> Self {
        let pool = Pool::builder()
            .max_size(config.effective_max_size())
            .min_idle(config.effective_min_idle())
            .connection_timeout(config.connection_timeout)
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .build_unchecked(Self::manager(config));
        Self { inner: pool }
    }

    fn manager(config: &PoolConfig) -> AsyncDieselConnectionManager<SqliteConn> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish_connection);
        AsyncDieselConnectionManager::new_with_config(config.database_url(), manager_config)
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, SqliteConn>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
