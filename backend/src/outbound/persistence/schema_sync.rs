//! Startup schema synchronisation for the SQLite store.
//!
//! The schema is applied from the SQL files under `migrations/`, which are
//! embedded at compile time. [`SchemaMode::Replace`] drops and recreates the
//! tables on every start so each run begins with an empty store;
//! [`SchemaMode::Preserve`] only creates what is missing.

use std::fmt;
use std::str::FromStr;

use diesel_async::SimpleAsyncConnection;
use tracing::{info, warn};

use super::pool::{DbPool, PoolError};

const CREATE_SCHEMA: &str =
    include_str!("../../../migrations/2024-05-01-120000_create_users_and_accomodations/up.sql");
const DROP_SCHEMA: &str =
    include_str!("../../../migrations/2024-05-01-120000_create_users_and_accomodations/down.sql");

/// How the schema is reconciled with the store at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMode {
    /// Drop existing tables, then create them afresh.
    #[default]
    Replace,
    /// Keep existing tables and data; create missing tables only.
    Preserve,
}

impl SchemaMode {
    /// Lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Preserve => "preserve",
        }
    }
}

impl fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`SchemaMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schema mode `{0}`; expected `replace` or `preserve`")]
pub struct ParseSchemaModeError(String);

impl FromStr for SchemaMode {
    type Err = ParseSchemaModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "preserve" => Ok(Self::Preserve),
            _ => Err(ParseSchemaModeError(value.to_owned())),
        }
    }
}

/// Errors raised while synchronising the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaSyncError {
    /// No connection could be obtained.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// A schema statement failed.
    #[error("schema statement failed: {message}")]
    Statement {
        /// Underlying failure description.
        message: String,
    },
}

/// Bring the store's schema in line with the embedded migration.
///
/// # Errors
///
/// Returns [`SchemaSyncError`] when no connection is available or a
/// statement fails. Replace mode runs inside one transaction, so a failure
/// leaves the previous schema untouched.
pub async fn sync_schema(pool: &DbPool, mode: SchemaMode) -> Result<(), SchemaSyncError> {
    let mut conn = pool.get().await?;
    let script = match mode {
        SchemaMode::Replace => {
            warn!("replacing store schema; existing users and accomodations are discarded");
            format!("BEGIN;\n{DROP_SCHEMA}\n{CREATE_SCHEMA}\nCOMMIT;")
        }
        SchemaMode::Preserve => CREATE_SCHEMA.to_owned(),
    };

    if let Err(err) = conn.batch_execute(&script).await {
        if mode == SchemaMode::Replace {
            // a failed statement leaves the explicit transaction open
            if let Err(rollback_err) = conn.batch_execute("ROLLBACK;").await {
                warn!(error = %rollback_err, "schema replace rollback failed");
            }
        }
        return Err(SchemaSyncError::Statement {
            message: err.to_string(),
        });
    }

    info!(mode = %mode, "store schema synchronised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::PoolConfig;
    use rstest::rstest;

    #[rstest]
    #[case("replace", SchemaMode::Replace)]
    #[case("Preserve", SchemaMode::Preserve)]
    #[case(" REPLACE ", SchemaMode::Replace)]
    fn parses_mode_names(#[case] raw: &str, #[case] expected: SchemaMode) {
        assert_eq!(raw.parse::<SchemaMode>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_mode() {
        let err = "truncate".parse::<SchemaMode>().expect_err("unknown mode");
        assert!(err.to_string().contains("truncate"));
    }

    #[rstest]
    #[tokio::test]
    async fn replace_discards_existing_rows() {
        let pool = DbPool::new(PoolConfig::in_memory()).await.expect("pool");
        sync_schema(&pool, SchemaMode::Replace).await.expect("first sync");
        {
            let mut conn = pool.get().await.expect("checkout");
            conn.batch_execute(
                "INSERT INTO users (username, email, profile_picture, created_at, updated_at) \
                 VALUES ('a', 'a@test.com', 'https://x.test/a.jpg', '2024-01-01 00:00:00', '2024-01-01 00:00:00')",
            )
            .await
            .expect("seed row");
        }

        sync_schema(&pool, SchemaMode::Replace).await.expect("second sync");

        let mut conn = pool.get().await.expect("checkout");
        conn.batch_execute(
            "INSERT INTO users (username, email, profile_picture, created_at, updated_at) \
             VALUES ('a', 'a@test.com', 'https://x.test/a.jpg', '2024-01-01 00:00:00', '2024-01-01 00:00:00')",
        )
        .await
        .expect("unique username is free again");
    }

    #[rstest]
    #[tokio::test]
    async fn preserve_is_idempotent() {
        let pool = DbPool::new(PoolConfig::in_memory()).await.expect("pool");

        sync_schema(&pool, SchemaMode::Preserve).await.expect("first sync");
        sync_schema(&pool, SchemaMode::Preserve).await.expect("second sync");
    }
}
