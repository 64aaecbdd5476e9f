//! Shared Diesel error mapping for the SQLite repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// `true` when SQLite reports the store as busy, locked or gone.
fn is_unavailable(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("database is locked")
        || lower.contains("database is busy")
        || lower.contains("unable to open database")
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Closed connections and lock timeouts become connection errors; anything
/// else is a query error carrying the driver's message.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) if is_unavailable(info.message()) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

/// Column names named by a SQLite `UNIQUE constraint failed` error.
///
/// SQLite reports `UNIQUE constraint failed: users.email` (comma separated
/// when the constraint spans several columns). Returns `None` for any other
/// error.
pub(crate) fn unique_violation_columns(error: &DieselError) -> Option<Vec<String>> {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = error else {
        return None;
    };
    let (_, columns) = info.message().split_once(':')?;
    Some(
        columns
            .split(',')
            .filter_map(|qualified| {
                let name = qualified.trim();
                let column = name.rsplit_once('.').map_or(name, |(_, column)| column);
                (!column.is_empty()).then(|| column.to_owned())
            })
            .collect(),
    )
}

/// `true` when the error is a foreign-key constraint failure.
pub(crate) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}
