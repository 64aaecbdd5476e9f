//! SQLite-backed `AccomodationRepository` implementation using Diesel ORM.
//!
//! Writes confirm that the owning user exists within the same transaction as
//! the insert or update; the foreign key on `accomodations.user_id` remains
//! the final guard. Both writes run under `BEGIN IMMEDIATE` so the owner
//! check never has to upgrade a shared lock.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccomodationPersistenceError, AccomodationRepository};
use crate::domain::{Accomodation, AccomodationDetails, AccomodationId, UserId};

use super::diesel_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AccomodationRow, AccomodationUpdate, NewAccomodationRow};
use super::pool::{DbPool, PoolError, SqliteConn};
use super::schema::{accomodations, users};

/// Diesel-backed implementation of the `AccomodationRepository` port.
#[derive(Clone)]
pub struct DieselAccomodationRepository {
    pool: DbPool,
}

impl DieselAccomodationRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a write transaction.
#[derive(Debug)]
enum WriteError {
    Diesel(DieselError),
    UnknownOwner(UserId),
}

impl From<DieselError> for WriteError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> AccomodationPersistenceError {
    map_basic_pool_error(error, |message| {
        AccomodationPersistenceError::connection(message)
    })
}

fn map_diesel_error(error: DieselError) -> AccomodationPersistenceError {
    map_basic_diesel_error(
        error,
        |message| AccomodationPersistenceError::query(message),
        |message| AccomodationPersistenceError::connection(message),
    )
}

fn map_write_error(error: WriteError, owner: UserId) -> AccomodationPersistenceError {
    match error {
        WriteError::UnknownOwner(user_id) => {
            AccomodationPersistenceError::unknown_owner(user_id.get())
        }
        WriteError::Diesel(error) if is_foreign_key_violation(&error) => {
            AccomodationPersistenceError::unknown_owner(owner.get())
        }
        WriteError::Diesel(error) => map_diesel_error(error),
    }
}

fn row_to_accomodation(row: AccomodationRow) -> Result<Accomodation, AccomodationPersistenceError> {
    let id = row.id;
    Accomodation::try_from(row).map_err(|err| {
        AccomodationPersistenceError::query(format!("stored accomodation {id} is invalid: {err}"))
    })
}

async fn ensure_owner_exists(conn: &mut SqliteConn, owner: UserId) -> Result<(), WriteError> {
    let found: bool = diesel::select(exists(users::table.find(owner.get())))
        .get_result(conn)
        .await?;
    if found {
        Ok(())
    } else {
        Err(WriteError::UnknownOwner(owner))
    }
}

#[async_trait]
impl AccomodationRepository for DieselAccomodationRepository {
    async fn create(
        &self,
        details: &AccomodationDetails,
    ) -> Result<Accomodation, AccomodationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = details.user_id();
        let new_row = NewAccomodationRow::from_details(details, Utc::now().naive_utc());

        let row = conn
            .immediate_transaction::<_, WriteError, _>(|conn| {
                async move {
                    ensure_owner_exists(conn, owner).await?;
                    let row = diesel::insert_into(accomodations::table)
                        .values(&new_row)
                        .returning(AccomodationRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, owner))?;

        row_to_accomodation(row)
    }

    async fn list(&self) -> Result<Vec<Accomodation>, AccomodationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AccomodationRow> = accomodations::table
            .order(accomodations::id.asc())
            .select(AccomodationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_accomodation).collect()
    }

    async fn find_by_id(
        &self,
        id: AccomodationId,
    ) -> Result<Option<Accomodation>, AccomodationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccomodationRow> = accomodations::table
            .find(id.get())
            .select(AccomodationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_accomodation).transpose()
    }

    async fn update(
        &self,
        id: AccomodationId,
        details: &AccomodationDetails,
    ) -> Result<Option<Accomodation>, AccomodationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = details.user_id();
        let changes = AccomodationUpdate::from_details(details, Utc::now().naive_utc());

        let row = conn
            .immediate_transaction::<_, WriteError, _>(|conn| {
                async move {
                    ensure_owner_exists(conn, owner).await?;
                    let row = diesel::update(accomodations::table.find(id.get()))
                        .set(&changes)
                        .returning(AccomodationRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, owner))?;

        row.map(row_to_accomodation).transpose()
    }

    async fn delete(&self, id: AccomodationId) -> Result<bool, AccomodationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(accomodations::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for accomodation repository error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::build("unable to open database file"));

        assert!(matches!(
            repo_err,
            AccomodationPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn missing_owner_maps_to_unknown_owner() {
        let repo_err = map_write_error(WriteError::UnknownOwner(UserId::new(7)), UserId::new(7));

        assert_eq!(repo_err, AccomodationPersistenceError::unknown_owner(7));
    }

    #[rstest]
    fn other_diesel_errors_map_to_query_error() {
        let repo_err = map_write_error(WriteError::Diesel(DieselError::NotFound), UserId::new(1));

        assert!(matches!(repo_err, AccomodationPersistenceError::Query { .. }));
    }
}
