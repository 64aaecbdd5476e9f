//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Uniqueness of `username` and `email` is checked inside the write
//! transaction so every clashing field can be reported at once; the table's
//! `UNIQUE` constraints remain the final guard. Deleting a user removes its
//! accomodations in the same transaction.
//!
//! Write transactions open with `BEGIN IMMEDIATE`. A deferred transaction
//! that reads before it writes must upgrade its lock, and SQLite answers a
//! contended upgrade with `SQLITE_BUSY` without consulting the busy timeout.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{EMAIL_FIELD, USERNAME_FIELD};
use crate::domain::{User, UserId, UserProfile};

use super::diesel_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_columns,
};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError, SqliteConn};
use super::schema::{accomodations, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use rentals::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("rentals.sqlite")).await?;
    /// let repository = DieselUserRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a write transaction.
#[derive(Debug)]
enum WriteError {
    Diesel(DieselError),
    Duplicate(Vec<&'static str>),
}

impl From<DieselError> for WriteError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    if let Some(columns) = unique_violation_columns(&error) {
        let fields = public_field_names(&columns);
        if !fields.is_empty() {
            return UserPersistenceError::duplicate(fields);
        }
    }
    map_basic_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

fn map_write_error(error: WriteError) -> UserPersistenceError {
    match error {
        WriteError::Diesel(error) => map_diesel_error(error),
        WriteError::Duplicate(fields) => UserPersistenceError::duplicate(fields),
    }
}

fn public_field_names(columns: &[String]) -> Vec<&'static str> {
    columns
        .iter()
        .filter_map(|column| match column.as_str() {
            "username" => Some(USERNAME_FIELD),
            "email" => Some(EMAIL_FIELD),
            _ => None,
        })
        .collect()
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id} is invalid: {err}")))
}

/// Report which of `profile`'s unique fields are held by another user.
async fn clashing_fields(
    conn: &mut SqliteConn,
    profile: &UserProfile,
    exclude: Option<UserId>,
) -> Result<Vec<&'static str>, DieselError> {
    let username = profile.username().as_ref();
    let email = profile.email().as_ref();
    let holders: Vec<(String, String)> = users::table
        .filter(users::id.ne(exclude.map_or(0, UserId::get)))
        .filter(users::username.eq(username).or(users::email.eq(email)))
        .select((users::username, users::email))
        .load(conn)
        .await?;

    let mut fields = Vec::new();
    if holders.iter().any(|(held, _)| held == username) {
        fields.push(USERNAME_FIELD);
    }
    if holders.iter().any(|(_, held)| held == email) {
        fields.push(EMAIL_FIELD);
    }
    Ok(fields)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, profile: &UserProfile) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow::from_profile(profile, Utc::now().naive_utc());

        let row = conn
            .immediate_transaction::<_, WriteError, _>(|conn| {
                async move {
                    let clashes = clashing_fields(conn, profile, None).await?;
                    if !clashes.is_empty() {
                        return Err(WriteError::Duplicate(clashes));
                    }

                    let row = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write_error)?;

        row_to_user(row)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserUpdate::from_profile(profile, Utc::now().naive_utc());

        let row = conn
            .immediate_transaction::<_, WriteError, _>(|conn| {
                async move {
                    let clashes = clashing_fields(conn, profile, Some(id)).await?;
                    if !clashes.is_empty() {
                        return Err(WriteError::Duplicate(clashes));
                    }

                    let row = diesel::update(users::table.find(id.get()))
                        .set(&changes)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write_error)?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<Option<usize>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .immediate_transaction::<_, DieselError, _>(|conn| {
                async move {
                    let removed = diesel::delete(
                        accomodations::table.filter(accomodations::user_id.eq(id.get())),
                    )
                    .execute(conn)
                    .await?;
                    let deleted = diesel::delete(users::table.find(id.get()))
                        .execute(conn)
                        .await?;
                    Ok((deleted > 0).then_some(removed))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        if let Some(removed) = outcome {
            debug!(user_id = %id, accomodations = removed, "user rows deleted");
        }
        Ok(outcome)
    }
}
