//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`]. Field
//! validation happens here; uniqueness and the cascading delete are delegated
//! to the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, FieldError, User, UserDraft, UserId, ValidationErrors};

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::Duplicate { fields } => fields
                .into_iter()
                .map(FieldError::taken)
                .collect::<ValidationErrors>()
                .into(),
        }
    }

    fn not_found(id: UserId) -> Error {
        Error::not_found(format!("user {id} not found"))
    }

    async fn find(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.find(id).await
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let profile = draft.validate()?;
        let user = self
            .repository
            .create(&profile)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        let current = self.find(id).await?;
        let profile = draft.merge_onto(current.profile()).validate()?;
        let user = self
            .repository
            .update(id, &profile)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))?;
        debug!(user_id = %id, accomodations = removed, "cascaded accomodation delete");
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
