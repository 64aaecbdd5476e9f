//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// One or more unique fields are already held by another user.
        Duplicate { fields: Vec<&'static str> } => "user fields already in use: {fields:?}",
    }
}

/// Driven port for storing user accounts.
///
/// Implementations own the uniqueness guarantee for `username` and `email`
/// and the cascade that removes a user's accomodations together with the
/// user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned identifier.
    ///
    /// Fails with [`UserPersistenceError::Duplicate`] naming every clashing
    /// field.
    async fn create(&self, profile: &UserProfile) -> Result<User, UserPersistenceError>;

    /// Return every stored user in ascending identifier order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the attributes of an existing user.
    ///
    /// Returns `Ok(None)` when no user has the given identifier. Uniqueness
    /// checks ignore the user being updated.
    async fn update(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a user and every accomodation it owns in one transaction.
    ///
    /// Returns the number of accomodations removed, or `Ok(None)` when no
    /// user has the given identifier.
    async fn delete(&self, id: UserId) -> Result<Option<usize>, UserPersistenceError>;
}
