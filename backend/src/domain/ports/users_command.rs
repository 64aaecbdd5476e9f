//! Driving port for user mutations.
//!
//! The [`UsersCommand`] trait is the inbound contract for creating, updating
//! and deleting users. Implementations validate drafts and translate
//! persistence failures into domain [`Error`]s.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for changing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when any field fails validation and
    /// `unique_violation` when only uniqueness checks fail.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Merge `draft` onto the stored user, validate the result and store it.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for an unknown identifier, otherwise the same
    /// errors as [`UsersCommand::create_user`].
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Delete a user together with all of its accomodations.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
