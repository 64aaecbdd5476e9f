//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user records
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return a single user, or a `not_found` error.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
