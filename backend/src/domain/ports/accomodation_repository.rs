//! Port abstraction for accomodation persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Accomodation, AccomodationDetails, AccomodationId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by accomodation repository adapters.
    pub enum AccomodationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "accomodation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "accomodation repository query failed: {message}",
        /// The referenced owner does not exist.
        UnknownOwner { user_id: i32 } => "owner user {user_id} does not exist",
    }
}

/// Driven port for storing rental listings.
///
/// Writes verify that the owning user exists in the same transaction as the
/// insert or update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccomodationRepository: Send + Sync {
    /// Insert a new listing and return it with its assigned identifier.
    async fn create(
        &self,
        details: &AccomodationDetails,
    ) -> Result<Accomodation, AccomodationPersistenceError>;

    /// Return every stored listing in ascending identifier order.
    async fn list(&self) -> Result<Vec<Accomodation>, AccomodationPersistenceError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(
        &self,
        id: AccomodationId,
    ) -> Result<Option<Accomodation>, AccomodationPersistenceError>;

    /// Replace the attributes of an existing listing.
    ///
    /// Returns `Ok(None)` when no listing has the given identifier.
    async fn update(
        &self,
        id: AccomodationId,
        details: &AccomodationDetails,
    ) -> Result<Option<Accomodation>, AccomodationPersistenceError>;

    /// Delete a listing, returning `false` when it did not exist.
    async fn delete(&self, id: AccomodationId) -> Result<bool, AccomodationPersistenceError>;
}
