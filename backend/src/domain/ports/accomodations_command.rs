//! Driving port for accomodation mutations.

use async_trait::async_trait;

use crate::domain::{Accomodation, AccomodationDraft, AccomodationId, Error};

/// Domain use-case port for changing accomodations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccomodationsCommand: Send + Sync {
    /// Validate and store a new accomodation.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when a field fails validation or the owning
    /// user does not exist.
    async fn create_accomodation(&self, draft: AccomodationDraft) -> Result<Accomodation, Error>;

    /// Merge `draft` onto the stored accomodation, validate and store it.
    async fn update_accomodation(
        &self,
        id: AccomodationId,
        draft: AccomodationDraft,
    ) -> Result<Accomodation, Error>;

    /// Delete an accomodation.
    async fn delete_accomodation(&self, id: AccomodationId) -> Result<(), Error>;
}
