//! Driving port for accomodation queries.

use async_trait::async_trait;

use crate::domain::{Accomodation, AccomodationId, Error};

/// Domain use-case port for reading accomodations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccomodationsQuery: Send + Sync {
    /// Return every accomodation.
    async fn list_accomodations(&self) -> Result<Vec<Accomodation>, Error>;

    /// Return a single accomodation, or a `not_found` error.
    async fn get_accomodation(&self, id: AccomodationId) -> Result<Accomodation, Error>;
}
