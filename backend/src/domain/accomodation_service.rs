//! Accomodation domain service.
//!
//! Implements the accomodation driving ports on top of an
//! [`AccomodationRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::accomodation::USER_ID_FIELD;
use crate::domain::ports::{
    AccomodationPersistenceError, AccomodationRepository, AccomodationsCommand, AccomodationsQuery,
};
use crate::domain::{
    Accomodation, AccomodationDraft, AccomodationId, Error, FieldError, FieldErrorCode,
    ValidationErrors,
};

/// Accomodation service implementing [`AccomodationsCommand`] and
/// [`AccomodationsQuery`].
#[derive(Clone)]
pub struct AccomodationService<R> {
    repository: Arc<R>,
}

impl<R> AccomodationService<R> {
    /// Create a new service over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> AccomodationService<R>
where
    R: AccomodationRepository,
{
    fn map_persistence_error(error: AccomodationPersistenceError) -> Error {
        match error {
            AccomodationPersistenceError::Connection { message } => Error::service_unavailable(
                format!("accomodation repository unavailable: {message}"),
            ),
            AccomodationPersistenceError::Query { message } => {
                Error::internal(format!("accomodation repository error: {message}"))
            }
            AccomodationPersistenceError::UnknownOwner { user_id } => {
                ValidationErrors::from(FieldError::new(
                    USER_ID_FIELD,
                    FieldErrorCode::UnknownUser,
                    format!("userId {user_id} does not reference an existing user"),
                ))
                .into()
            }
        }
    }

    fn not_found(id: AccomodationId) -> Error {
        Error::not_found(format!("accomodation {id} not found"))
    }

    async fn find(&self, id: AccomodationId) -> Result<Accomodation, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R> AccomodationsQuery for AccomodationService<R>
where
    R: AccomodationRepository,
{
    async fn list_accomodations(&self) -> Result<Vec<Accomodation>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn get_accomodation(&self, id: AccomodationId) -> Result<Accomodation, Error> {
        self.find(id).await
    }
}

#[async_trait]
impl<R> AccomodationsCommand for AccomodationService<R>
where
    R: AccomodationRepository,
{
    async fn create_accomodation(&self, draft: AccomodationDraft) -> Result<Accomodation, Error> {
        let details = draft.validate()?;
        let accomodation = self
            .repository
            .create(&details)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(
            accomodation_id = %accomodation.id(),
            user_id = %accomodation.user_id(),
            "accomodation created"
        );
        Ok(accomodation)
    }

    async fn update_accomodation(
        &self,
        id: AccomodationId,
        draft: AccomodationDraft,
    ) -> Result<Accomodation, Error> {
        let current = self.find(id).await?;
        let details = draft.merge_onto(current.details()).validate()?;
        let accomodation = self
            .repository
            .update(id, &details)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(accomodation_id = %id, "accomodation updated");
        Ok(accomodation)
    }

    async fn delete_accomodation(&self, id: AccomodationId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        if !deleted {
            return Err(Self::not_found(id));
        }
        info!(accomodation_id = %id, "accomodation deleted");
        Ok(())
    }
}
