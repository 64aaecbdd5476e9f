//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccomodationsCommand, AccomodationsQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User writes.
    pub users: Arc<dyn UsersCommand>,
    /// User reads.
    pub users_query: Arc<dyn UsersQuery>,
    /// Accomodation writes.
    pub accomodations: Arc<dyn AccomodationsCommand>,
    /// Accomodation reads.
    pub accomodations_query: Arc<dyn AccomodationsQuery>,
}

impl HttpState {
    /// Construct state from individual ports.
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersCommand>,
        users_query: Arc<dyn UsersQuery>,
        accomodations: Arc<dyn AccomodationsCommand>,
        accomodations_query: Arc<dyn AccomodationsQuery>,
    ) -> Self {
        Self {
            users,
            users_query,
            accomodations,
            accomodations_query,
        }
    }

    /// Construct state from services that implement both sides of each
    /// resource's ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use rentals::domain::{AccomodationService, UserService};
    /// use rentals::inbound::http::state::HttpState;
    /// use rentals::outbound::persistence::{
    ///     DbPool, DieselAccomodationRepository, DieselUserRepository, PoolConfig,
    /// };
    ///
    /// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::in_memory()).await?;
    /// let users = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(pool.clone()))));
    /// let accomodations = Arc::new(AccomodationService::new(Arc::new(
    ///     DieselAccomodationRepository::new(pool),
    /// )));
    /// let state = HttpState::from_services(users, accomodations);
    /// # let _ = state;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn from_services<U, A>(users: Arc<U>, accomodations: Arc<A>) -> Self
    where
        U: UsersCommand + UsersQuery + 'static,
        A: AccomodationsCommand + AccomodationsQuery + 'static,
    {
        Self {
            users: users.clone(),
            users_query: users,
            accomodations: accomodations.clone(),
            accomodations_query: accomodations,
        }
    }
}
