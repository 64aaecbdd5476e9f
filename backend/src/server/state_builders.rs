//! Builders for HTTP state backed by the Diesel repositories.

use std::sync::Arc;

use actix_web::web;

use rentals::domain::{AccomodationService, UserService};
use rentals::inbound::http::state::HttpState;
use rentals::outbound::persistence::{DbPool, DieselAccomodationRepository, DieselUserRepository};

/// Wire both resource services to repositories sharing `pool`.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let users = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));
    let accomodations = Arc::new(AccomodationService::new(Arc::new(
        DieselAccomodationRepository::new(pool.clone()),
    )));
    web::Data::new(HttpState::from_services(users, accomodations))
}
