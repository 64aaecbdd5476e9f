//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod accomodations;
pub mod error;
pub mod extractors;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register the users and accomodations resources with their extractor
/// settings.
///
/// Handlers expect a `web::Data<state::HttpState>` registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extractors::json_config())
        .app_data(extractors::path_config())
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(accomodations::create_accomodation)
        .service(accomodations::list_accomodations)
        .service(accomodations::get_accomodation)
        .service(accomodations::update_accomodation)
        .service(accomodations::delete_accomodation);
}
