//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users,
//!   accomodations, health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`UserSchema`], [`AccomodationSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accomodations::AccomodationRequest;
use crate::inbound::http::schemas::{
    AccomodationSchema, ErrorCodeSchema, ErrorSchema, FieldErrorSchema, UserSchema,
};
use crate::inbound::http::users::UserRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentals backend API",
        description = "HTTP interface for users, their accomodations and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::accomodations::create_accomodation,
        crate::inbound::http::accomodations::list_accomodations,
        crate::inbound::http::accomodations::get_accomodation,
        crate::inbound::http::accomodations::update_accomodation,
        crate::inbound::http::accomodations::delete_accomodation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        AccomodationSchema,
        UserRequest,
        AccomodationRequest,
        ErrorSchema,
        ErrorCodeSchema,
        FieldErrorSchema
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "accomodations", description = "Operations related to rental accomodations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
