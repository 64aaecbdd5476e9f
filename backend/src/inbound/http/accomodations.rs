//! Accomodations API handlers.
//!
//! ```text
//! POST /accomodations {"adress":"skönviksvägen","city":"Stockholm","country":"Sweden",
//!                      "postalCode":12266,"rent":40000,"roomNr":4,"userId":1}
//! GET /accomodations
//! GET /accomodations/1
//! PUT /accomodations/1 {"rent":42000}
//! DELETE /accomodations/1
//! ```
//!
//! Numeric fields must be JSON integers; a quoted or fractional number is
//! reported as an `invalid_type` field error.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{Accomodation, AccomodationDraft, AccomodationId, FieldInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AccomodationSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Request body for creating or updating an accomodation.
///
/// Absent fields keep their stored values on update. A null or wrongly
/// typed field is reported as a field error together with every other
/// failure.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AccomodationRequest {
    /// Street address.
    #[schema(default, value_type = Option<String>, example = "skönviksvägen")]
    pub adress: FieldInput<String>,
    /// City.
    #[schema(default, value_type = Option<String>, example = "Stockholm")]
    pub city: FieldInput<String>,
    /// Country.
    #[schema(default, value_type = Option<String>, example = "Sweden")]
    pub country: FieldInput<String>,
    /// Five-digit postal code as a JSON integer.
    #[schema(default, value_type = Option<i32>, example = 12266)]
    pub postal_code: FieldInput<i32>,
    /// Monthly rent, at least 1.
    #[schema(default, value_type = Option<i32>, example = 40000)]
    pub rent: FieldInput<i32>,
    /// Number of rooms, at least 1.
    #[schema(default, value_type = Option<i32>, example = 4)]
    pub room_nr: FieldInput<i32>,
    /// Identifier of the owning user.
    #[schema(default, value_type = Option<i32>, example = 1)]
    pub user_id: FieldInput<i32>,
}

impl From<AccomodationRequest> for AccomodationDraft {
    fn from(value: AccomodationRequest) -> Self {
        Self {
            adress: value.adress,
            city: value.city,
            country: value.country,
            postal_code: value.postal_code,
            rent: value.rent,
            room_nr: value.room_nr,
            user_id: value.user_id,
        }
    }
}

/// Create an accomodation owned by an existing user.
#[utoipa::path(
    post,
    path = "/accomodations",
    request_body = AccomodationRequest,
    responses(
        (status = 201, description = "Accomodation created", body = AccomodationSchema),
        (status = 400, description = "Validation failure or unknown owner", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accomodations"],
    operation_id = "createAccomodation"
)]
#[post("/accomodations")]
pub async fn create_accomodation(
    state: web::Data<HttpState>,
    payload: web::Json<AccomodationRequest>,
) -> ApiResult<HttpResponse> {
    let accomodation = state
        .accomodations
        .create_accomodation(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/accomodations/{}", accomodation.id()),
        ))
        .json(accomodation))
}

/// List every accomodation.
#[utoipa::path(
    get,
    path = "/accomodations",
    responses(
        (status = 200, description = "Accomodations", body = [AccomodationSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accomodations"],
    operation_id = "listAccomodations"
)]
#[get("/accomodations")]
pub async fn list_accomodations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Accomodation>>> {
    let accomodations = state.accomodations_query.list_accomodations().await?;
    Ok(web::Json(accomodations))
}

/// Fetch one accomodation.
#[utoipa::path(
    get,
    path = "/accomodations/{id}",
    params(("id" = i32, Path, description = "Accomodation identifier")),
    responses(
        (status = 200, description = "Accomodation", body = AccomodationSchema),
        (status = 404, description = "Unknown accomodation", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accomodations"],
    operation_id = "getAccomodation"
)]
#[get("/accomodations/{id}")]
pub async fn get_accomodation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Accomodation>> {
    let accomodation = state
        .accomodations_query
        .get_accomodation(AccomodationId::new(path.into_inner()))
        .await?;
    Ok(web::Json(accomodation))
}

/// Update an accomodation. Absent fields keep their stored values.
#[utoipa::path(
    put,
    path = "/accomodations/{id}",
    params(("id" = i32, Path, description = "Accomodation identifier")),
    request_body = AccomodationRequest,
    responses(
        (status = 200, description = "Accomodation updated", body = AccomodationSchema),
        (status = 400, description = "Validation failure or unknown owner", body = ErrorSchema),
        (status = 404, description = "Unknown accomodation", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accomodations"],
    operation_id = "updateAccomodation"
)]
#[put("/accomodations/{id}")]
pub async fn update_accomodation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<AccomodationRequest>,
) -> ApiResult<web::Json<Accomodation>> {
    let accomodation = state
        .accomodations
        .update_accomodation(
            AccomodationId::new(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(accomodation))
}

/// Delete an accomodation.
#[utoipa::path(
    delete,
    path = "/accomodations/{id}",
    params(("id" = i32, Path, description = "Accomodation identifier")),
    responses(
        (status = 204, description = "Accomodation deleted"),
        (status = 404, description = "Unknown accomodation", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accomodations"],
    operation_id = "deleteAccomodation"
)]
#[delete("/accomodations/{id}")]
pub async fn delete_accomodation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .accomodations
        .delete_accomodation(AccomodationId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
