//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON produced by their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Only uniqueness checks failed.
    #[schema(rename = "unique_violation")]
    UniqueViolation,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::FieldError`].
#[derive(ToSchema)]
#[schema(as = FieldError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Wire name of the offending field.
    #[schema(example = "postalCode")]
    field: String,
    /// Machine-readable reason.
    #[schema(example = "invalid_length")]
    code: String,
    /// Human-readable reason.
    #[schema(example = "postalCode must have exactly 5 digits")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message. Validation failures list every offending field under
/// `details.fields`.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "request failed validation")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as `{"fields": [FieldError]}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// Unique login name.
    #[schema(example = "testuser")]
    username: String,
    /// Unique e-mail address.
    #[schema(example = "test@test.com")]
    email: String,
    /// Absolute URL of the profile picture.
    #[schema(example = "https://x/y.jpg")]
    profile_picture: String,
    /// Creation timestamp (RFC 3339).
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Last update timestamp (RFC 3339).
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Accomodation`].
#[derive(ToSchema)]
#[schema(as = Accomodation, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AccomodationSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// Street address.
    #[schema(example = "skönviksvägen")]
    adress: String,
    #[schema(example = "Stockholm")]
    city: String,
    #[schema(example = "Sweden")]
    country: String,
    /// Five-digit postal code.
    #[schema(example = 12266, minimum = 10000, maximum = 99999)]
    postal_code: i32,
    #[schema(example = 40000, minimum = 1)]
    rent: i32,
    #[schema(example = 4, minimum = 1)]
    room_nr: i32,
    /// Owning user.
    #[schema(example = 1)]
    user_id: i32,
    /// Creation timestamp (RFC 3339).
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Last update timestamp (RFC 3339).
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}
