//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities used by the API and persistence
//! layers, plus the services that implement the driving ports. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User / UserDraft — user account and its unvalidated input.
//! - Accomodation / AccomodationDraft — rental listing and its input.
//! - UserService / AccomodationService — driving port implementations.

pub mod accomodation;
pub mod accomodation_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::accomodation::{
    Accomodation, AccomodationDetails, AccomodationDraft, AccomodationId, PostalCode,
};
pub use self::accomodation_service::AccomodationService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{Email, ProfilePicture, User, UserDraft, UserId, UserProfile, Username};
pub use self::user_service::UserService;
pub use self::validation::{FieldError, FieldErrorCode, FieldInput, ValidationErrors};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use rentals::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
