//! Extractor configuration shared by the REST handlers.
//!
//! Actix reports malformed bodies and path segments with plain-text errors by
//! default. These configs route them through the domain [`Error`] so every
//! failure uses the JSON error envelope.
//!
//! Request body fields deserialize into [`FieldInput`], so a null or wrongly
//! typed attribute becomes a field error reported alongside the others
//! instead of rejecting the whole body.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::domain::{Error, FieldInput};

// A missing key never reaches this impl; `#[serde(default)]` on the request
// struct leaves the field `Absent`.
impl<'de, T> Deserialize<'de> for FieldInput<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Self::Null);
        }
        Ok(serde_json::from_value(raw).map_or(Self::Malformed, Self::Value))
    }
}

/// Upper bound on accepted JSON bodies.
const JSON_LIMIT_BYTES: usize = 64 * 1024;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    Error::invalid_request("request body is not valid JSON for this resource")
        .with_details(json!({ "reason": reason }))
        .into()
}

// Identifiers are integers, so a non-numeric segment cannot name a record.
fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    Error::not_found(format!("no resource at {}", req.path()))
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// JSON body extractor settings.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(json_error)
}

/// Path extractor settings.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
