//! Field-level validation failures shared by the entity models.
//!
//! Validation never stops at the first problem: entity validators push one
//! [`FieldError`] per offending field into a [`ValidationErrors`] aggregate so
//! clients can fix every field in one round trip.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use super::Error;

/// Machine-readable reason attached to a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    /// The field was absent or null.
    Missing,
    /// The field was sent with a value of the wrong type.
    InvalidType,
    /// The field was present but blank.
    Empty,
    /// The value is not a well-formed email address.
    InvalidEmail,
    /// The value is not a well-formed URL.
    InvalidUrl,
    /// The value does not have the required number of digits.
    InvalidLength,
    /// The value is below the permitted minimum.
    BelowMinimum,
    /// The value is already used by another record.
    Taken,
    /// The referenced user does not exist.
    UnknownUser,
}

/// A rejected field together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: &'static str,
    code: FieldErrorCode,
    message: String,
}

impl FieldError {
    /// Build a field error for the named field.
    #[must_use]
    pub fn new(field: &'static str, code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a missing required field.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::new(
            field,
            FieldErrorCode::Missing,
            format!("{field} is required"),
        )
    }

    /// Shorthand for a value of the wrong type.
    #[must_use]
    pub fn invalid_type(field: &'static str) -> Self {
        Self::new(
            field,
            FieldErrorCode::InvalidType,
            format!("{field} has the wrong type"),
        )
    }

    /// Shorthand for a value already in use.
    #[must_use]
    pub fn taken(field: &'static str) -> Self {
        Self::new(
            field,
            FieldErrorCode::Taken,
            format!("{field} must be unique"),
        )
    }

    /// Public (camelCase) name of the rejected field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Reason the field was rejected.
    #[must_use]
    pub const fn code(&self) -> FieldErrorCode {
        self.code
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

/// One client-supplied attribute before validation.
///
/// Updates treat [`FieldInput::Absent`] as "keep the stored value", so an
/// explicit null has to stay distinguishable from a field that was never
/// sent.
///
/// # Examples
/// ```
/// use rentals::domain::FieldInput;
///
/// let sent = FieldInput::Value(4).or_current(|| 2);
/// let kept = FieldInput::Absent.or_current(|| 2);
/// let cleared = FieldInput::<i32>::Null.or_current(|| 2);
/// assert_eq!((sent, kept, cleared), (FieldInput::Value(4), FieldInput::Value(2), FieldInput::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput<T> {
    /// The field was not sent.
    Absent,
    /// The field was sent as null.
    Null,
    /// The field was sent with a value of the wrong type.
    Malformed,
    /// The field was sent with a usable value.
    Value(T),
}

impl<T> Default for FieldInput<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for FieldInput<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> FieldInput<T> {
    /// Substitute `current` when the field was not sent.
    #[must_use]
    pub fn or_current(self, current: impl FnOnce() -> T) -> Self {
        match self {
            Self::Absent => Self::Value(current()),
            sent => sent,
        }
    }

    /// The supplied value, or the error describing why there is none.
    ///
    /// # Errors
    ///
    /// Returns a `missing` error for an absent or null field and an
    /// `invalid_type` error for a value of the wrong type.
    pub fn require(self, field: &'static str) -> Result<T, FieldError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Absent | Self::Null => Err(FieldError::missing(field)),
            Self::Malformed => Err(FieldError::invalid_type(field)),
        }
    }
}

/// Aggregate of every field error found while validating one record.
///
/// # Examples
/// ```
/// use rentals::domain::{FieldError, ValidationErrors};
///
/// let mut errors = ValidationErrors::default();
/// errors.push(FieldError::missing("city"));
/// errors.push(FieldError::missing("country"));
/// assert_eq!(errors.fields().collect::<Vec<_>>(), ["city", "country"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Record a rejected field.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Keep the value of a field check, recording its error on failure.
    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// `true` when no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The individual field errors in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Names of the rejected fields.
    #[must_use]
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(FieldError::field)
    }

    /// `true` when every error is a uniqueness clash.
    fn only_uniqueness(&self) -> bool {
        !self.is_empty()
            && self
                .0
                .iter()
                .all(|error| error.code == FieldErrorCode::Taken)
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(FieldError::message).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let details = json!({ "fields": errors.errors() });
        let message = errors.to_string();
        let error = if errors.only_uniqueness() {
            Error::unique_violation(message)
        } else {
            Error::invalid_request(message)
        };
        error.with_details(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn check_collects_failures_and_keeps_values() {
        let mut errors = ValidationErrors::default();
        let kept = errors.check::<u8>(Ok(4));
        let dropped = errors.check::<u8>(Err(FieldError::missing("rent")));

        assert_eq!(kept, Some(4));
        assert_eq!(dropped, None);
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["rent"]);
    }

    #[rstest]
    fn converts_to_invalid_request_with_field_details() {
        let errors: ValidationErrors = [
            FieldError::missing("adress"),
            FieldError::new("rent", FieldErrorCode::BelowMinimum, "rent must be at least 1"),
        ]
        .into_iter()
        .collect();

        let error = Error::from(errors);

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.message(),
            "validation failed: adress is required; rent must be at least 1"
        );
        let fields = error
            .details()
            .and_then(|details| details.get("fields"))
            .and_then(|fields| fields.as_array())
            .expect("fields array");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["code"], "below_minimum");
    }

    #[rstest]
    #[case(FieldInput::Absent, FieldErrorCode::Missing)]
    #[case(FieldInput::Null, FieldErrorCode::Missing)]
    #[case(FieldInput::Malformed, FieldErrorCode::InvalidType)]
    fn unusable_input_names_the_field(
        #[case] input: FieldInput<String>,
        #[case] code: FieldErrorCode,
    ) {
        let error = input.require("city").expect_err("no usable value");

        assert_eq!(error.field(), "city");
        assert_eq!(error.code(), code);
    }

    #[rstest]
    fn explicit_null_is_not_replaced_by_current_value() {
        let merged = FieldInput::<String>::Null.or_current(|| "Stockholm".to_owned());

        assert_eq!(merged, FieldInput::Null);
    }

    #[rstest]
    fn uniqueness_clashes_map_to_unique_violation() {
        let errors: ValidationErrors = [FieldError::taken("email")].into_iter().collect();
        assert_eq!(Error::from(errors).code(), ErrorCode::UniqueViolation);
    }

    #[rstest]
    fn mixed_failures_stay_invalid_request() {
        let errors: ValidationErrors = [FieldError::taken("email"), FieldError::missing("username")]
            .into_iter()
            .collect();
        assert_eq!(Error::from(errors).code(), ErrorCode::InvalidRequest);
    }
}
