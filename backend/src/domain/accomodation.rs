//! Accomodation (rental listing) entity model and its validation rules.
//!
//! Every listing belongs to exactly one [`User`](super::User). The owner must
//! exist when the listing is written; that check needs the store and lives in
//! the repository. Everything that can be decided from the input alone is
//! checked by [`AccomodationDraft::validate`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;
use super::validation::{FieldError, FieldErrorCode, FieldInput, ValidationErrors};

/// Public field name of the street address.
pub const ADRESS_FIELD: &str = "adress";
/// Public field name of the city.
pub const CITY_FIELD: &str = "city";
/// Public field name of the country.
pub const COUNTRY_FIELD: &str = "country";
/// Public field name of the postal code.
pub const POSTAL_CODE_FIELD: &str = "postalCode";
/// Public field name of the monthly rent.
pub const RENT_FIELD: &str = "rent";
/// Public field name of the room count.
pub const ROOM_NR_FIELD: &str = "roomNr";
/// Public field name of the owning user reference.
pub const USER_ID_FIELD: &str = "userId";

/// Number of decimal digits in a postal code.
pub const POSTAL_CODE_DIGITS: usize = 5;

/// Store-assigned accomodation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccomodationId(i32);

impl AccomodationId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for AccomodationId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccomodationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five-digit numeric postal code.
///
/// The code is an integer, so a leading zero cannot be represented; valid
/// values are therefore `10000..=99999`.
///
/// # Examples
/// ```
/// use rentals::domain::PostalCode;
///
/// assert!(PostalCode::new(12266).is_ok());
/// assert!(PostalCode::new(1226).is_err());
/// assert!(PostalCode::new(122660).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostalCode(i32);

impl PostalCode {
    /// Validate and construct a [`PostalCode`].
    ///
    /// # Errors
    ///
    /// Returns an `invalid_length` error unless the value has exactly five
    /// digits.
    pub fn new(value: i32) -> Result<Self, FieldError> {
        let digits = value.to_string();
        if value < 0 || digits.len() != POSTAL_CODE_DIGITS {
            return Err(FieldError::new(
                POSTAL_CODE_FIELD,
                FieldErrorCode::InvalidLength,
                format!("postalCode must be exactly {POSTAL_CODE_DIGITS} digits"),
            ));
        }
        Ok(Self(value))
    }

    /// The numeric code.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(
            field,
            FieldErrorCode::Empty,
            format!("{field} must not be empty"),
        ));
    }
    Ok(value)
}

fn at_least_one(field: &'static str, value: i32) -> Result<i32, FieldError> {
    if value < 1 {
        return Err(FieldError::new(
            field,
            FieldErrorCode::BelowMinimum,
            format!("{field} must be at least 1"),
        ));
    }
    Ok(value)
}

/// Validated listing attributes, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccomodationDetails {
    adress: String,
    city: String,
    country: String,
    postal_code: PostalCode,
    rent: i32,
    room_nr: i32,
    user_id: UserId,
}

impl AccomodationDetails {
    /// Street address.
    #[must_use]
    pub fn adress(&self) -> &str {
        &self.adress
    }

    /// City.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Postal code.
    #[must_use]
    pub const fn postal_code(&self) -> PostalCode {
        self.postal_code
    }

    /// Monthly rent, at least 1.
    #[must_use]
    pub const fn rent(&self) -> i32 {
        self.rent
    }

    /// Number of rooms, at least 1.
    #[must_use]
    pub const fn room_nr(&self) -> i32 {
        self.room_nr
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Unvalidated listing attributes as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccomodationDraft {
    /// Street address.
    pub adress: FieldInput<String>,
    /// City.
    pub city: FieldInput<String>,
    /// Country.
    pub country: FieldInput<String>,
    /// Five-digit postal code.
    pub postal_code: FieldInput<i32>,
    /// Monthly rent.
    pub rent: FieldInput<i32>,
    /// Number of rooms.
    pub room_nr: FieldInput<i32>,
    /// Owning user's identifier.
    pub user_id: FieldInput<i32>,
}

impl AccomodationDraft {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per missing, mistyped or out-of-range
    /// field. Whether the owner exists is left to the repository.
    ///
    /// # Examples
    /// ```
    /// use rentals::domain::{AccomodationDraft, FieldInput};
    ///
    /// let draft = AccomodationDraft {
    ///     adress: "skönviksvägen".to_owned().into(),
    ///     city: String::new().into(),
    ///     country: "Sweden".to_owned().into(),
    ///     postal_code: FieldInput::Value(12266),
    ///     rent: FieldInput::Value(0),
    ///     room_nr: FieldInput::Value(4),
    ///     user_id: FieldInput::Value(1),
    /// };
    /// let errors = draft.validate().expect_err("city and rent are invalid");
    /// assert_eq!(errors.fields().collect::<Vec<_>>(), ["city", "rent"]);
    /// ```
    pub fn validate(self) -> Result<AccomodationDetails, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let adress = errors.check(
            self.adress
                .require(ADRESS_FIELD)
                .and_then(|v| non_empty(ADRESS_FIELD, v)),
        );
        let city = errors.check(
            self.city
                .require(CITY_FIELD)
                .and_then(|v| non_empty(CITY_FIELD, v)),
        );
        let country = errors.check(
            self.country
                .require(COUNTRY_FIELD)
                .and_then(|v| non_empty(COUNTRY_FIELD, v)),
        );
        let postal_code = errors.check(
            self.postal_code
                .require(POSTAL_CODE_FIELD)
                .and_then(PostalCode::new),
        );
        let rent = errors.check(
            self.rent
                .require(RENT_FIELD)
                .and_then(|v| at_least_one(RENT_FIELD, v)),
        );
        let room_nr = errors.check(
            self.room_nr
                .require(ROOM_NR_FIELD)
                .and_then(|v| at_least_one(ROOM_NR_FIELD, v)),
        );
        let user_id = errors.check(
            self.user_id
                .require(USER_ID_FIELD)
                .and_then(|v| at_least_one(USER_ID_FIELD, v)),
        );

        match (adress, city, country, postal_code, rent, room_nr, user_id) {
            (
                Some(adress),
                Some(city),
                Some(country),
                Some(postal_code),
                Some(rent),
                Some(room_nr),
                Some(user_id),
            ) => Ok(AccomodationDetails {
                adress,
                city,
                country,
                postal_code,
                rent,
                room_nr,
                user_id: UserId::new(user_id),
            }),
            _ => Err(errors),
        }
    }

    /// Fill fields absent from this draft with the values in `current`.
    ///
    /// An explicit null is kept so validation rejects it.
    #[must_use]
    pub fn merge_onto(self, current: &AccomodationDetails) -> Self {
        Self {
            adress: self.adress.or_current(|| current.adress.clone()),
            city: self.city.or_current(|| current.city.clone()),
            country: self.country.or_current(|| current.country.clone()),
            postal_code: self.postal_code.or_current(|| current.postal_code.get()),
            rent: self.rent.or_current(|| current.rent),
            room_nr: self.room_nr.or_current(|| current.room_nr),
            user_id: self.user_id.or_current(|| current.user_id.get()),
        }
    }
}

/// Persisted rental listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accomodation {
    id: AccomodationId,
    #[serde(flatten)]
    details: AccomodationDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Accomodation {
    /// Build a persisted listing from its stored parts.
    #[must_use]
    pub const fn new(
        id: AccomodationId,
        details: AccomodationDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            details,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> AccomodationId {
        self.id
    }

    /// Validated attributes.
    #[must_use]
    pub const fn details(&self) -> &AccomodationDetails {
        &self.details
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.details.user_id
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
