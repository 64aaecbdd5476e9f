//! User entity model and its validation rules.
//!
//! A [`UserDraft`] carries unvalidated client input. [`UserDraft::validate`]
//! turns it into a [`UserProfile`] or reports every offending field at once.
//! Uniqueness of `username` and `email` spans the whole collection and is
//! therefore enforced by the repository, not here.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use super::validation::{FieldError, FieldErrorCode, FieldInput, ValidationErrors};

/// Public field name of [`UserProfile::username`].
pub const USERNAME_FIELD: &str = "username";
/// Public field name of [`UserProfile::email`].
pub const EMAIL_FIELD: &str = "email";
/// Public field name of [`UserProfile::profile_picture`].
pub const PROFILE_PICTURE_FIELD: &str = "profilePicture";

/// URL schemes accepted for profile pictures.
const PICTURE_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
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

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn required_text(field: &'static str, value: String) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(
            field,
            FieldErrorCode::Empty,
            format!("{field} must not be empty"),
        ));
    }
    Ok(value)
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Errors
    ///
    /// Returns an `empty` error for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        required_text(USERNAME_FIELD, value.into()).map(Self)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local part, then a dotted domain with a label-shaped TLD
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique contact address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Errors
    ///
    /// Returns an `empty` error for blank input and `invalid_email` when the
    /// address is malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = required_text(EMAIL_FIELD, value.into())?;
        if !email_regex().is_match(&value) {
            return Err(FieldError::new(
                EMAIL_FIELD,
                FieldErrorCode::InvalidEmail,
                "email must be a valid email address",
            ));
        }
        Ok(Self(value))
    }
}

/// Absolute URL of the user's avatar image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ProfilePicture(String);

impl ProfilePicture {
    /// Validate and construct a [`ProfilePicture`].
    ///
    /// # Errors
    ///
    /// Returns an `empty` error for blank input and `invalid_url` unless the
    /// value is an absolute http, https or ftp URL with a host.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = required_text(PROFILE_PICTURE_FIELD, value.into())?;
        let is_url = Url::parse(&value).is_ok_and(|url| {
            PICTURE_SCHEMES.contains(&url.scheme()) && url.host().is_some()
        });
        if !is_url {
            return Err(FieldError::new(
                PROFILE_PICTURE_FIELD,
                FieldErrorCode::InvalidUrl,
                "profilePicture must be a valid URL",
            ));
        }
        Ok(Self(value))
    }
}

macro_rules! text_newtype_impls {
    ($($name:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }
        )*
    };
}

text_newtype_impls!(Username, Email, ProfilePicture);

/// Validated user attributes, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    username: Username,
    email: Email,
    profile_picture: ProfilePicture,
}

impl UserProfile {
    /// Assemble a profile from validated parts.
    #[must_use]
    pub const fn new(username: Username, email: Email, profile_picture: ProfilePicture) -> Self {
        Self {
            username,
            email,
            profile_picture,
        }
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Avatar URL.
    #[must_use]
    pub const fn profile_picture(&self) -> &ProfilePicture {
        &self.profile_picture
    }
}

/// Unvalidated user attributes as supplied by a client.
///
/// For updates, merge the draft onto the stored profile with
/// [`UserDraft::merge_onto`] before validating; only absent fields take the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Requested login name.
    pub username: FieldInput<String>,
    /// Requested contact address.
    pub email: FieldInput<String>,
    /// Requested avatar URL.
    pub profile_picture: FieldInput<String>,
}

impl UserDraft {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per missing, mistyped or malformed field.
    ///
    /// # Examples
    /// ```
    /// use rentals::domain::UserDraft;
    ///
    /// let draft = UserDraft {
    ///     username: "testuser".to_owned().into(),
    ///     email: "test-test.com".to_owned().into(),
    ///     profile_picture: "https://x/y.jpg".to_owned().into(),
    /// };
    /// let errors = draft.validate().expect_err("email is malformed");
    /// assert_eq!(errors.fields().collect::<Vec<_>>(), ["email"]);
    /// ```
    pub fn validate(self) -> Result<UserProfile, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let username =
            errors.check(self.username.require(USERNAME_FIELD).and_then(Username::new));
        let email = errors.check(self.email.require(EMAIL_FIELD).and_then(Email::new));
        let profile_picture = errors.check(
            self.profile_picture
                .require(PROFILE_PICTURE_FIELD)
                .and_then(ProfilePicture::new),
        );

        match (username, email, profile_picture) {
            (Some(username), Some(email), Some(profile_picture)) => {
                Ok(UserProfile::new(username, email, profile_picture))
            }
            _ => Err(errors),
        }
    }

    /// Fill fields absent from this draft with the values in `current`.
    ///
    /// An explicit null is kept so validation rejects it.
    #[must_use]
    pub fn merge_onto(self, current: &UserProfile) -> Self {
        Self {
            username: self.username.or_current(|| current.username.to_string()),
            email: self.email.or_current(|| current.email.to_string()),
            profile_picture: self
                .profile_picture
                .or_current(|| current.profile_picture.to_string()),
        }
    }
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: UserProfile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a persisted user from its stored parts.
    #[must_use]
    pub const fn new(
        id: UserId,
        profile: UserProfile,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            profile,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Validated attributes.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        self.profile.username()
    }

    /// Contact address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        self.profile.email()
    }

    /// Avatar URL.
    #[must_use]
    pub const fn profile_picture(&self) -> &ProfilePicture {
        self.profile.profile_picture()
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
