//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    Accomodation, AccomodationDetails, AccomodationDraft, AccomodationId, Email, FieldError,
    FieldInput, ProfilePicture, User, UserId, UserProfile, Username, ValidationErrors,
};

use super::schema::{accomodations, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = FieldError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let profile = UserProfile::new(
            Username::new(row.username)?,
            Email::new(row.email)?,
            ProfilePicture::new(row.profile_picture)?,
        );
        Ok(User::new(
            UserId::new(row.id),
            profile,
            row.created_at.and_utc(),
            row.updated_at.and_utc(),
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub profile_picture: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewUserRow<'a> {
    pub fn from_profile(profile: &'a UserProfile, now: NaiveDateTime) -> Self {
        Self {
            username: profile.username().as_ref(),
            email: profile.email().as_ref(),
            profile_picture: profile.profile_picture().as_ref(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub profile_picture: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> UserUpdate<'a> {
    pub fn from_profile(profile: &'a UserProfile, now: NaiveDateTime) -> Self {
        Self {
            username: profile.username().as_ref(),
            email: profile.email().as_ref(),
            profile_picture: profile.profile_picture().as_ref(),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Accomodation models
// ---------------------------------------------------------------------------

/// Row struct for reading from the accomodations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accomodations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AccomodationRow {
    pub id: i32,
    pub adress: String,
    pub city: String,
    pub country: String,
    pub postal_code: i32,
    pub rent: i32,
    pub room_nr: i32,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccomodationRow> for Accomodation {
    type Error = ValidationErrors;

    fn try_from(row: AccomodationRow) -> Result<Self, Self::Error> {
        let details = AccomodationDraft {
            adress: FieldInput::Value(row.adress),
            city: FieldInput::Value(row.city),
            country: FieldInput::Value(row.country),
            postal_code: FieldInput::Value(row.postal_code),
            rent: FieldInput::Value(row.rent),
            room_nr: FieldInput::Value(row.room_nr),
            user_id: FieldInput::Value(row.user_id),
        }
        .validate()?;
        Ok(Accomodation::new(
            AccomodationId::new(row.id),
            details,
            row.created_at.and_utc(),
            row.updated_at.and_utc(),
        ))
    }
}

/// Insertable struct for creating new accomodation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accomodations)]
pub(crate) struct NewAccomodationRow<'a> {
    pub adress: &'a str,
    pub city: &'a str,
    pub country: &'a str,
    pub postal_code: i32,
    pub rent: i32,
    pub room_nr: i32,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewAccomodationRow<'a> {
    pub fn from_details(details: &'a AccomodationDetails, now: NaiveDateTime) -> Self {
        Self {
            adress: details.adress(),
            city: details.city(),
            country: details.country(),
            postal_code: details.postal_code().get(),
            rent: details.rent(),
            room_nr: details.room_nr(),
            user_id: details.user_id().get(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset struct for updating existing accomodation records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accomodations)]
pub(crate) struct AccomodationUpdate<'a> {
    pub adress: &'a str,
    pub city: &'a str,
    pub country: &'a str,
    pub postal_code: i32,
    pub rent: i32,
    pub room_nr: i32,
    pub user_id: i32,
    pub updated_at: NaiveDateTime,
}

impl<'a> AccomodationUpdate<'a> {
    pub fn from_details(details: &'a AccomodationDetails, now: NaiveDateTime) -> Self {
        Self {
            adress: details.adress(),
            city: details.city(),
            country: details.country(),
            postal_code: details.postal_code().get(),
            rent: details.rent(),
            room_nr: details.room_nr(),
            user_id: details.user_id().get(),
            updated_at: now,
        }
    }
}
