//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each test binary includes this module and uses the subset it needs.

use rentals::domain::{
    AccomodationDetails, AccomodationDraft, FieldInput, UserDraft, UserId, UserProfile,
};
use rentals::outbound::persistence::{DbPool, PoolConfig, SchemaMode, sync_schema};
use serde_json::{Value, json};

/// Build an in-memory store with a fresh schema.
pub async fn in_memory_pool() -> DbPool {
    let pool = DbPool::new(PoolConfig::in_memory())
        .await
        .expect("in-memory pool");
    sync_schema(&pool, SchemaMode::Replace)
        .await
        .expect("schema sync");
    pool
}

/// A validated profile with the given unique fields.
pub fn profile(username: &str, email: &str) -> UserProfile {
    UserDraft {
        username: FieldInput::Value(username.to_owned()),
        email: FieldInput::Value(email.to_owned()),
        profile_picture: FieldInput::Value("https://x/y.jpg".to_owned()),
    }
    .validate()
    .expect("valid profile")
}

/// Validated listing attributes owned by `owner`.
pub fn listing(owner: UserId) -> AccomodationDetails {
    AccomodationDraft {
        adress: FieldInput::Value("skönviksvägen".to_owned()),
        city: FieldInput::Value("Stockholm".to_owned()),
        country: FieldInput::Value("Sweden".to_owned()),
        postal_code: FieldInput::Value(12266),
        rent: FieldInput::Value(40000),
        room_nr: FieldInput::Value(4),
        user_id: FieldInput::Value(owner.get()),
    }
    .validate()
    .expect("valid listing")
}

/// JSON body for `POST /users`.
pub fn user_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "profilePicture": "https://x/y.jpg"
    })
}

/// JSON body for `POST /accomodations`.
pub fn listing_body(owner: i64) -> Value {
    json!({
        "adress": "skönviksvägen",
        "city": "Stockholm",
        "country": "Sweden",
        "postalCode": 12266,
        "rent": 40000,
        "roomNr": 4,
        "userId": owner
    })
}
