//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `migrations/` exactly. They are used by
//! Diesel for compile-time query validation and type-safe SQL generation.

diesel::table! {
    accomodations (id) {
        id -> Integer,
        adress -> Text,
        city -> Text,
        country -> Text,
        postal_code -> Integer,
        rent -> Integer,
        room_nr -> Integer,
        user_id -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        profile_picture -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(accomodations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(accomodations, users,);
