//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::ports::{
    MockAccomodationsCommand, MockAccomodationsQuery, MockUsersCommand, MockUsersQuery,
};
use crate::domain::{
    Accomodation, AccomodationDraft, AccomodationId, FieldInput, User, UserDraft, UserId,
};
use crate::inbound::http::state::HttpState;

/// Mocked driving ports. Ports without expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    /// User command port.
    pub users: MockUsersCommand,
    /// User query port.
    pub users_query: MockUsersQuery,
    /// Accomodation command port.
    pub accomodations: MockAccomodationsCommand,
    /// Accomodation query port.
    pub accomodations_query: MockAccomodationsQuery,
}

impl MockPorts {
    /// Wrap the mocks in the HTTP handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.users),
            Arc::new(self.users_query),
            Arc::new(self.accomodations),
            Arc::new(self.accomodations_query),
        )
    }
}

/// Build an app with the REST routes wired to `ports`.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(super::configure)
}

fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_564_800, 0).expect("valid timestamp")
}

/// A persisted user with the given identifier.
pub fn sample_user(id: i32) -> User {
    let profile = UserDraft {
        username: FieldInput::Value("testuser".into()),
        email: FieldInput::Value("test@test.com".into()),
        profile_picture: FieldInput::Value("https://x/y.jpg".into()),
    }
    .validate()
    .expect("valid profile");
    User::new(UserId::new(id), profile, fixed_time(), fixed_time())
}

/// A persisted accomodation owned by `user_id`.
pub fn sample_accomodation(id: i32, user_id: i32) -> Accomodation {
    let details = AccomodationDraft {
        adress: FieldInput::Value("skönviksvägen".into()),
        city: FieldInput::Value("Stockholm".into()),
        country: FieldInput::Value("Sweden".into()),
        postal_code: FieldInput::Value(12266),
        rent: FieldInput::Value(40000),
        room_nr: FieldInput::Value(4),
        user_id: FieldInput::Value(user_id),
    }
    .validate()
    .expect("valid details");
    Accomodation::new(AccomodationId::new(id), details, fixed_time(), fixed_time())
}
