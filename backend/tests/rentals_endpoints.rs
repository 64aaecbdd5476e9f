//! End-to-end coverage of the REST resources over an in-memory store.
//!
//! Requests run through the production wiring: Diesel repositories, domain
//! services, the `Trace` middleware and the route configuration.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rentals::Trace;
use rentals::domain::TRACE_ID_HEADER;
use rentals::inbound::http::configure;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

#[path = "../src/server/state_builders.rs"]
mod state_builders;

use support::{in_memory_pool, listing_body, user_body};

async fn rentals_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let pool = in_memory_pool().await;
    actix_test::init_service(
        App::new()
            .app_data(state_builders::build_http_state(&pool))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn call(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json payload")
    };
    (status, value)
}

fn field_names(body: &Value) -> Vec<String> {
    body["details"]["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .filter_map(|field| field["field"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
#[actix_web::test]
async fn destroying_a_user_cascades_to_its_listing() {
    let app = rentals_app().await;

    let (status, user) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(user_body("testuser", "test@test.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = user["id"].as_i64().expect("user id");

    let (status, listing) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/accomodations")
            .set_json(listing_body(user_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(listing["userId"], user_id);
    let listing_uri = format!("/accomodations/{}", listing["id"]);

    let (status, _) = call(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/users/{user_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, actix_test::TestRequest::get().uri(&listing_uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case(user_body("testuser", "second@test.com"), "username")]
#[case(user_body("second", "test@test.com"), "email")]
#[actix_web::test]
async fn duplicate_user_fields_are_unique_violations(
    #[case] second: Value,
    #[case] clashing: &str,
) {
    let app = rentals_app().await;
    let (status, _) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(user_body("testuser", "test@test.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post().uri("/users").set_json(second),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "unique_violation");
    assert_eq!(field_names(&body), [clashing]);
}

#[rstest]
#[case(json!({"email": "test-test.com"}), "email")]
#[case(json!({"profilePicture": ""}), "profilePicture")]
#[case(json!({"profilePicture": "not a url"}), "profilePicture")]
#[case(json!({"username": null}), "username")]
#[case(json!({"email": 42}), "email")]
#[actix_web::test]
async fn invalid_user_field_is_named(#[case] overrides: Value, #[case] field: &str) {
    let app = rentals_app().await;
    let mut body = user_body("testuser", "test@test.com");
    if let (Some(target), Some(source)) = (body.as_object_mut(), overrides.as_object()) {
        target.extend(source.clone());
    }

    let (status, error) = call(
        &app,
        actix_test::TestRequest::post().uri("/users").set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(field_names(&error), [field]);
}

#[rstest]
#[case(json!({"adress": ""}), "adress")]
#[case(json!({"city": "  "}), "city")]
#[case(json!({"country": ""}), "country")]
#[case(json!({"postalCode": 1226}), "postalCode")]
#[case(json!({"postalCode": 122_660}), "postalCode")]
#[case(json!({"postalCode": "12266"}), "postalCode")]
#[case(json!({"postalCode": null}), "postalCode")]
#[case(json!({"rent": 0}), "rent")]
#[case(json!({"roomNr": 0}), "roomNr")]
#[case(json!({"userId": 0}), "userId")]
#[actix_web::test]
async fn invalid_listing_field_is_named(#[case] overrides: Value, #[case] field: &str) {
    let app = rentals_app().await;
    let (_, user) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(user_body("testuser", "test@test.com")),
    )
    .await;
    let mut body = listing_body(user["id"].as_i64().expect("user id"));
    if let (Some(target), Some(source)) = (body.as_object_mut(), overrides.as_object()) {
        target.extend(source.clone());
    }

    let (status, error) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/accomodations")
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&error), [field]);
}

#[rstest]
#[actix_web::test]
async fn listing_for_unknown_owner_is_rejected() {
    let app = rentals_app().await;

    let (status, body) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/accomodations")
            .set_json(listing_body(404)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["fields"][0]["field"], "userId");
    assert_eq!(body["details"]["fields"][0]["code"], "unknown_user");
}

#[rstest]
#[actix_web::test]
async fn partial_update_keeps_other_fields() {
    let app = rentals_app().await;
    let (_, user) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(user_body("testuser", "test@test.com")),
    )
    .await;
    let uri = format!("/users/{}", user["id"]);

    let (status, updated) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "email": "new@test.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "new@test.com");
    assert_eq!(updated["username"], "testuser");
    let (_, fetched) = call(&app, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(fetched["email"], "new@test.com");
}

#[rstest]
#[case(json!({ "rent": 0 }), "rent")]
#[case(json!({ "city": null }), "city")]
#[case(json!({ "postalCode": "12266", "roomNr": 0 }), "postalCode")]
#[actix_web::test]
async fn rejected_listing_update_leaves_record_unchanged(
    #[case] patch: Value,
    #[case] first_field: &str,
) {
    let app = rentals_app().await;
    let (_, user) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(user_body("testuser", "test@test.com")),
    )
    .await;
    let (_, created) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/accomodations")
            .set_json(listing_body(user["id"].as_i64().expect("user id"))),
    )
    .await;
    let uri = format!("/accomodations/{}", created["id"]);

    let (status, error) = call(&app, actix_test::TestRequest::put().uri(&uri).set_json(patch)).await;
    let (_, stored) = call(&app, actix_test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&error).first().map(String::as_str), Some(first_field));
    assert_eq!(stored, created);
}

#[rstest]
#[actix_web::test]
async fn null_username_update_is_rejected() {
    let app = rentals_app().await;
    let (_, created) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(user_body("testuser", "test@test.com")),
    )
    .await;
    let uri = format!("/users/{}", created["id"]);

    let (status, error) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "username": null })),
    )
    .await;
    let (_, stored) = call(&app, actix_test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["fields"][0]["code"], "missing");
    assert_eq!(field_names(&error), ["username"]);
    assert_eq!(stored, created);
}

#[rstest]
#[case("/users/999")]
#[case("/users/abc")]
#[case("/accomodations/999")]
#[actix_web::test]
async fn unknown_identifiers_are_not_found(#[case] uri: &str) {
    let app = rentals_app().await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("traceId").is_some());
}

#[rstest]
#[actix_web::test]
async fn list_endpoints_return_every_record() {
    let app = rentals_app().await;
    for (name, email) in [("one", "one@test.com"), ("two", "two@test.com")] {
        let (_, user) = call(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(user_body(name, email)),
        )
        .await;
        call(
            &app,
            actix_test::TestRequest::post()
                .uri("/accomodations")
                .set_json(listing_body(user["id"].as_i64().expect("user id"))),
        )
        .await;
    }

    let (_, users) = call(&app, actix_test::TestRequest::get().uri("/users")).await;
    let (_, listings) = call(&app, actix_test::TestRequest::get().uri("/accomodations")).await;

    assert_eq!(users.as_array().map(Vec::len), Some(2));
    assert_eq!(listings.as_array().map(Vec::len), Some(2));
}
