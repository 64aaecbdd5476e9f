//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unique_violation("taken"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_json(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("response body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn error_response_carries_trace_id(expected_trace_id: String) {
    let error = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "fields": [{ "field": "city" }] }));

    let (status, header, body) = response_json(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body["traceId"], expected_trace_id);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["fields"][0]["field"], "city");
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_the_store_message() {
    let error = Error::internal("user repository error: no such table: users");

    let (status, header, body) = response_json(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(header.is_none());
    assert_eq!(body["message"], "user repository error: no such table: users");
    assert!(body.get("traceId").is_none());
}
