//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn rendered(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error envelope");
    (status, header, payload)
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
#[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&Error::new(code, "x")), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, payload) = rendered(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[actix_web::test]
async fn client_errors_pass_through_with_details() {
    let error = Error::invalid_request("Primary color must be a valid hex color")
        .with_details(json!({"field": "primaryColor"}));

    let (status, header, payload) = rendered(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(payload.message(), "Primary color must be a valid hex color");
    assert_eq!(payload.details(), Some(&json!({"field": "primaryColor"})));
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_use_the_envelope() {
    let app =
        actix_test::init_service(App::new().default_service(web::to(route_not_found))).await;

    let req = actix_test::TestRequest::get().uri("/nope").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "Route not found");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<Value>| async { actix_web::HttpResponse::Ok() }),
            ),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
