//! HTTP surface tests against a router whose database is disconnected.
//!
//! Every request here is answered before the store is touched, or shows how a
//! store failure is rendered.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use safeticket_auth_types::token::validate_identity_token;
use safeticket_testing::auth::MockAuth;
use safeticket_ticketing::domain::types::CodeStrategy;
use safeticket_ticketing::router::build_router;
use safeticket_ticketing::state::AppState;

use crate::helpers::{TEST_JWT_SECRET, TEST_SALT};

fn app() -> Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        identity_salt: TEST_SALT.to_owned(),
        identity_token_ttl_secs: 3600,
        code_strategy: CodeStrategy::Sequential,
    })
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn ticket_body(passport_id: Option<&str>, from: &str, to: &str) -> serde_json::Value {
    let address = serde_json::json!({
        "street": "Panepistimiou",
        "house_number": "30",
        "zip_code": "10679",
        "city": "Athens",
        "country": "GR",
    });
    serde_json::json!({
        "passport_id": passport_id,
        "reason": "pharmacy",
        "start_address": address,
        "end_address": address,
        "valid_from": from,
        "valid_to": to,
    })
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live() {
    let resp = app().oneshot(get("/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let (status, json) = send(get("/readyz")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["kind"], "UNAVAILABLE");
}

#[tokio::test]
async fn should_return_json_404_for_unknown_route() {
    let (status, json) = send(get("/api/v1/passes")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_echo_request_id() {
    let req = Request::builder()
        .uri("/healthz")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn should_assign_request_id_when_absent() {
    let resp = app().oneshot(get("/healthz")).await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}

// ── Identity token ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_identity_token() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/auth/token",
        serde_json::json!({ "passport_id": "AK0123456" }),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let token = json["token"].as_str().unwrap();
    let info = validate_identity_token(token, TEST_JWT_SECRET).unwrap();
    assert_eq!(json["jwt_payload"]["hashed_identity"], info.hashed_identity.as_str());
    assert_eq!(json["expires_at"], info.expires_at);
}

#[tokio::test]
async fn should_reject_token_request_without_passport_id() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/auth/token",
        serde_json::json!({}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "MISSING_IDENTITY");
}

#[tokio::test]
async fn should_check_valid_bearer_token() {
    let auth = MockAuth::new("ab12cd", TEST_JWT_SECRET);
    let mut req = get("/api/v1/auth/token");
    req.headers_mut().extend(auth.headers());

    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hashed_identity"], "ab12cd");
}

#[tokio::test]
async fn should_reject_missing_bearer_token() {
    let (status, json) = send(get("/api/v1/auth/token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_expired_bearer_token() {
    let auth = MockAuth::new("ab12cd", TEST_JWT_SECRET).expired();
    let mut req = get("/api/v1/auth/token");
    req.headers_mut().extend(auth.headers());

    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let auth = MockAuth::new("ab12cd", "some-other-secret");
    let mut req = get("/api/v1/auth/token");
    req.headers_mut().extend(auth.headers());

    let (status, _) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Tickets: rejected before the store ───────────────────────────────────────

#[tokio::test]
async fn should_reject_inverted_window() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/tickets",
        ticket_body(
            Some("AK0123456"),
            "2020-04-01T10:00:00Z",
            "2020-04-01T08:00:00Z",
        ),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_WINDOW");
    assert_eq!(json["message"], "start must precede end");
}

#[tokio::test]
async fn should_reject_ticket_without_any_identity() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/tickets",
        ticket_body(None, "2020-04-01T08:00:00Z", "2020-04-01T10:00:00Z"),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "MISSING_IDENTITY");
}

#[tokio::test]
async fn should_reject_ticket_with_invalid_bearer_even_without_passport_id() {
    let mut req = json_request(
        "POST",
        "/api/v1/tickets",
        ticket_body(None, "2020-04-01T08:00:00Z", "2020-04-01T10:00:00Z"),
    );
    req.headers_mut()
        .extend(MockAuth::new("ab12cd", TEST_JWT_SECRET).expired().headers());

    let (status, _) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_ticket_without_addresses() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/tickets",
        serde_json::json!({
            "passport_id": "AK0123456",
            "valid_from": "2020-04-01T08:00:00Z",
            "valid_to": "2020-04-01T10:00:00Z",
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "MISSING_ADDRESS");
}

#[tokio::test]
async fn should_reject_ticket_without_valid_from() {
    let mut body = ticket_body(
        Some("AK0123456"),
        "2020-04-01T08:00:00Z",
        "2020-04-01T10:00:00Z",
    );
    body.as_object_mut().unwrap().remove("valid_from");

    let (status, json) = send(json_request("POST", "/api/v1/tickets", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_WINDOW");
}

#[tokio::test]
async fn should_reject_ticket_without_valid_to() {
    let mut body = ticket_body(
        Some("AK0123456"),
        "2020-04-01T08:00:00Z",
        "2020-04-01T10:00:00Z",
    );
    body.as_object_mut().unwrap().remove("valid_to");

    let (status, json) = send(json_request("POST", "/api/v1/tickets", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_WINDOW");
}

#[tokio::test]
async fn should_reject_address_missing_a_field() {
    let mut body = ticket_body(
        Some("AK0123456"),
        "2020-04-01T08:00:00Z",
        "2020-04-01T10:00:00Z",
    );
    body["end_address"]
        .as_object_mut()
        .unwrap()
        .remove("country");

    let (status, json) = send(json_request("POST", "/api/v1/tickets", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "MISSING_ADDRESS");
    assert_eq!(json["message"], "address fields must not be empty");
}

#[tokio::test]
async fn should_reject_unparseable_ticket_timestamp() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/tickets",
        ticket_body(Some("AK0123456"), "yesterday", "2020-04-01T10:00:00Z"),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_reject_malformed_json_body() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/tickets")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"passport_id\": \"AK0123456\""))
        .unwrap();

    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_REQUEST");
    assert_eq!(json["message"], "malformed request body");
}

#[tokio::test]
async fn should_reject_token_request_without_json_content_type() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/token")
        .body(Body::from("passport_id=AK0123456"))
        .unwrap();

    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_reject_malformed_ticket_id() {
    let (status, json) = send(get("/api/v1/tickets/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_TICKET_ID");
}

#[tokio::test]
async fn should_reject_malformed_ticket_id_on_invalidate() {
    let req = Request::builder()
        .method("DELETE")
        .uri("/api/v1/tickets/42")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "INVALID_TICKET_ID");
}

#[tokio::test]
async fn should_reject_blank_hashed_identity_lookup() {
    let (status, json) = send(json_request(
        "POST",
        "/api/v1/tickets/identity",
        serde_json::json!({ "hashed_identity": "" }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "MISSING_IDENTITY");
}

#[tokio::test]
async fn should_require_bearer_for_own_tickets() {
    let (status, json) = send(get("/api/v1/tickets/@me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["kind"], "INVALID_TOKEN");
}

// ── Tickets: store failure ───────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_store_failure_details() {
    let uri = format!("/api/v1/tickets/{}", uuid::Uuid::now_v7());
    let (status, json) = send(get(&uri)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["kind"], "INTERNAL");
    assert_eq!(json["message"], "internal error");
}
