//! Integration tests for the HTTP adapter.
//!
//! These tests verify HTTP-level behavior through the full middleware
//! stack: API key auth, rate limiting, and the payment/appointment routes.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use rdv_hex::{AppointmentService, PaymentService, inbound::HttpServer};
use rdv_store::{MemoryAppointments, MemoryCache, MemoryLedger, SimulatedGateway};

const TEST_API_KEY: &str = "sk_rdv_test_key";

type TestServer =
    HttpServer<SimulatedGateway, MemoryLedger, MemoryAppointments, MemoryCache>;

/// Helper to create a test server with the default rate limit.
fn create_test_server() -> TestServer {
    let payments = PaymentService::new(SimulatedGateway::new(), MemoryLedger::new());
    let appointments = AppointmentService::new(MemoryAppointments::new(), MemoryCache::new());
    HttpServer::new(payments, appointments, TEST_API_KEY)
}

/// Helper to create a test server with a very low rate limit.
fn create_throttled_server(requests_per_minute: u32) -> TestServer {
    let payments = PaymentService::new(SimulatedGateway::new(), MemoryLedger::new());
    let appointments = AppointmentService::new(MemoryAppointments::new(), MemoryCache::new());
    HttpServer::with_rate_limit(payments, appointments, TEST_API_KEY, requests_per_minute)
}

fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, api_key: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_is_open() {
    let app = create_test_server().router();

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_requires_a_key() {
    let app = create_test_server().router();

    let response = app.oneshot(get("/api/appointments", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_key_is_rejected() {
    let app = create_test_server().router();

    let response = app
        .oneshot(get("/api/appointments", Some("sk_rdv_wrong")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_card_payment_round_trip() {
    let app = create_test_server().router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payments",
            TEST_API_KEY,
            r#"{
                "amount": 10000,
                "currency": "EUR",
                "method": {
                    "type": "card",
                    "card_number": "4242424242424242",
                    "expiry": "12/2031",
                    "cvv": "123"
                },
                "description": "Booking deposit"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    let transaction_id = json["transaction_id"].as_str().unwrap().to_string();
    assert!(transaction_id.starts_with("txn_"));
    assert_eq!(json["status"], "AUTHORIZED");

    // The recorded payment is retrievable
    let response = app
        .oneshot(get(
            &format!("/api/payments/{}", transaction_id),
            Some(TEST_API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_card_is_a_bad_request() {
    let app = create_test_server().router();

    let response = app
        .oneshot(post_json(
            "/api/payments",
            TEST_API_KEY,
            r#"{
                "amount": 10000,
                "currency": "EUR",
                "method": {
                    "type": "card",
                    "card_number": "1234567812345678",
                    "expiry": "12/2031",
                    "cvv": "123"
                }
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("checksum"));
}

#[tokio::test]
async fn test_refund_round_trip() {
    let app = create_test_server().router();

    let response = app
        .oneshot(post_json(
            "/api/payments/refund",
            TEST_API_KEY,
            r#"{"transaction_id": "txn_123456", "amount": 50}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["amount"], 50);
}

#[tokio::test]
async fn test_unknown_payment_is_404() {
    let app = create_test_server().router();

    let response = app
        .oneshot(get("/api/payments/txn_nowhere", Some(TEST_API_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─────────────────────────────────────────────────────────────────────────────
// Appointments & export
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_booking_and_export() {
    let app = create_test_server().router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/appointments",
            TEST_API_KEY,
            r#"{
                "starts_at": "2031-06-10T14:30:00Z",
                "client_name": "Awa Diop",
                "client_email": "awa@example.com",
                "service": "Consultation",
                "provider": "Dr Ndiaye",
                "status": "confirmed"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get(
            "/api/appointments/export?format=csv",
            Some(TEST_API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Client,Email,Service,Provider,Status"
    );
    assert!(lines.next().unwrap().contains("Awa Diop"));
}

#[tokio::test]
async fn test_unknown_export_format_is_rejected() {
    let app = create_test_server().router();

    let response = app
        .oneshot(get(
            "/api/appointments/export?format=pdf",
            Some(TEST_API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate limiting
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    // Only 3 requests allowed per minute for a given key
    let app = create_throttled_server(3).router();

    for i in 1..=3 {
        let response = app
            .clone()
            .oneshot(get("/api/appointments", Some(TEST_API_KEY)))
            .await
            .unwrap();
        assert_ne!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    let response = app
        .clone()
        .oneshot(get("/api/appointments", Some(TEST_API_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("Rate limit"));

    // Health stays reachable even when the key is throttled
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
