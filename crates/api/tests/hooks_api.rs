//! Integration tests for the booking hook endpoints.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use booking_core::booking::BookingEvent;
use common::{body_json, build_test_app, lazy_pool, post_json, post_raw};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: updated hook publishes a change event and answers 202
// ---------------------------------------------------------------------------

#[tokio::test]
async fn updated_hook_publishes_change_event() {
    let (app, bus) = build_test_app(lazy_pool());
    let mut rx = bus.subscribe();

    let response = post_json(
        app,
        "/hooks/bookings/booking-1/updated",
        json!({
            "before": {"status": "pending", "customerId": "u1"},
            "after": {"status": "confirmed", "customerId": "u1", "serviceName": "Cleaning"},
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["booking_id"], "booking-1");
    assert_eq!(json["event"], "updated");

    let event = rx.try_recv().expect("event should be on the bus");
    assert_matches!(event, BookingEvent::Updated(e) => {
        assert_eq!(e.document_id, "booking-1");
        assert!(e.status_changed());
        assert_eq!(e.after["serviceName"], "Cleaning");
    });
}

// ---------------------------------------------------------------------------
// Test: created hook publishes a creation event
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_hook_publishes_creation_event() {
    let (app, bus) = build_test_app(lazy_pool());
    let mut rx = bus.subscribe();

    let response = post_json(
        app,
        "/hooks/bookings/booking-2/created",
        json!({"data": {"vendorId": "v1", "customerEmail": "a@b.com"}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await["event"], "created");

    let event = rx.try_recv().expect("event should be on the bus");
    assert_matches!(event, BookingEvent::Created(e) => {
        assert_eq!(e.document_id, "booking-2");
        assert_eq!(e.data["vendorId"], "v1");
    });
}

// ---------------------------------------------------------------------------
// Test: hooks are acknowledged even when nobody is dispatching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hook_is_accepted_without_subscribers() {
    let (app, _bus) = build_test_app(lazy_pool());

    let response = post_json(
        app,
        "/hooks/bookings/booking-3/created",
        json!({"data": {}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

// ---------------------------------------------------------------------------
// Test: malformed bodies are rejected with the JSON error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_returns_400() {
    let (app, bus) = build_test_app(lazy_pool());
    let mut rx = bus.subscribe();

    let response = post_raw(app, "/hooks/bookings/booking-4/updated", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(rx.try_recv().is_err(), "nothing should be published");
}

#[tokio::test]
async fn missing_snapshot_returns_400() {
    let (app, _bus) = build_test_app(lazy_pool());

    let response = post_json(
        app,
        "/hooks/bookings/booking-5/updated",
        json!({"after": {"status": "confirmed"}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn blank_booking_id_returns_validation_error() {
    let (app, _bus) = build_test_app(lazy_pool());

    let response = post_json(app, "/hooks/bookings/%20/created", json!({"data": {}})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_on_hook_is_method_not_allowed() {
    let (app, _bus) = build_test_app(lazy_pool());

    let response = common::get(app, "/hooks/bookings/booking-6/created").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
