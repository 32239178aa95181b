//! Handlers for booking document hooks.
//!
//! The document store calls these when a booking is created or updated. Each
//! request is turned into a [`BookingEvent`] and published on the event bus;
//! the response never waits for, or reflects, notification delivery.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use booking_core::booking::{BookingEvent, ChangeEvent, CreationEvent};
use booking_core::types::Document;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /hooks/bookings/{id}/updated`.
#[derive(Debug, Deserialize)]
pub struct BookingUpdatedRequest {
    pub before: Document,
    pub after: Document,
}

/// Body of `POST /hooks/bookings/{id}/created`.
#[derive(Debug, Deserialize)]
pub struct BookingCreatedRequest {
    pub data: Document,
}

/// Acknowledgment returned for every accepted hook.
#[derive(Debug, Serialize)]
pub struct HookAccepted {
    pub booking_id: String,
    pub event: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /hooks/bookings/{id}/updated
pub async fn booking_updated(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    body: Result<Json<BookingUpdatedRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<HookAccepted>)> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let event = ChangeEvent::new(booking_id, body.before, body.after)?;
    Ok(accept(&state, BookingEvent::Updated(event), "updated"))
}

/// POST /hooks/bookings/{id}/created
pub async fn booking_created(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    body: Result<Json<BookingCreatedRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<HookAccepted>)> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let event = CreationEvent::new(booking_id, body.data)?;
    Ok(accept(&state, BookingEvent::Created(event), "created"))
}

/// Publish and acknowledge. The hook is accepted even with no dispatcher
/// listening; delivery is never the caller's concern.
fn accept(
    state: &AppState,
    event: BookingEvent,
    kind: &'static str,
) -> (StatusCode, Json<HookAccepted>) {
    let booking_id = event.document_id().to_string();
    let receivers = state.event_bus.publish(event);
    if receivers == 0 {
        tracing::warn!(booking_id = %booking_id, kind, "No dispatcher subscribed, event dropped");
    } else {
        tracing::debug!(booking_id = %booking_id, kind, "Booking event published");
    }

    (
        StatusCode::ACCEPTED,
        Json(HookAccepted {
            booking_id,
            event: kind,
        }),
    )
}
