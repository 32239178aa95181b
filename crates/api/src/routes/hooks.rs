//! Route definitions for document-store hooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/hooks`.
///
/// ```text
/// POST   /bookings/{id}/updated     -> booking_updated
/// POST   /bookings/{id}/created     -> booking_created
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings/{id}/updated", post(bookings::booking_updated))
        .route("/bookings/{id}/created", post(bookings::booking_created))
}
