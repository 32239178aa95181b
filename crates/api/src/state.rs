use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (recipient lookups, health).
    pub pool: booking_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bus the booking hooks publish to.
    pub event_bus: Arc<booking_events::EventBus>,
}
