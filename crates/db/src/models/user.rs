//! Row model for the `users` table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A notification recipient.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    /// FCM registration token of the user's most recent device, if any.
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
