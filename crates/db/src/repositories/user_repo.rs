//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, fcm_token, created_at, updated_at";

/// Lookups and token maintenance for notification recipients.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user or replace the email and token of an existing one.
    pub async fn upsert(
        pool: &PgPool,
        id: &str,
        email: Option<&str>,
        fcm_token: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, fcm_token) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE \
             SET email = EXCLUDED.email, fcm_token = EXCLUDED.fcm_token, updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(email)
            .bind(fcm_token)
            .fetch_one(pool)
            .await
    }
}
