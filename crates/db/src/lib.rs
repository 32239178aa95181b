//! Postgres access for the booking notification service.
//!
//! Owns the `users` table lookups that back the
//! [`RecipientResolver`](booking_core::recipient::RecipientResolver) seam.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod resolver;

pub use resolver::PgRecipientResolver;

pub type DbPool = sqlx::PgPool;

/// Default pool size when `DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
