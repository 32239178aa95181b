//! Postgres-backed [`RecipientResolver`].

use async_trait::async_trait;
use booking_core::recipient::{RecipientLookupResult, RecipientResolver, ResolverError};

use crate::repositories::UserRepo;
use crate::DbPool;

/// Resolves delivery tokens from the `users.fcm_token` column.
#[derive(Clone)]
pub struct PgRecipientResolver {
    pool: DbPool,
}

impl PgRecipientResolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientResolver for PgRecipientResolver {
    async fn lookup(&self, user_id: &str) -> Result<RecipientLookupResult, ResolverError> {
        let user = UserRepo::find_by_id(&self.pool, user_id)
            .await
            .map_err(|e| ResolverError::Store(e.to_string()))?;

        Ok(match user {
            Some(user) => RecipientLookupResult::found(user.fcm_token),
            None => {
                tracing::debug!(user_id, "No user row for recipient");
                RecipientLookupResult::not_found()
            }
        })
    }
}
