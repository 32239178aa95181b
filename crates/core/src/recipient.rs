//! Recipient resolution: user id to push delivery token.

use async_trait::async_trait;

use crate::notification::ErrorKind;

/// What a lookup found for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientLookupResult {
    pub found: bool,
    pub delivery_token: Option<String>,
}

impl RecipientLookupResult {
    /// The user record exists; `token` may still be absent.
    pub fn found(token: Option<String>) -> Self {
        Self {
            found: true,
            delivery_token: token,
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            delivery_token: None,
        }
    }

    /// The usable delivery token, or the reason there is none.
    ///
    /// Empty and whitespace-only tokens count as missing.
    pub fn into_token(self) -> Result<String, ErrorKind> {
        if !self.found {
            return Err(ErrorKind::RecipientNotFound);
        }
        match self.delivery_token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ErrorKind::TokenMissing),
        }
    }
}

/// Failure of the lookup itself (as opposed to a user without a token).
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("Recipient store error: {0}")]
    Store(String),
}

/// Reads a user record and returns its delivery token if present.
#[async_trait]
pub trait RecipientResolver: Send + Sync {
    async fn lookup(&self, user_id: &str) -> Result<RecipientLookupResult, ResolverError>;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn found_with_token_yields_token() {
        let result = RecipientLookupResult::found(Some("tok1".into()));
        assert_eq!(result.into_token().unwrap(), "tok1");
    }

    #[test]
    fn not_found_yields_recipient_not_found() {
        assert_matches!(
            RecipientLookupResult::not_found().into_token(),
            Err(ErrorKind::RecipientNotFound)
        );
    }

    #[test]
    fn absent_or_blank_token_yields_token_missing() {
        assert_matches!(
            RecipientLookupResult::found(None).into_token(),
            Err(ErrorKind::TokenMissing)
        );
        assert_matches!(
            RecipientLookupResult::found(Some("  ".into())).into_token(),
            Err(ErrorKind::TokenMissing)
        );
    }
}
