//! Authentication service for workspace API tokens.

use std::sync::Arc;

use crate::domain::entities::WorkspaceContext;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use crate::utils::token_hash::hash_token;
use serde_json::json;

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// lookup, so the database never sees a raw token.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns the workspace context it grants.
    ///
    /// On success, `last_used_at` is refreshed; a failure to do so is logged
    /// and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<WorkspaceContext, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let ctx = self
            .repository
            .find_context(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or revoked token"}),
                )
            })?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(ctx)
    }
}
