use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::IdentityResolver;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

/// Lifetime of a refresh token unless configured otherwise.
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Issues, resolves and revokes opaque refresh tokens.
///
/// All state lives in the repository. Expiry is checked on every lookup, so
/// correctness never depends on expired rows being purged.
pub struct RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
    ttl: Duration,
}

impl<RR> RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    /// # Arguments
    /// * `repository` - Refresh token persistence implementation
    /// * `ttl` - Lifetime of newly issued tokens
    pub fn new(repository: Arc<RR>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Issue a new refresh token for `user_id`.
    ///
    /// # Errors
    /// * `Storage` - Insert failed (including a value collision)
    pub async fn issue(&self, user_id: UserId) -> Result<RefreshToken, AuthError> {
        let now = Utc::now();
        let token = RefreshToken {
            token: auth::generate_refresh_token(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
            revoked_at: None,
        };

        let token = self.repository.insert(token).await?;
        tracing::debug!(user_id = %user_id, expires_at = %token.expires_at, "Refresh token issued");

        Ok(token)
    }

    /// Resolve a refresh token to its owner.
    ///
    /// # Errors
    /// * `Unauthorized` - Token unknown, revoked or expired
    pub async fn resolve_user(&self, token: &str) -> Result<UserId, AuthError> {
        let row = self
            .repository
            .find(token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !row.is_usable_at(Utc::now()) {
            tracing::debug!(
                user_id = %row.user_id,
                revoked = row.revoked_at.is_some(),
                "Refresh token rejected"
            );
            return Err(AuthError::Unauthorized);
        }

        Ok(row.user_id)
    }

    /// Revoke a refresh token.
    ///
    /// Idempotent: revoking an already revoked token keeps the original
    /// revocation time and succeeds.
    ///
    /// # Errors
    /// * `Unauthorized` - Token was never issued
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        if self.repository.mark_revoked(token, Utc::now()).await? {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Delete expired rows.
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        self.repository.delete_expired(Utc::now()).await
    }
}

#[async_trait]
impl<RR> IdentityResolver for RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    async fn resolve_identity(&self, credential: &str) -> Result<UserId, AuthError> {
        self.resolve_user(credential).await
    }
}

/// Periodically purge expired refresh tokens.
///
/// Storage hygiene only; runs until the task is dropped.
pub async fn run_purge_loop<RR>(store: Arc<RefreshTokenStore<RR>>, interval_secs: u64)
where
    RR: RefreshTokenRepository,
{
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        match store.purge_expired().await {
            Ok(0) => {}
            Ok(count) => tracing::info!(count, "Purged expired refresh tokens"),
            Err(e) => tracing::warn!(error = %e, "Refresh token purge failed"),
        }
    }
}
