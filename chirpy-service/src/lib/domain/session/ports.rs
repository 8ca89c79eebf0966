use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::UpdateCredentialsCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication and session flows.
///
/// Operations taking `authorization` receive the raw `Authorization` header
/// value and perform bearer extraction themselves.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Storage` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue an access token plus a new refresh token.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email or wrong password
    /// * `Hashing` - Stored hash is unusable
    /// * `TokenIssuance` - Access token signing failed
    /// * `Storage` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token is neither rotated nor extended.
    ///
    /// # Errors
    /// * `MissingCredential` / `MalformedCredential` - Bad `Authorization` header
    /// * `Unauthorized` - Unknown, expired or revoked refresh token
    async fn refresh(&self, authorization: Option<&str>) -> Result<String, AuthError>;

    /// Revoke a refresh token. Revoking twice is not an error.
    ///
    /// # Errors
    /// * `MissingCredential` / `MalformedCredential` - Bad `Authorization` header
    /// * `Unauthorized` - Token was never issued
    async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthError>;

    /// Resolve the user behind an access token.
    ///
    /// # Errors
    /// * `MissingCredential` / `MalformedCredential` - Bad `Authorization` header
    /// * `Unauthorized` - Invalid or expired access token
    async fn authenticate_request(&self, authorization: Option<&str>)
        -> Result<UserId, AuthError>;

    /// Replace email and password of the user behind an access token.
    ///
    /// The current password is not re-checked.
    ///
    /// # Errors
    /// * `MissingCredential` / `MalformedCredential` - Bad `Authorization` header
    /// * `Unauthorized` - Invalid access token, or its user no longer exists
    /// * `EmailAlreadyExists` - New email belongs to another user
    async fn change_password(
        &self,
        authorization: Option<&str>,
        command: UpdateCredentialsCommand,
    ) -> Result<User, AuthError>;

    /// Delete every account. Development environments only.
    async fn reset(&self) -> Result<u64, AuthError>;
}

/// Turns a presented credential into the identity it stands for.
///
/// Implemented separately by the stateless access token verifier and the
/// stateful refresh token store; the two never share a type.
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static {
    /// # Errors
    /// * `Unauthorized` - Credential does not resolve to a user
    async fn resolve_identity(&self, credential: &str) -> Result<UserId, AuthError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new token row.
    ///
    /// # Errors
    /// * `Storage` - Database failure, including a duplicate token value
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, AuthError>;

    /// Look up a token row by its value.
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;

    /// Set `revoked_at` unless it is already set.
    ///
    /// # Returns
    /// `true` if the token exists (whether or not it was already revoked)
    async fn mark_revoked(&self, token: &str, revoked_at: DateTime<Utc>)
        -> Result<bool, AuthError>;

    /// Delete rows whose expiry is at or before `now`.
    ///
    /// # Returns
    /// Number of deleted rows
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError>;
}
