use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and access
/// token issuance.
///
/// Owns the access token lifetime policy: every token it mints lives at most
/// `default_access_ttl`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: AccessTokenCodec,
    default_access_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for access token signing
    /// * `default_access_ttl` - Lifetime of access tokens, also the upper bound for overrides
    pub fn new(secret: &[u8], default_access_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            codec: AccessTokenCodec::new(secret),
            default_access_ttl,
        }
    }

    /// Resolve a caller-requested access token lifetime.
    ///
    /// Absent, zero or negative requests fall back to the default; anything
    /// longer than the default is clamped to it. A token never outlives the
    /// default lifetime.
    pub fn access_ttl(&self, requested: Option<Duration>) -> Duration {
        match requested {
            Some(ttl) if ttl > Duration::zero() && ttl < self.default_access_ttl => ttl,
            _ => self.default_access_ttl,
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.codec.issue(subject, ttl)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token with the default lifetime, without password
    /// verification.
    ///
    /// Used by the refresh flow, where identity was proven by other means.
    pub fn generate_token(&self, subject: Uuid) -> Result<String, TokenError> {
        self.codec.issue(subject, self.default_access_ttl)
    }

    /// Validate an access token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.codec.validate(token)
    }
}
