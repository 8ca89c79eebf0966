use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Server-side record of a long-lived refresh token.
///
/// The token value doubles as the primary key. A row is usable while it is
/// not revoked and its expiry lies in the future.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshToken")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("revoked_at", &self.revoked_at)
            .finish()
    }
}

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// * `InvalidEmail` - Email does not conform to RFC 5322
    /// * `InvalidPassword` - Password shorter than 6 characters
    pub fn new(email: String, password: String) -> Result<Self, AuthError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }
}

/// Command to log in with email and password.
///
/// Fields stay raw: malformed input is just another failed login.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    /// Requested access token lifetime; clamped by the authenticator
    pub expires_in: Option<Duration>,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Tokens handed out by a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

/// Command to replace the email and password of the authenticated user.
///
/// Fields stay raw until the caller is authenticated, so an anonymous caller
/// sees a credential failure before any validation error.
pub struct UpdateCredentialsCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UpdateCredentialsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCredentialsCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
