use auth::BearerError;
use thiserror::Error;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserError;

/// Top-level error for authentication and session operations.
///
/// Every credential failure (unknown email, wrong password, bad, expired or
/// revoked token) collapses into `Unauthorized` so callers cannot tell them
/// apart.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Validation errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Credential errors
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Malformed bearer credential")]
    MalformedCredential,

    // Internal faults
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// True for faults that are never the caller's doing.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Hashing(_) | AuthError::TokenIssuance(_) | AuthError::Storage(_)
        )
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthError::MissingCredential,
            BearerError::Malformed => AuthError::MalformedCredential,
        }
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyExists(email),
            // The token named a user that no longer exists
            UserError::NotFound(_) => AuthError::Unauthorized,
            UserError::InvalidUserId(_) | UserError::InvalidEmail(_) | UserError::DatabaseError(_) => {
                AuthError::Storage(err.to_string())
            }
        }
    }
}
