//! Authentication primitives for the chirpy service
//!
//! Provides the stateless half of the session model:
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (HS256 JWT)
//! - Opaque refresh token generation
//! - Bearer credential extraction
//!
//! Persistence of refresh tokens is left to the service, which owns the
//! storage ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Bearer Credentials
//! ```
//! use auth::bearer::extract_bearer;
//!
//! assert_eq!(extract_bearer(Some("Bearer abc")).unwrap(), "abc");
//! assert!(extract_bearer(Some("Token abc")).is_err());
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer;
pub use bearer::BearerError;
pub use jwt::AccessClaims;
pub use jwt::AccessTokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
