use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp aggregate entity.
///
/// A short text message owned by the user who posted it.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub user_id: UserId,
    pub body: ChirpBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object.
///
/// Non-empty and at most 140 characters, counted as chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 140;

    /// Create a new validated chirp body.
    ///
    /// # Errors
    /// * `Empty` - Body is an empty string
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.chars().count();
        if length == 0 {
            Err(ChirpBodyError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(body))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
