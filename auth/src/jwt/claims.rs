use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer stamped into every access token and required on validation.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy-access";

/// Registered claims carried by an access token.
///
/// All timestamps are Unix seconds (RFC 7519 NumericDate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for `subject`, valid from `issued_at` for `ttl`.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is no longer valid.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = AccessClaims::new("user123", issued_at, Duration::hours(1));

        assert_eq!(claims.iss, ACCESS_TOKEN_ISSUER);
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let issued_at = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = AccessClaims::new("user123", issued_at, Duration::seconds(10));

        assert!(!claims.is_expired(1009));
        assert!(claims.is_expired(1010));
        assert!(claims.is_expired(1011));
    }
}
