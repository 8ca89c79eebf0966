use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::claims::ACCESS_TOKEN_ISSUER;
use super::errors::TokenError;

/// Stateless codec for short-lived access tokens.
///
/// Tokens are HS256 JWTs keyed by a shared secret. Validity depends only on
/// the signature, the algorithm, the issuer and the expiry; nothing is looked
/// up in storage, so a leaked token stays usable until its `exp`.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl AccessTokenCodec {
    /// Create a codec from the signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration, never from source
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `subject` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    /// Issue a token whose validity window starts at `issued_at`.
    pub fn issue_at(
        &self,
        subject: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims::new(subject, issued_at, ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Not a decodable JWT, or required claims are missing
    /// * `InvalidSignature` - Signed with a different key
    /// * `UnexpectedAlgorithm` - Header names any algorithm other than HS256
    /// * `Expired` - Current time is at or past `exp`
    /// * `InvalidIssuer` - `iss` is not the access token issuer
    /// * `InvalidSubject` - `sub` is not a UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Uuid::parse_str(&claims.sub).map_err(|e| TokenError::InvalidSubject(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
