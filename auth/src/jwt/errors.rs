use thiserror::Error;

/// Error type for access token operations.
///
/// Every variant except `EncodingFailed` means the presented token is invalid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token was signed with an unexpected algorithm")]
    UnexpectedAlgorithm,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is not accepted")]
    InvalidIssuer,

    #[error("Token subject is not a valid identifier: {0}")]
    InvalidSubject(String),
}
