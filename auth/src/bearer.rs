use thiserror::Error;

/// Authorization scheme accepted on protected endpoints.
pub const BEARER_SCHEME: &str = "Bearer";

/// Error type for bearer credential parsing.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    Malformed,
}

/// Extract the credential from an `Authorization` header value.
///
/// Accepts exactly two whitespace-separated fields, the first being the
/// case-sensitive scheme `Bearer`.
///
/// # Errors
/// * `Missing` - No header, or an empty one
/// * `Malformed` - Wrong scheme, empty credential, or extra fields
pub fn extract_bearer(header: Option<&str>) -> Result<&str, BearerError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(BearerError::Missing),
    };

    let mut fields = header.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
