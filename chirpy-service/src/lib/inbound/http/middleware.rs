use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::session::errors::AuthError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Raw `Authorization` header value.
///
/// A header that is not visible ASCII counts as malformed.
pub fn authorization(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedCredential))
        .transpose()
}

/// Middleware that requires a valid access token and adds the caller to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = authorization(req.headers())?.map(str::to_owned);

    let user_id = state
        .auth_service
        .authenticate_request(header.as_deref())
        .await?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_authorization_absent() {
        assert_eq!(authorization(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_authorization_present() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization(&headers).unwrap(), Some("Bearer abc"));
    }

    #[test]
    fn test_authorization_not_ascii() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
        );
        assert!(matches!(
            authorization(&headers),
            Err(AuthError::MalformedCredential)
        ));
    }
}
