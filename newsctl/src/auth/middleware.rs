use crate::{
    AppState,
    auth::session::{self, SessionClaims},
    config::Config,
    errors::Error,
};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{trace, warn};

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Implementation for require_session_middleware: a missing or malformed header is
/// `Unauthenticated`, a token that fails verification is `InvalidToken`.
pub(crate) fn require_session(headers: &HeaderMap, config: &Config) -> Result<SessionClaims, Error> {
    let Some(token) = bearer_token(headers) else {
        warn!("Unauthorized access: missing or malformed bearer token");
        return Err(Error::Unauthenticated { message: None });
    };

    let claims = session::verify_session_token(token, config)?;
    trace!("Session token valid until {}", claims.exp);
    Ok(claims)
}

/// Middleware guarding the news API: only requests with a valid session token reach the handler
pub async fn require_session_middleware(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, Error> {
    require_session(request.headers(), &state.config)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_config;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("bearer abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_require_session_outcomes() {
        let config = create_test_config();

        let missing = require_session(&HeaderMap::new(), &config).unwrap_err();
        assert!(matches!(missing, Error::Unauthenticated { .. }));

        let malformed = require_session(&headers_with("Token abc"), &config).unwrap_err();
        assert!(matches!(malformed, Error::Unauthenticated { .. }));

        let invalid = require_session(&headers_with("Bearer not.a.token"), &config).unwrap_err();
        assert!(matches!(invalid, Error::InvalidToken { .. }));

        let token = session::create_session_token(&config).unwrap();
        assert!(require_session(&headers_with(&format!("Bearer {token}")), &config).is_ok());
    }
}
