//! Caller Middleware
//!
//! Resolves the bearer token into a [`Caller`] and gates system-only routes.

use axum::body::Body;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::domain::value_object::{caller::Caller, role::Role};
use crate::error::{ProfileError, ProfileResult};
use crate::infra::jwt::TokenVerifier;

/// Middleware state
#[derive(Clone)]
pub struct CallerMiddlewareState {
    pub verifier: Arc<TokenVerifier>,
}

/// Attach the request's [`Caller`] to its extensions.
///
/// No `Authorization` header means an anonymous caller; a header that does
/// not carry a valid bearer token is rejected with 401.
pub async fn resolve_caller(
    State(state): State<CallerMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ProfileError> {
    let caller = match bearer_token(req.headers())? {
        Some(token) => state.verifier.verify(token)?,
        None => Caller::anonymous(),
    };

    tracing::debug!(role = %caller.role, "Caller resolved");

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

/// Only the service and auth-admin roles may pass
pub async fn require_trusted_role(
    Extension(caller): Extension<Caller>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ProfileError> {
    match caller.role {
        role if role.is_trusted() => Ok(next.run(req).await),
        Role::Anon => Err(ProfileError::Unauthenticated),
        _ => Err(ProfileError::Forbidden),
    }
}

fn bearer_token(headers: &HeaderMap) -> ProfileResult<Option<&str>> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| ProfileError::InvalidToken)?;
    let (scheme, token) = value.split_once(' ').ok_or(ProfileError::InvalidToken)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(ProfileError::InvalidToken);
    }
    Ok(Some(token.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&HeaderMap::new()).unwrap(), None);
        assert_eq!(bearer_token(&headers_with("Bearer abc")).unwrap(), Some("abc"));
        assert_eq!(bearer_token(&headers_with("bearer  abc ")).unwrap(), Some("abc"));

        assert!(bearer_token(&headers_with("Basic abc")).is_err());
        assert!(bearer_token(&headers_with("Bearer")).is_err());
        assert!(bearer_token(&headers_with("Bearer   ")).is_err());
    }
}
