use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::Extensions;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::authentication::errors::AuthError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Claims that passed verification. Only this middleware can construct it,
/// so anything found in the extensions under this type has been verified.
#[derive(Debug, Clone)]
struct VerifiedClaims(auth::Claims);

/// Claims attached by [`require_access_token`], if the request went through it.
pub fn verified_claims(extensions: &Extensions) -> Option<&auth::Claims> {
    extensions.get::<VerifiedClaims>().map(|v| &v.0)
}

/// Extractor for handlers behind [`require_access_token`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub auth::Claims);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        verified_claims(&parts.extensions)
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError::Unauthorized("Authorization header required".to_string()))
    }
}

/// Middleware that validates the bearer access token and attaches its claims
/// to the request extensions
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).map_err(IntoResponse::into_response)?;

    let claims = state
        .auth_service
        .validate_access_token(token)
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Access token rejected");
            rejection_for(e).into_response()
        })?;

    req.extensions_mut().insert(VerifiedClaims(claims));

    Ok(next.run(req).await)
}

fn rejection_for(err: AuthError) -> ApiError {
    let message = match err {
        AuthError::TokenExpired => "Token has expired",
        AuthError::TokenNotYetValid => "Token is not yet valid",
        _ => "Invalid or malformed token",
    };
    ApiError::Unauthorized(message.to_string())
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Authorization header required".to_string()))?;

    let malformed = || {
        ApiError::Unauthorized("Authorization header format must be Bearer {token}".to_string())
    };

    let token = auth_header
        .to_str()
        .map_err(|_| malformed())?
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(malformed)?
        .trim();

    if token.is_empty() {
        return Err(malformed());
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/me");
        if let Some(value) = header {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    fn unauthorized(message: &str) -> ApiError {
        ApiError::Unauthorized(message.to_string())
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_token_missing_header() {
        let req = request_with(None);
        assert_eq!(
            extract_token_from_header(&req).unwrap_err(),
            unauthorized("Authorization header required")
        );
    }

    #[test]
    fn test_extract_token_rejects_other_schemes_and_empty_token() {
        for value in ["Basic dXNlcjpwYXNz", "abc.def.ghi", "Bearer ", "Bearer    "] {
            let req = request_with(Some(value));
            assert_eq!(
                extract_token_from_header(&req).unwrap_err(),
                unauthorized("Authorization header format must be Bearer {token}"),
                "{value}"
            );
        }
    }

    #[test]
    fn test_rejection_messages_distinguish_temporal_failures() {
        assert_eq!(
            rejection_for(AuthError::TokenExpired),
            unauthorized("Token has expired")
        );
        assert_eq!(
            rejection_for(AuthError::TokenNotYetValid),
            unauthorized("Token is not yet valid")
        );
        assert_eq!(
            rejection_for(AuthError::TokenInvalid),
            unauthorized("Invalid or malformed token")
        );
    }

    #[test]
    fn test_verified_claims_absent_by_default() {
        let req = request_with(None);
        assert!(verified_claims(req.extensions()).is_none());
    }
}
