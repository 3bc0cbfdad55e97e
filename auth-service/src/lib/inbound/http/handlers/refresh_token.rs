use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::errors::AuthError;
use crate::inbound::http::cookies::presented_refresh_token;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<RefreshResponseData>), ApiError> {
    let presented = presented_refresh_token(&jar)
        .ok_or_else(|| ApiError::Unauthorized("Refresh token required".to_string()))?;

    let outcome = state
        .auth_service
        .process_refresh_token(&presented)
        .await
        .map_err(|e| match e {
            AuthError::TokenInvalid => {
                ApiError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            _ => ApiError::from(e),
        })?;

    let jar = jar.add(state.refresh_cookie.issue(&outcome.refresh_token));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            RefreshResponseData {
                access_token: outcome.access_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
}
