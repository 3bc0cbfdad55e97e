use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::Authenticated;
use crate::inbound::http::router::AppState;

/// Identity behind the presented access token. The subject must still exist.
pub async fn me(
    State(state): State<AppState>,
    Authenticated(claims): Authenticated,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    let expires_at = claims
        .expires_at()
        .ok_or_else(|| ApiError::Unauthorized("Invalid or malformed token".to_string()))?;

    let profile = state
        .auth_service
        .user_profile(&UserId(claims.uid))
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user_id: profile.id.to_string(),
            email: profile.email,
            expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}
