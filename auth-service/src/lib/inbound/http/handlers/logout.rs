use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::cookies::presented_refresh_token;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let Some(presented) = presented_refresh_token(&jar) else {
        return Ok((
            jar.add(state.refresh_cookie.expire()),
            ApiSuccess::new(StatusCode::OK, MessageData::new("No active session")),
        ));
    };

    state
        .auth_service
        .logout(&presented)
        .await
        .map_err(ApiError::from)?;

    Ok((
        jar.add(state.refresh_cookie.expire()),
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out successfully")),
    ))
}
