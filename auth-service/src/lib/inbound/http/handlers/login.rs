use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::register::CredentialsRequest;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserInfo;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CredentialsRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let outcome = state
        .auth_service
        .login(body.into_credentials())
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(state.refresh_cookie.issue(&outcome.refresh_token));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                access_token: outcome.access_token,
                user: outcome.user,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub user: UserInfo,
}
