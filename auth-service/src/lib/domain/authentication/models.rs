use crate::domain::token::models::RefreshToken;
use crate::domain::user::models::UserInfo;

/// Minimum accepted password length, in bytes.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Credentials submitted for registration or login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed access token
    pub access_token: String,
    /// Raw opaque refresh token; only its digest is stored
    pub refresh_token: RefreshToken,
    pub user: UserInfo,
}

/// Successful refresh token rotation.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub access_token: String,
    /// Replaces the consumed token
    pub refresh_token: RefreshToken,
}
