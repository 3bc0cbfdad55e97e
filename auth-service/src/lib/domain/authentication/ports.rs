use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::authentication::models::RefreshOutcome;
use crate::domain::token::models::RefreshToken;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserInfo;

/// Port for authentication and session lifecycle operations.
///
/// Implementations hold no per-call mutable state and are shared across
/// concurrent requests.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity. No tokens are issued.
    ///
    /// # Errors
    /// * `InvalidInput` - Empty email/password or password shorter than 8
    /// * `UserAlreadyExists` - Email is already registered
    /// * `StorageFailure` - Database operation failed
    /// * `HashingFailure` - Password could not be hashed
    async fn register(&self, credentials: Credentials) -> Result<User, AuthError>;

    /// Verify credentials and issue an access token plus a refresh token.
    ///
    /// # Errors
    /// * `InvalidInput` - Empty email or password
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenConflict` - Refresh token digest collided
    /// * `StorageFailure` - Database operation failed
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AuthError>;

    /// Verify an access token (optional `Bearer ` prefix) and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Expiry has passed
    /// * `TokenNotYetValid` - Used before not-before
    /// * `TokenInvalid` - Any other verification failure
    fn validate_access_token(&self, token: &str) -> Result<auth::Claims, AuthError>;

    /// Exchange a refresh token for a new access/refresh pair. The presented
    /// token is consumed.
    ///
    /// # Errors
    /// * `TokenInvalid` - Empty, unknown, expired or already used
    /// * `StorageFailure` - The replacement token could not be stored
    async fn process_refresh_token(
        &self,
        refresh_token: &RefreshToken,
    ) -> Result<RefreshOutcome, AuthError>;

    /// Revoke a single refresh token. Unknown or empty tokens are a no-op.
    ///
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn logout(&self, refresh_token: &RefreshToken) -> Result<(), AuthError>;

    /// Revoke every refresh token of a user.
    ///
    /// # Returns
    /// Number of tokens revoked
    async fn revoke_all_sessions(&self, user_id: &UserId) -> Result<u64, AuthError>;

    /// Remove expired refresh tokens.
    ///
    /// # Returns
    /// Number of tokens removed
    async fn purge_expired_tokens(&self) -> Result<u64, AuthError>;

    /// Sanitized profile of a user referenced by a verified token.
    ///
    /// # Errors
    /// * `TokenInvalid` - The user no longer exists
    /// * `StorageFailure` - Database operation failed
    async fn user_profile(&self, user_id: &UserId) -> Result<UserInfo, AuthError>;
}

#[cfg(test)]
mockall::mock! {
    pub TestAuthService {}

    #[async_trait]
    impl AuthServicePort for TestAuthService {
        async fn register(&self, credentials: Credentials) -> Result<User, AuthError>;
        async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AuthError>;
        fn validate_access_token(&self, token: &str) -> Result<auth::Claims, AuthError>;
        async fn process_refresh_token(
            &self,
            refresh_token: &RefreshToken,
        ) -> Result<RefreshOutcome, AuthError>;
        async fn logout(&self, refresh_token: &RefreshToken) -> Result<(), AuthError>;
        async fn revoke_all_sessions(&self, user_id: &UserId) -> Result<u64, AuthError>;
        async fn purge_expired_tokens(&self) -> Result<u64, AuthError>;
        async fn user_profile(&self, user_id: &UserId) -> Result<UserInfo, AuthError>;
    }
}
