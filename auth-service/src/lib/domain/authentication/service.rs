use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::AuthenticationError;
use chrono::Duration;
use chrono::Utc;

use crate::config::is_placeholder_secret;
use crate::config::JwtConfig;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::authentication::models::RefreshOutcome;
use crate::domain::authentication::models::MIN_PASSWORD_LENGTH;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::token::models::RefreshToken;
use crate::domain::token::ports::TokenStore;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserInfo;
use crate::domain::user::ports::UserStore;

/// Well-formed Argon2id digest that matches no password. Verified against
/// when the email is unknown so both login failures cost the same.
const UNKNOWN_USER_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Signing secret and token lifetimes.
#[derive(Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub issuer: String,
    pub access_token_lifetime: Duration,
    pub refresh_token_lifetime: Duration,
}

impl From<&JwtConfig> for AuthSettings {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            access_token_lifetime: config.access_token_lifetime(),
            refresh_token_lifetime: config.refresh_token_lifetime(),
        }
    }
}

/// Domain service implementation for registration, login and token rotation.
///
/// Owns no storage; both stores are injected. Holds only immutable
/// configuration, so one instance serves all requests concurrently.
pub struct AuthService<US, TS>
where
    US: UserStore,
    TS: TokenStore,
{
    user_store: Arc<US>,
    token_store: Arc<TS>,
    authenticator: Arc<Authenticator>,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl<US, TS> AuthService<US, TS>
where
    US: UserStore,
    TS: TokenStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Errors
    /// * `Configuration` - Secret is empty or a placeholder, or a lifetime is not positive
    pub fn new(
        user_store: Arc<US>,
        token_store: Arc<TS>,
        settings: AuthSettings,
    ) -> Result<Self, AuthError> {
        if is_placeholder_secret(&settings.secret) {
            return Err(AuthError::Configuration(
                "signing secret is empty or a placeholder".to_string(),
            ));
        }
        if settings.access_token_lifetime <= Duration::zero()
            || settings.refresh_token_lifetime <= Duration::zero()
        {
            return Err(AuthError::Configuration(
                "token lifetimes must be positive".to_string(),
            ));
        }

        Ok(Self {
            user_store,
            token_store,
            authenticator: Arc::new(Authenticator::new(
                settings.secret.as_bytes(),
                settings.issuer,
            )),
            access_token_lifetime: settings.access_token_lifetime,
            refresh_token_lifetime: settings.refresh_token_lifetime,
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?
            .map_err(|e| AuthError::HashingFailure(e.to_string()))
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<(), AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &digest))
            .await
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                other => AuthError::HashingFailure(other.to_string()),
            })
    }

    fn mint_access_token(&self, user: &User) -> Result<String, AuthError> {
        self.authenticator
            .issue_access_token(user.id.0, &user.email, Utc::now(), self.access_token_lifetime)
            .map(|issued| issued.token)
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to sign access token");
                AuthError::from(e)
            })
    }

    /// Generate a refresh token and store its digest for `user_id`.
    async fn mint_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, AuthError> {
        let token = auth::refresh::generate_token()
            .map(RefreshToken::new)
            .map_err(|e| AuthError::SigningFailure(e.to_string()))?;
        let expires_at = Utc::now() + self.refresh_token_lifetime;

        self.token_store
            .save(user_id, &token.hash(), expires_at)
            .await
            .map_err(AuthError::from)?;

        Ok(token)
    }
}

fn require_credentials(credentials: &Credentials) -> Result<(), AuthError> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::InvalidInput(
            "email and password are required".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl<US, TS> AuthServicePort for AuthService<US, TS>
where
    US: UserStore,
    TS: TokenStore,
{
    async fn register(&self, credentials: Credentials) -> Result<User, AuthError> {
        require_credentials(&credentials)?;
        if credentials.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::InvalidInput(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        match self.user_store.find_by_email(&credentials.email).await {
            Ok(_) => return Err(AuthError::UserAlreadyExists),
            Err(UserError::NotFound(_)) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to check for existing user during registration");
                return Err(AuthError::StorageFailure(e.to_string()));
            }
        }

        let password_hash = self.hash_password(credentials.password).await?;

        let user = self
            .user_store
            .create(&credentials.email, &password_hash)
            .await
            .map_err(|e| match e {
                UserError::DuplicateUser(_) => AuthError::UserAlreadyExists,
                other => AuthError::StorageFailure(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AuthError> {
        require_credentials(&credentials)?;

        let user = match self.user_store.find_by_email(&credentials.email).await {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => {
                // Same hashing cost as a wrong password; the result is irrelevant.
                let _ = self
                    .verify_password(credentials.password, UNKNOWN_USER_DIGEST.to_string())
                    .await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up user during login");
                return Err(AuthError::StorageFailure(e.to_string()));
            }
        };

        self.verify_password(credentials.password, user.password_hash.clone())
            .await?;

        let access_token = self.mint_access_token(&user)?;
        let refresh_token = self.mint_refresh_token(&user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome {
            access_token,
            refresh_token,
            user: UserInfo::from(&user),
        })
    }

    fn validate_access_token(&self, token: &str) -> Result<auth::Claims, AuthError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AuthError::from(e)
        })
    }

    async fn process_refresh_token(
        &self,
        refresh_token: &RefreshToken,
    ) -> Result<RefreshOutcome, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        let old_hash = refresh_token.hash();

        let user = self
            .token_store
            .validate_and_fetch_user(&old_hash)
            .await
            .map_err(|e| {
                tracing::info!(token_hash = %old_hash, error = %e, "Refresh token rejected");
                AuthError::TokenInvalid
            })?;

        // Consume the presented token before anything new is issued. Only
        // the caller whose delete removed the row may rotate it.
        match self.token_store.delete_by_hash(&old_hash).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    token_hash = %old_hash,
                    user_id = %user.id,
                    "Refresh token consumed by a concurrent rotation"
                );
                return Err(AuthError::TokenInvalid);
            }
            Err(e) => tracing::warn!(
                token_hash = %old_hash,
                user_id = %user.id,
                error = %e,
                "Failed to delete refresh token after validation"
            ),
        }

        let access_token = self.mint_access_token(&user)?;
        let new_refresh_token = self.mint_refresh_token(&user.id).await.map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                "Failed to store rotated refresh token"
            );
            match e {
                AuthError::TokenConflict => {
                    AuthError::StorageFailure("refresh token digest collided".to_string())
                }
                other => other,
            }
        })?;

        tracing::info!(user_id = %user.id, "Refresh token rotated");
        Ok(RefreshOutcome {
            access_token,
            refresh_token: new_refresh_token,
        })
    }

    async fn logout(&self, refresh_token: &RefreshToken) -> Result<(), AuthError> {
        if refresh_token.is_empty() {
            return Ok(());
        }

        self.token_store
            .delete_by_hash(&refresh_token.hash())
            .await
            .map(|_| ())
            .map_err(AuthError::from)
    }

    async fn revoke_all_sessions(&self, user_id: &UserId) -> Result<u64, AuthError> {
        self.token_store
            .delete_all_for_user(user_id)
            .await
            .map_err(AuthError::from)
    }

    async fn purge_expired_tokens(&self) -> Result<u64, AuthError> {
        self.token_store
            .purge_expired()
            .await
            .map_err(AuthError::from)
    }

    async fn user_profile(&self, user_id: &UserId) -> Result<UserInfo, AuthError> {
        match self.user_store.find_by_id(user_id).await {
            Ok(user) => Ok(UserInfo::from(&user)),
            Err(UserError::NotFound(_)) => Err(AuthError::TokenInvalid),
            Err(e) => Err(AuthError::StorageFailure(e.to_string())),
        }
    }
}
