use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and access token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Signed access token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    /// Compact JWT
    pub token: String,
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `issuer` - Service identifier stamped into every access token
    pub fn new(jwt_secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, issuer),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Verification could not be performed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Mint an access token for a user, valid from `now` for `lifetime`.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<IssuedAccessToken, JwtError> {
        let claims = Claims::for_user(user_id, email, self.jwt_handler.issuer(), now, lifetime);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedAccessToken { token, claims })
    }

    /// Validate and decode an access token at the current time.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_verify_password_success() {
        let authenticator = Authenticator::new(SECRET, "test");

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_mismatch() {
        let authenticator = Authenticator::new(SECRET, "test");
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.verify_password("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_malformed_digest() {
        let authenticator = Authenticator::new(SECRET, "test");

        let result = authenticator.verify_password("my_password", "not-a-phc-string");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET, "test");
        let user_id = Uuid::new_v4();

        let issued = authenticator
            .issue_access_token(user_id, "alice@example.com", Utc::now(), Duration::minutes(15))
            .expect("Failed to generate token");

        let decoded = authenticator
            .validate_token(&issued.token)
            .expect("Failed to validate token");

        assert_eq!(decoded, issued.claims);
        assert_eq!(decoded.uid, user_id);
        assert_eq!(decoded.sub, user_id.to_string());
        assert_eq!(decoded.iss, "test");
    }

    #[test]
    fn test_tokens_issued_in_same_second_differ() {
        let authenticator = Authenticator::new(SECRET, "test");
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let first = authenticator
            .issue_access_token(user_id, "alice@example.com", now, Duration::minutes(15))
            .unwrap();
        let second = authenticator
            .issue_access_token(user_id, "alice@example.com", now, Duration::minutes(15))
            .unwrap();

        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET, "test");

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
