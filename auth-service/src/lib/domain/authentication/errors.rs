use thiserror::Error;

use crate::domain::token::errors::TokenError;

/// Errors crossing the authentication service boundary.
///
/// Anything that would reveal whether an email or a refresh token exists is
/// collapsed into `InvalidCredentials` or `TokenInvalid` before it gets here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token not valid yet")]
    TokenNotYetValid,

    #[error("User with this email already exists")]
    UserAlreadyExists,

    #[error("Refresh token conflict")]
    TokenConflict,

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Token signing failed: {0}")]
    SigningFailure(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => AuthError::TokenExpired,
            auth::JwtError::TokenNotYetValid => AuthError::TokenNotYetValid,
            auth::JwtError::InvalidToken(_) => AuthError::TokenInvalid,
            auth::JwtError::EncodingFailed(msg) => AuthError::SigningFailure(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::NotFound => AuthError::TokenInvalid,
            TokenError::Conflict => AuthError::TokenConflict,
            TokenError::StorageFailure(msg) => AuthError::StorageFailure(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_storage_failure_keeps_inner_message() {
        let err = AuthError::from(TokenError::StorageFailure("disk full".to_string()));

        assert_eq!(err, AuthError::StorageFailure("disk full".to_string()));
        assert_eq!(err.to_string(), "Storage failure: disk full");
    }
}
