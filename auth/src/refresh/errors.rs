use thiserror::Error;

/// Error type for opaque refresh token operations.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Failed to generate refresh token: {0}")]
    GenerationFailed(String),
}
