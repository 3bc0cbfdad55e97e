use thiserror::Error;

/// Errors reported by the refresh token store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No unexpired row matches the digest. Never existed, expired and
    /// already rotated away are indistinguishable.
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token hash conflict")]
    Conflict,

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}
