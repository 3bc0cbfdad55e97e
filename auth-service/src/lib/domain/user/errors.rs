use thiserror::Error;

/// Errors reported by the user store.
///
/// `NotFound` is an internal signal; the authentication service never lets
/// it reach a caller verbatim.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}
