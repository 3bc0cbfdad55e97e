use thiserror::Error;

/// Failures of the password hasher itself.
///
/// A wrong password or a malformed stored digest is not an error; those
/// verify as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Salt generation or Argon2 computation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Unexpected internal failure while verifying a well-formed digest
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
