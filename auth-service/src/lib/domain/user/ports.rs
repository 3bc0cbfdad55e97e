use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Persistence operations for user identity records.
///
/// Only the subset the authentication flows need; update and delete are
/// handled outside this service.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new identity row.
    ///
    /// # Arguments
    /// * `email` - Email as provided (case-sensitive)
    /// * `password_hash` - Digest produced by the credential hasher
    ///
    /// # Returns
    /// The stored record including database timestamps
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `StorageFailure` - Database operation failed
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `StorageFailure` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StorageFailure` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError>;
}
