use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenHash;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persistence operations for hashed refresh tokens.
///
/// Exclusivity ("one valid row per digest") is enforced by the backing
/// store's unique constraint, not by this trait's callers.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Insert a refresh token row.
    ///
    /// # Errors
    /// * `Conflict` - A row with this digest already exists
    /// * `StorageFailure` - Database operation failed
    async fn save(
        &self,
        user_id: &UserId,
        token_hash: &TokenHash,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenError>;

    /// Resolve an unexpired token digest to its owner.
    ///
    /// # Errors
    /// * `NotFound` - No unexpired row matches
    /// * `StorageFailure` - Database operation failed
    async fn validate_and_fetch_user(&self, token_hash: &TokenHash) -> Result<User, TokenError>;

    /// Delete the row for a digest. Deleting a missing row succeeds.
    ///
    /// # Returns
    /// `true` when this call removed the row
    ///
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn delete_by_hash(&self, token_hash: &TokenHash) -> Result<bool, TokenError>;

    /// Revoke every refresh token of a user.
    ///
    /// # Returns
    /// Number of rows removed
    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, TokenError>;

    /// Delete every row past its expiry.
    ///
    /// # Returns
    /// Number of rows removed
    async fn purge_expired(&self) -> Result<u64, TokenError>;
}
