use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenHash;
use crate::domain::token::ports::TokenStore;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::outbound::repositories::user::UserRow;

const REFRESH_TOKENS_HASH_KEY: &str = "refresh_tokens_token_hash_key";

pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PostgresTokenStore {
    async fn save(
        &self,
        user_id: &UserId,
        token_hash: &TokenHash,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id.0)
        .bind(token_hash.as_str())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(REFRESH_TOKENS_HASH_KEY)
                {
                    tracing::error!(
                        user_id = %user_id,
                        token_hash = %token_hash,
                        "Refresh token hash collision"
                    );
                    return TokenError::Conflict;
                }
            }
            tracing::error!(user_id = %user_id, error = %e, "Failed to save refresh token");
            TokenError::StorageFailure(e.to_string())
        })?;

        Ok(())
    }

    async fn validate_and_fetch_user(&self, token_hash: &TokenHash) -> Result<User, TokenError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.created_at, u.updated_at
            FROM refresh_tokens rt
            JOIN users u ON rt.user_id = u.id
            WHERE rt.token_hash = $1 AND rt.expires_at > NOW()
            "#,
        )
        .bind(token_hash.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(token_hash = %token_hash, error = %e, "Failed to validate refresh token");
            TokenError::StorageFailure(e.to_string())
        })?;

        row.map(User::from).ok_or(TokenError::NotFound)
    }

    async fn delete_by_hash(&self, token_hash: &TokenHash) -> Result<bool, TokenError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(token_hash = %token_hash, error = %e, "Failed to delete refresh token");
            TokenError::StorageFailure(e.to_string())
        })?;

        let deleted = result.rows_affected() > 0;
        if !deleted {
            tracing::warn!(token_hash = %token_hash, "Refresh token to delete was not found");
        }

        Ok(deleted)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, TokenError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to delete refresh tokens of user");
            TokenError::StorageFailure(e.to_string())
        })?;

        tracing::info!(
            user_id = %user_id,
            deleted = result.rows_affected(),
            "Revoked refresh tokens of user"
        );
        Ok(result.rows_affected())
    }

    async fn purge_expired(&self) -> Result<u64, TokenError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to purge expired refresh tokens");
            TokenError::StorageFailure(e.to_string())
        })?;

        tracing::info!(deleted = result.rows_affected(), "Purged expired refresh tokens");
        Ok(result.rows_affected())
    }
}
