//! Repository for API key database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::ApiKeyEntity;

/// Repository for API key operations.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    /// Creates a new API key repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new API key record.
    ///
    /// The caller is responsible for hashing; raw keys never reach this layer.
    pub async fn create(
        &self,
        key_hash: &str,
        key_prefix: &str,
        name: &str,
        is_admin: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ApiKeyEntity, sqlx::Error> {
        let entity = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            INSERT INTO api_keys (key_hash, key_prefix, name, is_admin, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, key_hash, key_prefix, name, is_active, is_admin,
                      last_used_at, created_at, expires_at
            "#,
        )
        .bind(key_hash)
        .bind(key_prefix)
        .bind(name)
        .bind(is_admin)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity)
    }

    /// Lists API keys, newest first. Inactive keys are included on request.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<ApiKeyEntity>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT id, key_hash, key_prefix, name, is_active, is_admin,
                   last_used_at, created_at, expires_at
            FROM api_keys
            WHERE is_active = true OR $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities)
    }

    /// Revokes an API key by deactivating it.
    ///
    /// Returns `false` if the key does not exist or was already revoked.
    pub async fn revoke(&self, key_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET is_active = false
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(key_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds an API key by its hash.
    ///
    /// Returns `None` if no key with the given hash exists.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<ApiKeyEntity>, sqlx::Error> {
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT id, key_hash, key_prefix, name, is_active, is_admin,
                   last_used_at, created_at, expires_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Updates the last_used_at timestamp for an API key.
    ///
    /// Fired after successful authentication, off the request path.
    pub async fn update_last_used(&self, key_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE api_keys
            SET last_used_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(key_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

}
