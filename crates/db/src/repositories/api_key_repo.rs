//! Repository for the `api_keys` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::api_key::{ApiKey, NewApiKey};
use crate::stores::{ApiKeyStore, StoreResult};

const COLUMNS: &str = "id, app_name, key_hash, created_at, updated_at";

/// Provides CRUD operations for API keys.
pub struct ApiKeyRepo {
    pool: PgPool,
}

impl ApiKeyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyStore for ApiKeyRepo {
    async fn create(&self, input: &NewApiKey) -> StoreResult<ApiKey> {
        let query = format!(
            "INSERT INTO api_keys (app_name, key_hash) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(&input.app_name)
            .bind(&input.key_hash)
            .fetch_one(&self.pool)
            .await
    }

    async fn find(&self) -> StoreResult<Vec<ApiKey>> {
        let query = format!("SELECT {COLUMNS} FROM api_keys ORDER BY created_at");
        sqlx::query_as::<_, ApiKey>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_hash(&self, key_hash: &str) -> StoreResult<Option<ApiKey>> {
        let query = format!("SELECT {COLUMNS} FROM api_keys WHERE key_hash = $1");
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(key_hash)
            .fetch_optional(&self.pool)
            .await
    }

    async fn remove(&self, entity: &ApiKey) -> StoreResult<ApiKey> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
