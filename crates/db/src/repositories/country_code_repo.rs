//! Repository for the `country_codes` table.

use async_trait::async_trait;
use reporter_core::types::DbId;
use sqlx::PgPool;

use crate::models::country_code::{CountryCode, CreateCountryCode};
use crate::stores::{CountryCodeStore, StoreResult};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, code, country_name, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for country codes.
pub struct CountryCodeRepo {
    pool: PgPool,
}

impl CountryCodeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryCodeStore for CountryCodeRepo {
    async fn create(
        &self,
        input: &CreateCountryCode,
        created_by: Option<DbId>,
    ) -> StoreResult<CountryCode> {
        let query = format!(
            "INSERT INTO country_codes (code, country_name, created_by, updated_by)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CountryCode>(&query)
            .bind(&input.code)
            .bind(&input.country_name)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
    }

    async fn find(&self) -> StoreResult<Vec<CountryCode>> {
        let query = format!("SELECT {COLUMNS} FROM country_codes ORDER BY created_at, code");
        sqlx::query_as::<_, CountryCode>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<CountryCode>> {
        let query = format!(
            "SELECT {COLUMNS} FROM country_codes WHERE id = ANY($1) ORDER BY created_at, code"
        );
        sqlx::query_as::<_, CountryCode>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<CountryCode>> {
        let query = format!("SELECT {COLUMNS} FROM country_codes WHERE id = $1");
        sqlx::query_as::<_, CountryCode>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<CountryCode>> {
        let query = format!("SELECT {COLUMNS} FROM country_codes WHERE code = $1");
        sqlx::query_as::<_, CountryCode>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
    }

    async fn save(&self, entity: &CountryCode) -> StoreResult<CountryCode> {
        let query = format!(
            "UPDATE country_codes SET
                code = $2,
                country_name = $3,
                updated_by = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CountryCode>(&query)
            .bind(entity.id)
            .bind(&entity.code)
            .bind(&entity.country_name)
            .bind(entity.updated_by)
            .fetch_one(&self.pool)
            .await
    }

    async fn remove(&self, entity: &CountryCode) -> StoreResult<CountryCode> {
        let result = sqlx::query("DELETE FROM country_codes WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
