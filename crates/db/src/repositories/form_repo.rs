//! Repository for the `forms` table.
//!
//! Fields are written as one JSONB document and decoded back into
//! [`reporter_core::fields::Field`] values by `#[sqlx(json)]` on the model.

use async_trait::async_trait;
use reporter_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::form::{Form, NewForm};
use crate::stores::{FormStore, StoreResult};

const COLUMNS: &str = "id, name, fields, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for forms.
pub struct FormRepo {
    pool: PgPool,
}

impl FormRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Load one form by id. Shared with the onboarding repository.
pub(crate) async fn load_form(pool: &PgPool, id: DbId) -> StoreResult<Option<Form>> {
    let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1");
    sqlx::query_as::<_, Form>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[async_trait]
impl FormStore for FormRepo {
    async fn create(&self, input: &NewForm) -> StoreResult<Form> {
        let query = format!(
            "INSERT INTO forms (name, fields, created_by, updated_by)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(&input.name)
            .bind(Json(&input.fields))
            .bind(input.created_by)
            .fetch_one(&self.pool)
            .await
    }

    async fn find(&self) -> StoreResult<Vec<Form>> {
        let query = format!("SELECT {COLUMNS} FROM forms ORDER BY created_at");
        sqlx::query_as::<_, Form>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Form>> {
        load_form(&self.pool, id).await
    }

    async fn save(&self, entity: &Form) -> StoreResult<Form> {
        let query = format!(
            "UPDATE forms SET
                name = $2,
                fields = $3,
                updated_by = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(entity.id)
            .bind(&entity.name)
            .bind(Json(&entity.fields))
            .bind(entity.updated_by)
            .fetch_one(&self.pool)
            .await
    }

    async fn remove(&self, entity: &Form) -> StoreResult<Form> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
