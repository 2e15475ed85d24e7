//! Repository for the `policies` table.

use async_trait::async_trait;
use reporter_core::policy::PolicyType;
use reporter_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::policy::{CreatePolicy, Policy};
use crate::repositories::decode_error;
use crate::stores::{PolicyStore, StoreResult};

const COLUMNS: &str =
    "id, policy_type, title, subtitle, text, created_by, updated_by, created_at, updated_at";

/// Same list qualified with the `p` alias, for joins.
pub(crate) const JOINED_COLUMNS: &str = "p.id, p.policy_type, p.title, p.subtitle, p.text, \
     p.created_by, p.updated_by, p.created_at, p.updated_at";

/// Raw row; `policy_type` is stored as text.
#[derive(Debug, FromRow)]
pub(crate) struct PolicyRow {
    id: DbId,
    policy_type: String,
    title: String,
    subtitle: String,
    text: String,
    created_by: Option<DbId>,
    updated_by: Option<DbId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<PolicyRow> for Policy {
    type Error = sqlx::Error;

    fn try_from(row: PolicyRow) -> Result<Self, Self::Error> {
        let policy_type: PolicyType = row
            .policy_type
            .parse()
            .map_err(|e| decode_error("policy_type", e))?;
        Ok(Policy {
            id: row.id,
            policy_type,
            title: row.title,
            subtitle: row.subtitle,
            text: row.text,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn into_policies(rows: Vec<PolicyRow>) -> StoreResult<Vec<Policy>> {
    rows.into_iter().map(Policy::try_from).collect()
}

/// Provides CRUD operations for policies.
pub struct PolicyRepo {
    pool: PgPool,
}

impl PolicyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PolicyStore for PolicyRepo {
    async fn create(&self, input: &CreatePolicy, created_by: Option<DbId>) -> StoreResult<Policy> {
        let query = format!(
            "INSERT INTO policies (policy_type, title, subtitle, text, created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&query)
            .bind(input.policy_type.as_str())
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.text)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        Policy::try_from(row)
    }

    async fn find(&self) -> StoreResult<Vec<Policy>> {
        let query = format!("SELECT {COLUMNS} FROM policies ORDER BY created_at");
        let rows = sqlx::query_as::<_, PolicyRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        into_policies(rows)
    }

    async fn find_by_type(&self, policy_type: PolicyType) -> StoreResult<Vec<Policy>> {
        let query =
            format!("SELECT {COLUMNS} FROM policies WHERE policy_type = $1 ORDER BY created_at");
        let rows = sqlx::query_as::<_, PolicyRow>(&query)
            .bind(policy_type.as_str())
            .fetch_all(&self.pool)
            .await?;
        into_policies(rows)
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Policy>> {
        let query =
            format!("SELECT {COLUMNS} FROM policies WHERE id = ANY($1) ORDER BY created_at");
        let rows = sqlx::query_as::<_, PolicyRow>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        into_policies(rows)
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Policy>> {
        let query = format!("SELECT {COLUMNS} FROM policies WHERE id = $1");
        sqlx::query_as::<_, PolicyRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Policy::try_from)
            .transpose()
    }

    async fn save(&self, entity: &Policy) -> StoreResult<Policy> {
        let query = format!(
            "UPDATE policies SET
                policy_type = $2,
                title = $3,
                subtitle = $4,
                text = $5,
                updated_by = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&query)
            .bind(entity.id)
            .bind(entity.policy_type.as_str())
            .bind(&entity.title)
            .bind(&entity.subtitle)
            .bind(&entity.text)
            .bind(entity.updated_by)
            .fetch_one(&self.pool)
            .await?;
        Policy::try_from(row)
    }

    async fn remove(&self, entity: &Policy) -> StoreResult<Policy> {
        let result = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
