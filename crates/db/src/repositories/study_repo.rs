//! Repository for the `studies` table and its ordered relation tables.

use async_trait::async_trait;
use futures::future::try_join_all;
use reporter_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::country_code::CountryCode;
use crate::models::policy::Policy;
use crate::models::study::{NewStudy, Study, StudyRow};
use crate::repositories::onboarding_repo::load_onboarding;
use crate::repositories::policy_repo::{self, PolicyRow};
use crate::stores::{StoreResult, StudyStore};

const COLUMNS: &str =
    "id, name, description, onboarding_id, created_by, updated_by, created_at, updated_at";

const COUNTRY_CODE_COLUMNS: &str = "c.id, c.code, c.country_name, c.created_by, \
     c.updated_by, c.created_at, c.updated_at";

/// Provides CRUD operations for studies.
pub struct StudyRepo {
    pool: PgPool,
}

impl StudyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

async fn load_country_codes(pool: &PgPool, study_id: DbId) -> StoreResult<Vec<CountryCode>> {
    let query = format!(
        "SELECT {COUNTRY_CODE_COLUMNS} FROM country_codes c
         JOIN study_country_codes sc ON sc.country_code_id = c.id
         WHERE sc.study_id = $1
         ORDER BY sc.position"
    );
    sqlx::query_as::<_, CountryCode>(&query)
        .bind(study_id)
        .fetch_all(pool)
        .await
}

async fn load_policies(pool: &PgPool, study_id: DbId) -> StoreResult<Vec<Policy>> {
    let query = format!(
        "SELECT {} FROM policies p
         JOIN study_policies sp ON sp.policy_id = p.id
         WHERE sp.study_id = $1
         ORDER BY sp.position",
        policy_repo::JOINED_COLUMNS
    );
    let rows = sqlx::query_as::<_, PolicyRow>(&query)
        .bind(study_id)
        .fetch_all(pool)
        .await?;
    policy_repo::into_policies(rows)
}

async fn hydrate(pool: &PgPool, row: StudyRow) -> StoreResult<Study> {
    let country_codes = load_country_codes(pool, row.id).await?;
    let policies = load_policies(pool, row.id).await?;
    let onboarding = match row.onboarding_id {
        Some(onboarding_id) => load_onboarding(pool, onboarding_id).await?,
        None => None,
    };
    Ok(row.into_study(country_codes, policies, onboarding))
}

/// Replace both relation tables of a study, keeping the given orders.
async fn replace_relations(
    tx: &mut Transaction<'_, Postgres>,
    study_id: DbId,
    country_code_ids: &[DbId],
    policy_ids: &[DbId],
) -> StoreResult<()> {
    sqlx::query("DELETE FROM study_country_codes WHERE study_id = $1")
        .bind(study_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        "INSERT INTO study_country_codes (study_id, country_code_id, position)
         SELECT $1, t.country_code_id, t.ord::int
         FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(country_code_id, ord)",
    )
    .bind(study_id)
    .bind(country_code_ids)
    .execute(&mut **tx)
    .await?;

    sqlx::query("DELETE FROM study_policies WHERE study_id = $1")
        .bind(study_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        "INSERT INTO study_policies (study_id, policy_id, position)
         SELECT $1, t.policy_id, t.ord::int
         FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(policy_id, ord)",
    )
    .bind(study_id)
    .bind(policy_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl StudyStore for StudyRepo {
    async fn create(&self, input: &NewStudy) -> StoreResult<Study> {
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "INSERT INTO studies (name, description, onboarding_id, created_by, updated_by)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StudyRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.onboarding_id)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;
        replace_relations(&mut tx, row.id, &input.country_code_ids, &input.policy_ids).await?;
        tx.commit().await?;

        hydrate(&self.pool, row).await
    }

    async fn find(&self) -> StoreResult<Vec<Study>> {
        let query = format!("SELECT {COLUMNS} FROM studies ORDER BY created_at");
        let rows = sqlx::query_as::<_, StudyRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        try_join_all(rows.into_iter().map(|row| hydrate(&self.pool, row))).await
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Study>> {
        let query = format!("SELECT {COLUMNS} FROM studies WHERE id = $1");
        let row = sqlx::query_as::<_, StudyRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(hydrate(&self.pool, row).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: &Study) -> StoreResult<Study> {
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "UPDATE studies SET
                name = $2,
                description = $3,
                onboarding_id = $4,
                updated_by = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StudyRow>(&query)
            .bind(entity.id)
            .bind(&entity.name)
            .bind(&entity.description)
            .bind(entity.onboarding.as_ref().map(|onboarding| onboarding.id))
            .bind(entity.updated_by)
            .fetch_one(&mut *tx)
            .await?;
        let country_code_ids: Vec<DbId> = entity.country_codes.iter().map(|c| c.id).collect();
        let policy_ids: Vec<DbId> = entity.policies.iter().map(|p| p.id).collect();
        replace_relations(&mut tx, row.id, &country_code_ids, &policy_ids).await?;
        tx.commit().await?;

        hydrate(&self.pool, row).await
    }

    async fn remove(&self, entity: &Study) -> StoreResult<Study> {
        let result = sqlx::query("DELETE FROM studies WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
