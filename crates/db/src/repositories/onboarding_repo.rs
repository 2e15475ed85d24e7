//! Repository for the `onboardings` table and its ordered step links.
//!
//! An onboarding is stored as one row plus one `onboarding_step_links` row
//! per step, carrying the step's position. Reads join the links back in
//! position order and attach the referenced form.

use async_trait::async_trait;
use futures::future::try_join_all;
use reporter_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::onboarding::{NewOnboarding, Onboarding, OnboardingRow};
use crate::models::onboarding_step::OnboardingStep;
use crate::repositories::form_repo::load_form;
use crate::repositories::onboarding_step_repo::{self, StepRow};
use crate::stores::{OnboardingStore, StoreResult};

const COLUMNS: &str = "id, name, form_id, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for onboardings.
pub struct OnboardingRepo {
    pool: PgPool,
}

impl OnboardingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

async fn load_steps(pool: &PgPool, onboarding_id: DbId) -> StoreResult<Vec<OnboardingStep>> {
    let query = format!(
        "SELECT {} FROM onboarding_steps s
         JOIN onboarding_step_links l ON l.step_id = s.id
         WHERE l.onboarding_id = $1
         ORDER BY l.position",
        onboarding_step_repo::JOINED_COLUMNS
    );
    let rows = sqlx::query_as::<_, StepRow>(&query)
        .bind(onboarding_id)
        .fetch_all(pool)
        .await?;
    onboarding_step_repo::into_steps(rows)
}

async fn hydrate(pool: &PgPool, row: OnboardingRow) -> StoreResult<Onboarding> {
    let steps = load_steps(pool, row.id).await?;
    let form = match row.form_id {
        Some(form_id) => load_form(pool, form_id).await?,
        None => None,
    };
    Ok(row.into_onboarding(steps, form))
}

/// Load one onboarding with its relations. Shared with the study repository.
pub(crate) async fn load_onboarding(pool: &PgPool, id: DbId) -> StoreResult<Option<Onboarding>> {
    let query = format!("SELECT {COLUMNS} FROM onboardings WHERE id = $1");
    let row = sqlx::query_as::<_, OnboardingRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match row {
        Some(row) => Ok(Some(hydrate(pool, row).await?)),
        None => Ok(None),
    }
}

/// Replace the step links of an onboarding, keeping the given order.
async fn replace_step_links(
    tx: &mut Transaction<'_, Postgres>,
    onboarding_id: DbId,
    step_ids: &[DbId],
) -> StoreResult<()> {
    sqlx::query("DELETE FROM onboarding_step_links WHERE onboarding_id = $1")
        .bind(onboarding_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        "INSERT INTO onboarding_step_links (onboarding_id, step_id, position)
         SELECT $1, t.step_id, t.ord::int
         FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(step_id, ord)",
    )
    .bind(onboarding_id)
    .bind(step_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl OnboardingStore for OnboardingRepo {
    async fn create(&self, input: &NewOnboarding) -> StoreResult<Onboarding> {
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "INSERT INTO onboardings (name, form_id, created_by, updated_by)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OnboardingRow>(&query)
            .bind(&input.name)
            .bind(input.form_id)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;
        replace_step_links(&mut tx, row.id, &input.step_ids).await?;
        tx.commit().await?;

        hydrate(&self.pool, row).await
    }

    async fn find(&self) -> StoreResult<Vec<Onboarding>> {
        let query = format!("SELECT {COLUMNS} FROM onboardings ORDER BY created_at");
        let rows = sqlx::query_as::<_, OnboardingRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        try_join_all(rows.into_iter().map(|row| hydrate(&self.pool, row))).await
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<Onboarding>> {
        load_onboarding(&self.pool, id).await
    }

    async fn save(&self, entity: &Onboarding) -> StoreResult<Onboarding> {
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "UPDATE onboardings SET
                name = $2,
                form_id = $3,
                updated_by = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OnboardingRow>(&query)
            .bind(entity.id)
            .bind(&entity.name)
            .bind(entity.form.as_ref().map(|form| form.id))
            .bind(entity.updated_by)
            .fetch_one(&mut *tx)
            .await?;
        let step_ids: Vec<DbId> = entity.steps.iter().map(|step| step.id).collect();
        replace_step_links(&mut tx, row.id, &step_ids).await?;
        tx.commit().await?;

        hydrate(&self.pool, row).await
    }

    async fn remove(&self, entity: &Onboarding) -> StoreResult<Onboarding> {
        let result = sqlx::query("DELETE FROM onboardings WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
