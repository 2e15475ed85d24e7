//! Repository for the `onboarding_steps` table.

use async_trait::async_trait;
use reporter_core::platform::Platform;
use reporter_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::onboarding_step::{CreateOnboardingStep, OnboardingStep};
use crate::repositories::decode_error;
use crate::stores::{OnboardingStepStore, StoreResult};

const COLUMNS: &str = "id, title, subtitle, description, image_url, details, sort_order, \
     platform, created_by, updated_by, created_at, updated_at";

/// Same list qualified with the `s` alias, for joins.
pub(crate) const JOINED_COLUMNS: &str = "s.id, s.title, s.subtitle, s.description, \
     s.image_url, s.details, s.sort_order, s.platform, s.created_by, s.updated_by, \
     s.created_at, s.updated_at";

/// Raw row; `platform` is stored as nullable text and `order` as `sort_order`.
#[derive(Debug, FromRow)]
pub(crate) struct StepRow {
    id: DbId,
    title: String,
    subtitle: String,
    description: String,
    image_url: String,
    details: String,
    sort_order: i32,
    platform: Option<String>,
    created_by: Option<DbId>,
    updated_by: Option<DbId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<StepRow> for OnboardingStep {
    type Error = sqlx::Error;

    fn try_from(row: StepRow) -> Result<Self, Self::Error> {
        let platform = row
            .platform
            .as_deref()
            .map(str::parse::<Platform>)
            .transpose()
            .map_err(|e| decode_error("platform", e))?;
        Ok(OnboardingStep {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            image_url: row.image_url,
            details: row.details,
            order: row.sort_order,
            platform,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn into_steps(rows: Vec<StepRow>) -> StoreResult<Vec<OnboardingStep>> {
    rows.into_iter().map(OnboardingStep::try_from).collect()
}

/// Provides CRUD operations for onboarding steps.
pub struct OnboardingStepRepo {
    pool: PgPool,
}

impl OnboardingStepRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OnboardingStepStore for OnboardingStepRepo {
    async fn create(
        &self,
        input: &CreateOnboardingStep,
        created_by: Option<DbId>,
    ) -> StoreResult<OnboardingStep> {
        let query = format!(
            "INSERT INTO onboarding_steps
                (title, subtitle, description, image_url, details, sort_order, platform,
                 created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StepRow>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.details)
            .bind(input.order)
            .bind(input.platform.map(Platform::as_str))
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        OnboardingStep::try_from(row)
    }

    async fn find(&self) -> StoreResult<Vec<OnboardingStep>> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_steps ORDER BY created_at");
        let rows = sqlx::query_as::<_, StepRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        into_steps(rows)
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<OnboardingStep>> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_steps WHERE id = ANY($1) ORDER BY created_at"
        );
        let rows = sqlx::query_as::<_, StepRow>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        into_steps(rows)
    }

    async fn find_one(&self, id: DbId) -> StoreResult<Option<OnboardingStep>> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_steps WHERE id = $1");
        sqlx::query_as::<_, StepRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(OnboardingStep::try_from)
            .transpose()
    }

    async fn save(&self, entity: &OnboardingStep) -> StoreResult<OnboardingStep> {
        let query = format!(
            "UPDATE onboarding_steps SET
                title = $2,
                subtitle = $3,
                description = $4,
                image_url = $5,
                details = $6,
                sort_order = $7,
                platform = $8,
                updated_by = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StepRow>(&query)
            .bind(entity.id)
            .bind(&entity.title)
            .bind(&entity.subtitle)
            .bind(&entity.description)
            .bind(&entity.image_url)
            .bind(&entity.details)
            .bind(entity.order)
            .bind(entity.platform.map(Platform::as_str))
            .bind(entity.updated_by)
            .fetch_one(&self.pool)
            .await?;
        OnboardingStep::try_from(row)
    }

    async fn remove(&self, entity: &OnboardingStep) -> StoreResult<OnboardingStep> {
        let result = sqlx::query("DELETE FROM onboarding_steps WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(entity.clone())
    }
}
