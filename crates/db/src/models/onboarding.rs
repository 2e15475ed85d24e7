//! Onboarding aggregate model and DTOs.

use reporter_core::relations::Identified;
use reporter_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::form::Form;
use crate::models::onboarding_step::OnboardingStep;

/// An onboarding flow with its steps (in display order) and optional form.
#[derive(Debug, Clone, PartialEq)]
pub struct Onboarding {
    pub id: DbId,
    pub name: String,
    pub steps: Vec<OnboardingStep>,
    pub form: Option<Form>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for Onboarding {
    fn id(&self) -> DbId {
        self.id
    }
}

/// A row from the `onboardings` table, before relations are loaded.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OnboardingRow {
    pub id: DbId,
    pub name: String,
    pub form_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OnboardingRow {
    pub fn into_onboarding(self, steps: Vec<OnboardingStep>, form: Option<Form>) -> Onboarding {
        Onboarding {
            id: self.id,
            name: self.name,
            steps,
            form,
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for inserting an onboarding whose references are already resolved.
#[derive(Debug, Clone)]
pub struct NewOnboarding {
    pub name: String,
    /// Step ids in display order.
    pub step_ids: Vec<DbId>,
    pub form_id: Option<DbId>,
    pub created_by: Option<DbId>,
}

/// DTO for creating an onboarding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOnboarding {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "stepIds should not be empty"))]
    pub step_ids: Vec<DbId>,
    pub form_id: Option<DbId>,
}

/// DTO for updating an onboarding. `stepIds` are merged into the existing
/// steps; `formId` replaces the current form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOnboarding {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    pub step_ids: Option<Vec<DbId>>,
    pub form_id: Option<DbId>,
}
