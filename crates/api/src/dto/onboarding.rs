use reporter_core::types::{DbId, Timestamp};
use reporter_db::models::onboarding::Onboarding;
use serde::Serialize;

use super::{map_all, map_optional, FormDto, OnboardingStepDto};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDto {
    pub id: DbId,
    pub name: String,
    pub steps: Vec<OnboardingStepDto>,
    pub form: Option<FormDto>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Onboarding> for OnboardingDto {
    fn from(entity: &Onboarding) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            steps: map_all(&entity.steps),
            form: map_optional(entity.form.as_ref()),
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
