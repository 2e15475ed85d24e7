use reporter_core::platform::Platform;
use reporter_core::types::{DbId, Timestamp};
use reporter_db::models::onboarding_step::OnboardingStep;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStepDto {
    pub id: DbId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub details: String,
    pub order: i32,
    pub platform: Option<Platform>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&OnboardingStep> for OnboardingStepDto {
    fn from(entity: &OnboardingStep) -> Self {
        Self {
            id: entity.id,
            title: entity.title.clone(),
            subtitle: entity.subtitle.clone(),
            description: entity.description.clone(),
            image_url: entity.image_url.clone(),
            details: entity.details.clone(),
            order: entity.order,
            platform: entity.platform,
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
