//! Onboarding step entity model and DTOs.

use reporter_core::platform::Platform;
use reporter_core::relations::Identified;
use reporter_core::types::{DbId, Timestamp};
use serde::Deserialize;
use validator::Validate;

/// One screen of an onboarding flow.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingStep {
    pub id: DbId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub details: String,
    pub order: i32,
    /// `None` means the step is shown on every platform.
    pub platform: Option<Platform>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for OnboardingStep {
    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating an onboarding step.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOnboardingStep {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[validate(length(min = 1, message = "imageUrl should not be empty"))]
    pub image_url: String,
    pub details: String,
    #[validate(range(min = 0, message = "order must not be negative"))]
    pub order: i32,
    pub platform: Option<Platform>,
}

/// DTO for updating an onboarding step. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOnboardingStep {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "imageUrl should not be empty"))]
    pub image_url: Option<String>,
    pub details: Option<String>,
    #[validate(range(min = 0, message = "order must not be negative"))]
    pub order: Option<i32>,
    pub platform: Option<Platform>,
}

impl UpdateOnboardingStep {
    /// Overwrite only the provided fields.
    ///
    /// `platform` can be set but not cleared through an update.
    pub fn apply_to(self, entity: &mut OnboardingStep) {
        if let Some(title) = self.title {
            entity.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            entity.subtitle = subtitle;
        }
        if let Some(description) = self.description {
            entity.description = description;
        }
        if let Some(image_url) = self.image_url {
            entity.image_url = image_url;
        }
        if let Some(details) = self.details {
            entity.details = details;
        }
        if let Some(order) = self.order {
            entity.order = order;
        }
        if let Some(platform) = self.platform {
            entity.platform = Some(platform);
        }
    }
}
