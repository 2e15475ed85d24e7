//! Policy entity model and DTOs.

use reporter_core::policy::PolicyType;
use reporter_core::relations::Identified;
use reporter_core::types::{DbId, Timestamp};
use serde::Deserialize;
use validator::Validate;

/// A legal document shown to study participants.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub id: DbId,
    pub policy_type: PolicyType,
    pub title: String,
    pub subtitle: String,
    pub text: String,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for Policy {
    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a policy.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePolicy {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,
    pub subtitle: String,
    #[validate(length(min = 1, message = "text should not be empty"))]
    pub text: String,
}

/// DTO for updating a policy. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePolicy {
    #[serde(rename = "type")]
    pub policy_type: Option<PolicyType>,
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[validate(length(min = 1, message = "text should not be empty"))]
    pub text: Option<String>,
}

impl UpdatePolicy {
    /// Overwrite only the provided fields.
    pub fn apply_to(self, entity: &mut Policy) {
        if let Some(policy_type) = self.policy_type {
            entity.policy_type = policy_type;
        }
        if let Some(title) = self.title {
            entity.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            entity.subtitle = subtitle;
        }
        if let Some(text) = self.text {
            entity.text = text;
        }
    }
}
