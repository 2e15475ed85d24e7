use reporter_core::policy::PolicyType;
use reporter_core::types::{DbId, Timestamp};
use reporter_db::models::policy::Policy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDto {
    pub id: DbId,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub title: String,
    pub subtitle: String,
    pub text: String,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Policy> for PolicyDto {
    fn from(entity: &Policy) -> Self {
        Self {
            id: entity.id,
            policy_type: entity.policy_type,
            title: entity.title.clone(),
            subtitle: entity.subtitle.clone(),
            text: entity.text.clone(),
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
