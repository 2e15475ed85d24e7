//! Study aggregate model and DTOs.

use reporter_core::relations::Identified;
use reporter_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::country_code::CountryCode;
use crate::models::onboarding::Onboarding;
use crate::models::policy::Policy;

/// A study with its country codes, policies and optional onboarding.
#[derive(Debug, Clone, PartialEq)]
pub struct Study {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub country_codes: Vec<CountryCode>,
    pub policies: Vec<Policy>,
    pub onboarding: Option<Onboarding>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for Study {
    fn id(&self) -> DbId {
        self.id
    }
}

/// A row from the `studies` table, before relations are loaded.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StudyRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub onboarding_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StudyRow {
    pub fn into_study(
        self,
        country_codes: Vec<CountryCode>,
        policies: Vec<Policy>,
        onboarding: Option<Onboarding>,
    ) -> Study {
        Study {
            id: self.id,
            name: self.name,
            description: self.description,
            country_codes,
            policies,
            onboarding,
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for inserting a study whose references are already resolved.
#[derive(Debug, Clone)]
pub struct NewStudy {
    pub name: String,
    pub description: String,
    pub country_code_ids: Vec<DbId>,
    pub policy_ids: Vec<DbId>,
    pub onboarding_id: Option<DbId>,
    pub created_by: Option<DbId>,
}

/// DTO for creating a study.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudy {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub country_code_ids: Vec<DbId>,
    #[serde(default)]
    pub policy_ids: Vec<DbId>,
    pub onboarding_id: Option<DbId>,
}

/// DTO for updating a study. Id lists are merged into the existing
/// relations; `onboardingId` replaces the current onboarding.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudy {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub country_code_ids: Option<Vec<DbId>>,
    pub policy_ids: Option<Vec<DbId>>,
    pub onboarding_id: Option<DbId>,
}
