use reporter_core::types::{DbId, Timestamp};
use reporter_db::models::study::Study;
use serde::Serialize;

use super::{map_all, map_optional, CountryCodeDto, OnboardingDto, PolicyDto};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDto {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub country_codes: Vec<CountryCodeDto>,
    pub policies: Vec<PolicyDto>,
    pub onboarding: Option<OnboardingDto>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Study> for StudyDto {
    fn from(entity: &Study) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            description: entity.description.clone(),
            country_codes: map_all(&entity.country_codes),
            policies: map_all(&entity.policies),
            onboarding: map_optional(entity.onboarding.as_ref()),
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use reporter_db::models::country_code::CountryCode;
    use uuid::Uuid;

    use super::*;

    fn study(country_codes: Vec<CountryCode>) -> Study {
        let now = Utc::now();
        Study {
            id: Uuid::new_v4(),
            name: "Sleep".into(),
            description: "Night habits".into(),
            country_codes,
            policies: vec![],
            onboarding: None,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn absent_relations_map_to_empty_and_null() {
        let json = serde_json::to_value(StudyDto::from(&study(vec![]))).unwrap();
        assert_eq!(json["countryCodes"], serde_json::json!([]));
        assert_eq!(json["policies"], serde_json::json!([]));
        assert!(json["onboarding"].is_null());
    }

    #[test]
    fn relations_keep_their_order() {
        let now = Utc::now();
        let code = |c: &str| CountryCode {
            id: Uuid::new_v4(),
            code: c.into(),
            country_name: c.into(),
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };
        let dto = StudyDto::from(&study(vec![code("DE"), code("US")]));
        let codes: Vec<&str> = dto.country_codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["DE", "US"]);
    }
}
