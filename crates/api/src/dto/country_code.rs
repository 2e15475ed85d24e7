use reporter_core::types::{DbId, Timestamp};
use reporter_db::models::country_code::CountryCode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCodeDto {
    pub id: DbId,
    pub code: String,
    pub country_name: String,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&CountryCode> for CountryCodeDto {
    fn from(entity: &CountryCode) -> Self {
        Self {
            id: entity.id,
            code: entity.code.clone(),
            country_name: entity.country_name.clone(),
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
