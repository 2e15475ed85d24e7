use reporter_core::fields::Field;
use reporter_core::types::{DbId, Timestamp};
use reporter_db::models::form::Form;
use serde::Serialize;

/// A form with its fields in display order. Fields serialize flat, tagged
/// by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub id: DbId,
    pub name: String,
    pub fields: Vec<Field>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Form> for FormDto {
    fn from(entity: &Form) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            fields: entity.fields.clone(),
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
