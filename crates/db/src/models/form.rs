//! Form entity model and DTOs.
//!
//! A form's fields live in one JSONB document (`forms.fields`). Request DTOs
//! carry them as raw JSON so the field validator can report type problems
//! as messages rather than as deserialization failures.

use reporter_core::fields::Field;
use reporter_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `forms` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Form {
    pub id: DbId,
    pub name: String,
    #[sqlx(json)]
    pub fields: Vec<Field>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for inserting a form whose fields are already mapped.
#[derive(Debug, Clone)]
pub struct NewForm {
    pub name: String,
    pub fields: Vec<Field>,
    pub created_by: Option<DbId>,
}

/// DTO for creating a form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateForm {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    pub fields: Vec<serde_json::Value>,
}

/// DTO for updating a form. When `fields` is present it replaces the whole
/// list and is validated like on creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateForm {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    pub fields: Option<Vec<serde_json::Value>>,
}
