//! Country code entity model and DTOs.

use reporter_core::relations::Identified;
use reporter_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `country_codes` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CountryCode {
    pub id: DbId,
    pub code: String,
    pub country_name: String,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for CountryCode {
    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a country code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCountryCode {
    #[validate(length(min = 1, max = 8, message = "code must be between 1 and 8 characters"))]
    pub code: String,
    #[validate(length(min = 1, message = "countryName should not be empty"))]
    pub country_name: String,
}

/// DTO for updating a country code. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCountryCode {
    #[validate(length(min = 1, max = 8, message = "code must be between 1 and 8 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "countryName should not be empty"))]
    pub country_name: Option<String>,
}

impl UpdateCountryCode {
    /// Overwrite only the provided fields.
    pub fn apply_to(self, entity: &mut CountryCode) {
        if let Some(code) = self.code {
            entity.code = code;
        }
        if let Some(country_name) = self.country_name {
            entity.country_name = country_name;
        }
    }
}
