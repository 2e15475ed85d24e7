//! Form field variants.
//!
//! A form stores its fields as one JSON document. Every field shares a set
//! of common attributes and carries exactly one variant payload, selected by
//! the `type` tag:
//!
//! ```text
//! { "id": "...", "type": "DropDown", "label": "...", "description": "...",
//!   "isRequired": false, "placeholder": "...", "options": [...],
//!   "selected": "...", "hasOtherOption": false }
//! ```
//!
//! Input arrives as raw JSON, is checked by [`validation::validate_fields`]
//! (which reports every problem at once), parsed into [`FieldInput`], and
//! turned into a stored [`Field`] by [`mapping::map_fields`].

pub mod mapping;
pub mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

/// The closed set of field variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    TextField,
    DropDown,
    Slider,
}

impl FieldType {
    pub const ALL: [FieldType; 3] = [FieldType::TextField, FieldType::DropDown, FieldType::Slider];

    /// Value of the `type` tag in JSON documents.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::TextField => "TextField",
            FieldType::DropDown => "DropDown",
            FieldType::Slider => "Slider",
        }
    }

    /// Look up a variant by its `type` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        FieldType::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stored fields
// ---------------------------------------------------------------------------

/// A field as persisted inside a form's `fields` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: DbId,
    pub label: String,
    pub description: String,
    pub is_required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Variant payload of a [`Field`], tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldKind {
    TextField(TextField),
    DropDown(DropDownField),
    Slider(SliderField),
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::TextField(_) => FieldType::TextField,
            FieldKind::DropDown(_) => FieldType::DropDown,
            FieldKind::Slider(_) => FieldType::Slider,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub placeholder: String,
    pub multiline: bool,
    pub is_tik_tok_link: bool,
    pub max_lines: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropDownField {
    pub placeholder: String,
    pub options: Vec<DropDownOption>,
    /// Id of the preselected option, or empty when nothing is selected.
    pub selected: String,
    pub has_other_option: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropDownOption {
    pub id: DbId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderField {
    pub max: f64,
    pub left_label: String,
    pub right_label: String,
    pub step: f64,
}

// ---------------------------------------------------------------------------
// Field input
// ---------------------------------------------------------------------------

/// A field as sent by clients. Carries no ids; optional attributes fall back
/// to the defaults in [`mapping`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    pub label: String,
    pub description: String,
    pub is_required: Option<bool>,
    #[serde(flatten)]
    pub kind: FieldInputKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum FieldInputKind {
    TextField(TextFieldInput),
    DropDown(DropDownInput),
    Slider(SliderInput),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldInput {
    pub placeholder: String,
    pub multiline: bool,
    pub is_tik_tok_link: Option<bool>,
    pub max_lines: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropDownInput {
    pub placeholder: String,
    pub options: Vec<DropDownOptionInput>,
    /// Title of the option to preselect.
    pub selected: String,
    pub has_other_option: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DropDownOptionInput {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderInput {
    pub max: Option<f64>,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
    pub step: Option<f64>,
}
