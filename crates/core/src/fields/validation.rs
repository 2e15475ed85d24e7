//! Field validation over raw JSON input.
//!
//! Validation runs on `serde_json::Value` rather than on the typed input so
//! that a wrong attribute type becomes a readable message instead of a
//! deserialization error, and so that every problem in every field is
//! reported in one response.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{FieldInput, FieldType};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const FIELDS_EMPTY: &str = "The fields property cannot be empty";
pub const INVALID_FIELD_TYPE: &str = "One of the fields does not have the correct type";
pub const OPTIONS_EMPTY: &str = "Options cannot be empty";
/// Reported instead of per-field messages when the input has a shape the
/// rules cannot inspect at all.
pub const FIELDS_UNREADABLE: &str = "The fields could not be validated";

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Outcome of validating a list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    /// Distinct messages in the order they were first produced.
    pub messages: Vec<String>,
}

impl FieldValidation {
    fn from_messages(messages: Vec<String>) -> Self {
        Self {
            is_valid: messages.is_empty(),
            messages,
        }
    }

    fn single(message: &str) -> Self {
        Self::from_messages(vec![message.to_string()])
    }

    /// Convert into a `CoreError::Validation` carrying every message.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CoreError::Validation(self.messages))
        }
    }
}

/// The input was not something the rules know how to read.
struct Unreadable;

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate every field and collect every violation.
///
/// Never fails: an empty list short-circuits with [`FIELDS_EMPTY`], and an
/// entry that is not a JSON object yields [`FIELDS_UNREADABLE`].
pub fn validate_fields(fields: &[Value]) -> FieldValidation {
    if fields.is_empty() {
        return FieldValidation::single(FIELDS_EMPTY);
    }

    let mut messages: Vec<String> = Vec::new();
    for field in fields {
        match check_field(field) {
            Ok(found) => {
                for message in found {
                    if !messages.contains(&message) {
                        messages.push(message);
                    }
                }
            }
            Err(Unreadable) => return FieldValidation::single(FIELDS_UNREADABLE),
        }
    }

    FieldValidation::from_messages(messages)
}

/// Validate and then parse raw fields into typed input, ready for mapping.
pub fn parse_fields(fields: Vec<Value>) -> Result<Vec<FieldInput>, CoreError> {
    validate_fields(&fields).into_result()?;
    fields
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|_| CoreError::validation(FIELDS_UNREADABLE))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-field rules
// ---------------------------------------------------------------------------

fn check_field(field: &Value) -> Result<Vec<String>, Unreadable> {
    let object = field.as_object().ok_or(Unreadable)?;
    let mut rules = Rules::new(object);

    rules.optional_boolean("isRequired");
    rules.string("label");
    rules.string("description");

    let field_type = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(FieldType::from_tag);

    match field_type {
        Some(FieldType::TextField) => {
            rules.string("placeholder");
            rules.boolean("multiline");
            rules.optional_boolean("isTikTokLink");
            rules.count("maxLines");
        }
        Some(FieldType::DropDown) => {
            rules.string("placeholder");
            rules.options("options")?;
            rules.string("selected");
            rules.optional_boolean("hasOtherOption");
        }
        Some(FieldType::Slider) => {
            rules.optional_number("max");
            rules.optional_string("leftLabel");
            rules.optional_string("rightLabel");
            rules.optional_number("step");
        }
        None => rules.fail(INVALID_FIELD_TYPE),
    }

    Ok(rules.messages)
}

/// Accumulates messages for one field object. Every rule runs; none stops
/// the others.
struct Rules<'a> {
    object: &'a Map<String, Value>,
    messages: Vec<String>,
}

impl<'a> Rules<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            messages: Vec::new(),
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Present and not `null`.
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|v| !v.is_null())
    }

    fn check(&mut self, key: &str, required: bool, expected: &str, ok: fn(&Value) -> bool) {
        match self.present(key) {
            Some(value) if ok(value) => {}
            None if !required => {}
            _ => self.fail(format!("{key} must be a {expected}")),
        }
    }

    fn string(&mut self, key: &str) {
        self.check(key, true, "string", Value::is_string);
    }

    fn optional_string(&mut self, key: &str) {
        self.check(key, false, "string", Value::is_string);
    }

    fn boolean(&mut self, key: &str) {
        self.check(key, true, "boolean", Value::is_boolean);
    }

    fn optional_boolean(&mut self, key: &str) {
        self.check(key, false, "boolean", Value::is_boolean);
    }

    fn number(&mut self, key: &str) {
        self.check(key, true, "number", Value::is_number);
    }

    fn optional_number(&mut self, key: &str) {
        self.check(key, false, "number", Value::is_number);
    }

    /// A whole number that fits the stored `u32`.
    fn count(&mut self, key: &str) {
        self.check(key, true, "non-negative integer", |v| {
            v.as_u64().is_some_and(|n| u32::try_from(n).is_ok())
        });
    }

    /// A non-empty array of `{ "title": string }` objects.
    fn options(&mut self, key: &str) -> Result<(), Unreadable> {
        let Some(value) = self.present(key) else {
            self.fail(OPTIONS_EMPTY);
            return Ok(());
        };
        let Some(options) = value.as_array() else {
            self.fail(format!("{key} must be an array"));
            return Ok(());
        };
        if options.is_empty() {
            self.fail(OPTIONS_EMPTY);
            return Ok(());
        }
        for option in options {
            let option = option.as_object().ok_or(Unreadable)?;
            if !option.get("title").is_some_and(Value::is_string) {
                self.fail("Every option must have a title");
                break;
            }
        }
        Ok(())
    }
}
