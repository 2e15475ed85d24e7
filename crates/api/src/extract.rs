//! Request body extraction with DTO validation.

use axum::extract::{FromRequest, Request};
use axum::Json;
use reporter_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON becomes [`AppError::BadRequest`]; rule violations become
/// [`CoreError::Validation`] carrying one message per failed rule.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::Validation(validation_messages(&errors))))?;

        Ok(Self(value))
    }
}

/// Flatten field errors into messages, ordered by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect()
}
