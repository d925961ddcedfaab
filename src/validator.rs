//! Request extractors that validate before the handler runs.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use qcm_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub const INVALID_ID_MESSAGE: &str = "Identifiant invalide";

/// The first failing field, by field name, with its message.
fn first_error(errors: &ValidationErrors) -> (String, String) {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .find_map(|(field, errors)| {
            errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} est invalide"));
                (field.to_string(), message)
            })
        })
        .unwrap_or_else(|| ("body".to_string(), "Requête invalide".to_string()))
}

/// Field path of a deserialization error, as in
/// `...target type: role: unknown variant `god`, expected ...`.
/// Errors at the document root carry no path.
fn data_error_field(error_msg: &str) -> Option<String> {
    let (_, detail) = error_msg.split_once("target type: ")?;
    let (path, _) = detail.split_once(": ")?;

    (!path.is_empty() && !path.contains(char::is_whitespace)).then(|| path.to_string())
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if let Some(field) = error_msg
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return AppError::validation(field, format!("{field} est requis"));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow::anyhow!(
            "En-tête 'Content-Type: application/json' manquant"
        ));
    }

    if matches!(rejection, JsonRejection::JsonDataError(_)) {
        return match data_error_field(&error_msg) {
            Some(field) => AppError::validation(&field, format!("{field} est invalide")),
            None => AppError::bad_request(anyhow::anyhow!("Champ invalide dans la requête")),
        };
    }

    AppError::bad_request(anyhow::anyhow!("Corps de requête invalide"))
}

/// JSON body deserialized and checked against its `validator` rules.
///
/// Any failure is a 400 naming the first offending field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate().map_err(|errors| {
            let (field, message) = first_error(&errors);
            AppError::validation(field, message)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// The `{id}` route segment as a positive integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedId(pub i64);

impl<S> FromRequestParts<S> for ValidatedId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("id", INVALID_ID_MESSAGE))?;

        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(ValidatedId)
            .ok_or_else(|| AppError::validation("id", INVALID_ID_MESSAGE))
    }
}
