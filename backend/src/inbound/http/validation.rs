//! Request validation failures rendered as `invalid_request` errors.
//!
//! Every failure carries `details: {field, code}` so clients can point at
//! the offending input.

use actix_web::error::{JsonPayloadError, PathError, UrlencodedError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::text::EmptyTransformText;
use crate::domain::{CredentialValidationError, Error};

/// Field-level validation failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldCode {
    MissingField,
    TooShort,
    InvalidBody,
    InvalidId,
}

impl FieldCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooShort => "too_short",
            Self::InvalidBody => "invalid_body",
            Self::InvalidId => "invalid_id",
        }
    }
}

pub(crate) fn field_error(field: &str, code: FieldCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn credential_error(err: CredentialValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

pub(crate) fn empty_text_error(_: EmptyTransformText) -> Error {
    field_error("text", FieldCode::TooShort, "text must not be empty")
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON body");
    field_error("body", FieldCode::InvalidBody, format!("invalid JSON body: {err}")).into()
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected form body");
    field_error("body", FieldCode::InvalidBody, format!("invalid form body: {err}")).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameter");
    field_error("id", FieldCode::InvalidId, "id must be an integer").into()
}

/// Extractor configuration turning body and path failures into
/// `invalid_request` errors instead of Actix's plain-text defaults.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}
