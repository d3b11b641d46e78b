//! Request-shape checks that run before the domain sees any input.
//!
//! Failures here are `400 invalid_request`; field content rules live in the
//! domain validation pipeline and answer with 422.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{ContactId, Error};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_contact_id(value: &str, field: FieldName) -> Result<ContactId, Error> {
    ContactId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

/// `JsonConfig` error handler turning body parse failures into domain errors.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected malformed JSON body");
    let reason = match &err {
        JsonPayloadError::ContentType => "content type must be application/json",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "request body is too large"
        }
        _ => "request body must be a JSON object",
    };
    Error::invalid_request(reason)
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}
