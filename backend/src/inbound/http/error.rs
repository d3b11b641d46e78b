//! HTTP adapter mapping for domain errors.
//!
//! Validation failures keep the wire shape clients already depend on:
//! `422 {"errors": [{"<field>": "<message>"}, ...]}`. Every other error
//! serialises the domain [`Error`] itself, with internal details redacted.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

fn validation_body(error: &Error) -> Value {
    let errors = error
        .details()
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    json!({ "errors": errors })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match self.code() {
            ErrorCode::ValidationFailed => builder.json(validation_body(self)),
            _ => builder.json(redact_if_internal(self)),
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
