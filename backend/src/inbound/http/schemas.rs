//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape and register under the domain type's name.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed path parameter or request body.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The contact does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Field validation failed.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// Unexpected server-side failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "contact not found")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details.
    details: Option<serde_json::Value>,
}

/// Body of a `422` response: one single-key object per failed field.
#[derive(ToSchema)]
#[schema(as = ValidationErrors)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ValidationErrorsSchema {
    /// Failures in detection order, e.g. `{"email": "This email already exists."}`.
    errors: Vec<BTreeMap<String, String>>,
}

/// OpenAPI schema for [`crate::domain::Contact`].
#[derive(ToSchema)]
#[schema(as = Contact)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactSchema {
    /// Stable contact identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// First name, HTML-escaped.
    #[schema(example = "Jo")]
    first_name: String,
    /// Last name, at least two characters.
    #[schema(example = "Do")]
    last_name: String,
    /// Normalised email address, unique across contacts.
    #[schema(example = "jo@x.com")]
    email: String,
    /// Capitalised colour name from the fixed colour list.
    #[schema(example = "Red")]
    favorite_color: String,
    /// `MM/DD/YY` or `MM/DD/YYYY`.
    #[schema(example = "01/01/2000")]
    birthday: String,
}
