//! Domain-level error type.
//!
//! Errors are transport agnostic. The HTTP adapter maps [`ErrorCode`] to
//! status codes and decides how much of the payload reaches the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;
use super::validation::ValidationErrors;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request could not be interpreted (bad path id, malformed body).
    InvalidRequest,
    /// The requested contact does not exist.
    NotFound,
    /// One or more contact fields failed validation.
    ValidationFailed,
    /// Storage or another collaborator failed unexpectedly.
    InternalError,
}

/// Error payload shared by every use-case.
///
/// For [`ErrorCode::ValidationFailed`] the `details` hold the ordered list
/// of `{field: message}` objects produced by the validation gate.
///
/// # Examples
/// ```
/// use contacts_api::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("contact not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "contact not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Build an error, capturing the trace id in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Wrap the field errors collected by the validation gate.
    ///
    /// # Examples
    /// ```
    /// use contacts_api::domain::validation::{ContactField, FieldError, FieldErrorKind, ValidationErrors};
    /// use contacts_api::domain::{Error, ErrorCode};
    ///
    /// let mut errors = ValidationErrors::default();
    /// errors.push(FieldError::new(ContactField::Email, FieldErrorKind::DuplicateValue));
    /// let err = Error::validation(&errors);
    /// assert_eq!(err.code(), ErrorCode::ValidationFailed);
    /// assert_eq!(err.details().and_then(|d| d.as_array()).map(Vec::len), Some(1));
    /// ```
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::new(ErrorCode::ValidationFailed, "contact validation failed")
            .with_details(errors.to_json())
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace id.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id captured when the error was built.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary details.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
