//! Contact field validation.
//!
//! The pipeline is an explicit sequence of rule functions. Each field's
//! rules short-circuit on their first failure; failures on different fields
//! accumulate into one [`ValidationErrors`] list in detection order. The
//! email rule finishes with an awaited uniqueness lookup against the
//! contact store.

mod email;
mod errors;
mod gate;
mod record;
mod rules;
mod sanitize;
mod uniqueness;

pub use email::{is_valid_email, normalize_email};
pub use errors::{ContactField, FieldError, FieldErrorKind, ValidationErrors};
pub use gate::{ContactValidator, GateError, ValidationMode};
pub use record::{ContactRecord, FieldInput};
pub use sanitize::sanitize;
pub use uniqueness::{EmailUniquenessChecker, UniquenessError};
