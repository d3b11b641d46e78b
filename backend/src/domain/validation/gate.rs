//! Validation gate run before every create and update.

use thiserror::Error;
use tracing::debug;

use super::errors::{ContactField, FieldError, FieldErrorKind, ValidationErrors};
use super::record::ContactRecord;
use super::rules;
use super::uniqueness::{EmailUniquenessChecker, UniquenessError};
use crate::domain::ports::ContactRepositoryError;
use crate::domain::{ContactDraft, ContactId};

/// Which uniqueness policy the email rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Any stored contact with the same email is a conflict.
    Create,
    /// The contact being updated may keep its own email.
    Update(ContactId),
}

/// Why the gate refused a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// One or more field rules failed.
    #[error("{} contact field(s) failed validation", .0.len())]
    Invalid(ValidationErrors),
    /// The update target does not exist.
    #[error("contact {0} not found")]
    NotFound(ContactId),
    /// The store failed during the uniqueness lookup.
    #[error(transparent)]
    Storage(ContactRepositoryError),
}

impl From<UniquenessError> for GateError {
    fn from(value: UniquenessError) -> Self {
        match value {
            UniquenessError::NotFound(id) => Self::NotFound(id),
            UniquenessError::Storage(error) => Self::Storage(error),
        }
    }
}

/// Per-field outcomes, kept until every rule has run.
struct Collector {
    errors: ValidationErrors,
}

impl Collector {
    fn check<T>(&mut self, field: ContactField, outcome: Result<T, FieldErrorKind>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(kind) => {
                self.errors.push(FieldError::new(field, kind));
                None
            }
        }
    }
}

/// Runs the full field pipeline and decides pass or fail.
///
/// Every field is evaluated even after an earlier one fails, so a single
/// response lists all problems. A storage failure (or a missing update
/// target) aborts the evaluation and replaces any field errors.
#[derive(Clone)]
pub struct ContactValidator {
    uniqueness: EmailUniquenessChecker,
}

impl ContactValidator {
    /// Build a validator that checks uniqueness with `uniqueness`.
    #[must_use]
    pub const fn new(uniqueness: EmailUniquenessChecker) -> Self {
        Self { uniqueness }
    }

    /// Validate `record` and return the sanitised draft to store.
    ///
    /// # Errors
    /// [`GateError::Invalid`] with the failures in detection order,
    /// [`GateError::NotFound`] when updating an unknown contact,
    /// [`GateError::Storage`] when the uniqueness lookup fails.
    pub async fn evaluate(
        &self,
        record: &ContactRecord,
        mode: ValidationMode,
    ) -> Result<ContactDraft, GateError> {
        let mut collector = Collector {
            errors: ValidationErrors::default(),
        };

        let first_name = collector.check(
            ContactField::FirstName,
            rules::first_name(&record.first_name),
        );
        let last_name =
            collector.check(ContactField::LastName, rules::last_name(&record.last_name));
        let favorite_color = collector.check(
            ContactField::FavoriteColor,
            rules::favorite_color(&record.favorite_color),
        );
        let birthday =
            collector.check(ContactField::Birthday, rules::birthday(&record.birthday));
        let email_outcome = match rules::email_format(&record.email) {
            Ok(email) => self.unique_email(email, mode).await?,
            Err(kind) => Err(kind),
        };
        let email = collector.check(ContactField::Email, email_outcome);

        match (first_name, last_name, favorite_color, birthday, email) {
            (Some(first_name), Some(last_name), Some(favorite_color), Some(birthday), Some(email))
                if collector.errors.is_empty() =>
            {
                Ok(ContactDraft::new(
                    first_name,
                    last_name,
                    email,
                    favorite_color,
                    birthday,
                ))
            }
            _ => {
                debug!(
                    failures = collector.errors.len(),
                    "contact rejected by validation"
                );
                Err(GateError::Invalid(collector.errors))
            }
        }
    }

    /// Outer `Err` aborts the pipeline; inner `Err` is a field failure.
    async fn unique_email(
        &self,
        email: String,
        mode: ValidationMode,
    ) -> Result<Result<String, FieldErrorKind>, GateError> {
        let matches = match mode {
            ValidationMode::Create => self.uniqueness.count_matches(&email).await?,
            ValidationMode::Update(id) => {
                self.uniqueness
                    .count_matches_excluding(&email, &id)
                    .await?
            }
        };
        if matches > 0 {
            return Ok(Err(FieldErrorKind::DuplicateValue));
        }
        Ok(Ok(email))
    }
}
