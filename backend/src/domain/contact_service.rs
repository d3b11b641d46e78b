//! Contact use-cases.
//!
//! [`ContactService`] implements both driving ports. Create and update pass
//! through the validation gate before any write; storage failures are logged
//! here and surface as opaque internal errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery,
};
use crate::domain::validation::{
    ContactField, ContactRecord, ContactValidator, EmailUniquenessChecker, FieldError,
    FieldErrorKind, GateError, ValidationErrors, ValidationMode,
};
use crate::domain::{Contact, ContactId, Error};

const NOT_FOUND_MESSAGE: &str = "contact not found";

/// Contact service implementing [`ContactsQuery`] and [`ContactsCommand`].
#[derive(Clone)]
pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
    validator: ContactValidator,
}

impl ContactService {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        let validator = ContactValidator::new(EmailUniquenessChecker::new(Arc::clone(&repository)));
        Self {
            repository,
            validator,
        }
    }

    fn map_repository_error(operation: &'static str, err: ContactRepositoryError) -> Error {
        match err {
            ContactRepositoryError::DuplicateEmail { email } => {
                info!(operation, %email, "unique email constraint rejected write");
                let mut errors = ValidationErrors::default();
                errors.push(FieldError::new(
                    ContactField::Email,
                    FieldErrorKind::DuplicateValue,
                ));
                Error::validation(&errors)
            }
            other => {
                error!(operation, error = %other, "contact repository failed");
                Error::internal(format!("contact repository error: {other}"))
            }
        }
    }

    fn map_gate_error(operation: &'static str, err: GateError) -> Error {
        match err {
            GateError::Invalid(errors) => Error::validation(&errors),
            GateError::NotFound(_) => Error::not_found(NOT_FOUND_MESSAGE),
            GateError::Storage(storage) => Self::map_repository_error(operation, storage),
        }
    }
}

#[async_trait]
impl ContactsQuery for ContactService {
    async fn list_contacts(&self) -> Result<Vec<Contact>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| Self::map_repository_error("list", err))
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_repository_error("get", err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl ContactsCommand for ContactService {
    async fn create_contact(&self, record: ContactRecord) -> Result<Contact, Error> {
        let draft = self
            .validator
            .evaluate(&record, ValidationMode::Create)
            .await
            .map_err(|err| Self::map_gate_error("create", err))?;

        let contact = Contact::new(ContactId::random(), draft);
        self.repository
            .insert(&contact)
            .await
            .map_err(|err| Self::map_repository_error("create", err))?;
        info!(contact_id = %contact.id(), "contact created");
        Ok(contact)
    }

    async fn update_contact(&self, id: &ContactId, record: ContactRecord) -> Result<Contact, Error> {
        let draft = self
            .validator
            .evaluate(&record, ValidationMode::Update(*id))
            .await
            .map_err(|err| Self::map_gate_error("update", err))?;

        let contact = Contact::new(*id, draft);
        let updated = self
            .repository
            .update(&contact)
            .await
            .map_err(|err| Self::map_repository_error("update", err))?;
        if !updated {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        info!(contact_id = %id, "contact updated");
        Ok(contact)
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(|err| Self::map_repository_error("delete", err))?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        info!(contact_id = %id, "contact deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
