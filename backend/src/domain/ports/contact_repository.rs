//! Driven port for contact persistence.
//!
//! Adapters translate their storage failures into
//! [`ContactRepositoryError`] so the domain never sees driver types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Contact, ContactId};

/// Errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactRepositoryError {
    /// The store could not be reached.
    #[error("contact repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// A query or mutation failed while executing.
    #[error("contact repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
    /// The store's unique email constraint rejected a write.
    #[error("email {email} is already stored")]
    DuplicateEmail {
        /// The conflicting normalised email.
        email: String,
    },
}

impl ContactRepositoryError {
    /// Helper for connectivity failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations on `email`.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Storage contract for contacts.
///
/// Emails passed in and returned are already normalised; adapters compare
/// them byte-for-byte.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every stored contact, oldest first.
    async fn list(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Fetch one contact.
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Count contacts whose email equals `email`, skipping `excluding`.
    async fn count_by_email(
        &self,
        email: &str,
        excluding: Option<ContactId>,
    ) -> Result<usize, ContactRepositoryError>;

    /// Store a new contact.
    ///
    /// Returns [`ContactRepositoryError::DuplicateEmail`] when the email is
    /// already taken.
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Replace every field of an existing contact.
    ///
    /// Returns `Ok(false)` when no contact has the given id.
    async fn update(&self, contact: &Contact) -> Result<bool, ContactRepositoryError>;

    /// Remove a contact. Returns `Ok(false)` when nothing was removed.
    async fn delete(&self, id: &ContactId) -> Result<bool, ContactRepositoryError>;

    /// Confirm the store can serve queries.
    async fn ping(&self) -> Result<(), ContactRepositoryError>;
}
