//! Driving port for changing contacts.
//!
//! Create and update accept raw [`ContactRecord`]s; implementations must
//! run them through the validation gate before touching storage.

use async_trait::async_trait;

use crate::domain::validation::ContactRecord;
use crate::domain::{Contact, ContactId, Error};

/// Write-side use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Validate and store a new contact.
    async fn create_contact(&self, record: ContactRecord) -> Result<Contact, Error>;

    /// Validate and replace an existing contact.
    async fn update_contact(&self, id: &ContactId, record: ContactRecord)
    -> Result<Contact, Error>;

    /// Remove a contact.
    async fn delete_contact(&self, id: &ContactId) -> Result<(), Error>;
}
