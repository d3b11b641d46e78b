//! Driving port for reading contacts.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, Error};

/// Read-side use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Every stored contact.
    async fn list_contacts(&self) -> Result<Vec<Contact>, Error>;

    /// One contact, or a `not_found` error.
    async fn get_contact(&self, id: &ContactId) -> Result<Contact, Error>;
}
