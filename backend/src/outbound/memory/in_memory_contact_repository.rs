//! `ContactRepository` kept in process memory.
//!
//! Contacts are held in insertion order behind a single async lock, and
//! email uniqueness is enforced under that lock the way the database's
//! unique constraint would.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId};

/// Volatile contact store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactRepository {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl InMemoryContactRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `contacts`, oldest first.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        Self {
            contacts: Arc::new(RwLock::new(contacts.into_iter().collect())),
        }
    }
}

fn email_taken(contacts: &[Contact], email: &str, excluding: Option<&ContactId>) -> bool {
    contacts
        .iter()
        .any(|stored| stored.email() == email && Some(stored.id()) != excluding)
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(self.contacts.read().await.clone())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|stored| stored.id() == id).cloned())
    }

    async fn count_by_email(
        &self,
        email: &str,
        excluding: Option<ContactId>,
    ) -> Result<usize, ContactRepositoryError> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .iter()
            .filter(|stored| stored.email() == email && Some(*stored.id()) != excluding)
            .count())
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut contacts = self.contacts.write().await;
        if email_taken(&contacts, contact.email(), None) {
            return Err(ContactRepositoryError::duplicate_email(contact.email()));
        }
        contacts.push(contact.clone());
        Ok(())
    }

    async fn update(&self, contact: &Contact) -> Result<bool, ContactRepositoryError> {
        let mut contacts = self.contacts.write().await;
        if email_taken(&contacts, contact.email(), Some(contact.id())) {
            return Err(ContactRepositoryError::duplicate_email(contact.email()));
        }
        let Some(slot) = contacts.iter_mut().find(|stored| stored.id() == contact.id()) else {
            return Ok(false);
        };
        *slot = contact.clone();
        Ok(true)
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, ContactRepositoryError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|stored| stored.id() != id);
        Ok(contacts.len() < before)
    }

    async fn ping(&self) -> Result<(), ContactRepositoryError> {
        Ok(())
    }
}
