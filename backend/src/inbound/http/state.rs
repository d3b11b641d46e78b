//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so tests can swap in mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactsCommand, ContactsQuery};

/// Dependency bundle for contact handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side use-cases.
    pub contacts_query: Arc<dyn ContactsQuery>,
    /// Write-side use-cases.
    pub contacts_command: Arc<dyn ContactsCommand>,
}

impl HttpState {
    /// Bundle the two ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contacts_api::domain::ContactService;
    /// use contacts_api::inbound::http::state::HttpState;
    /// use contacts_api::outbound::memory::InMemoryContactRepository;
    ///
    /// let service = Arc::new(ContactService::new(Arc::new(InMemoryContactRepository::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.contacts_query.clone();
    /// ```
    pub fn new(
        contacts_query: Arc<dyn ContactsQuery>,
        contacts_command: Arc<dyn ContactsCommand>,
    ) -> Self {
        Self {
            contacts_query,
            contacts_command,
        }
    }
}
