//! Builders for the repository-backed HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use contacts_api::domain::ContactService;
use contacts_api::domain::ports::ContactRepository;
use contacts_api::inbound::http::state::HttpState;
use contacts_api::outbound::memory::InMemoryContactRepository;
use contacts_api::outbound::persistence::DieselContactRepository;

use super::ServerConfig;

/// Diesel-backed store when a pool is configured, in-memory otherwise.
pub(super) fn build_repository(config: &ServerConfig) -> Arc<dyn ContactRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselContactRepository::new(pool.clone())),
        None => {
            warn!("no database configured; contacts are kept in memory and lost on restart");
            Arc::new(InMemoryContactRepository::new())
        }
    }
}

/// Wire one [`ContactService`] behind both driving ports.
pub(super) fn build_http_state(repository: Arc<dyn ContactRepository>) -> web::Data<HttpState> {
    let service = Arc::new(ContactService::new(repository));
    web::Data::new(HttpState::new(service.clone(), service))
}
