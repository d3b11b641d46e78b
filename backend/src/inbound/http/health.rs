//! Liveness and readiness probes.
//!
//! Readiness is only reported once bootstrap has registered the contact
//! store, and each probe pings that store so a lost database connection
//! takes the instance out of rotation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::ports::ContactRepository;

/// Outcome of a readiness check, serialised as the probe body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// Storage has not been registered yet.
    Starting,
    /// Storage answered the ping.
    Ready,
    /// Storage is registered but failed the ping.
    StorageUnavailable,
}

#[derive(Serialize)]
struct ProbeBody {
    status: Readiness,
}

/// Probe state shared with the server bootstrap.
pub struct HealthState {
    live: AtomicBool,
    storage: OnceLock<Arc<dyn ContactRepository>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            live: AtomicBool::new(true),
            storage: OnceLock::new(),
        }
    }
}

impl HealthState {
    /// Live, with no storage registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the store readiness is checked against. Only the first
    /// registration is kept.
    pub fn mark_ready(&self, storage: Arc<dyn ContactRepository>) {
        if self.storage.set(storage).is_err() {
            debug!("contact store already registered for readiness");
        }
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Current liveness.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Ping the registered store.
    pub async fn readiness(&self) -> Readiness {
        let Some(storage) = self.storage.get() else {
            return Readiness::Starting;
        };
        match storage.ping().await {
            Ok(()) => Readiness::Ready,
            Err(error) => {
                warn!(error = %error, "readiness ping failed");
                Readiness::StorageUnavailable
            }
        }
    }
}

fn no_store(probe_ok: bool) -> actix_web::HttpResponseBuilder {
    let mut response = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response.insert_header((header::CACHE_CONTROL, "no-store"));
    response
}

/// Readiness probe: 200 while the contact store answers, 503 otherwise.
///
/// The body is `{"status": "ready" | "starting" | "storage_unavailable"}`.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Contact store is reachable"),
        (status = 503, description = "Starting up or contact store unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let status = state.readiness().await;
    no_store(status == Readiness::Ready).json(ProbeBody { status })
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    no_store(state.is_alive()).finish()
}
