//! Live server harness for the contacts behavioural suite.
//!
//! Actix spawns with `spawn_local`, so the world owns a current-thread
//! runtime and a `LocalSet`. Dropping the fixture stops the server even
//! when a step panics.

use std::cell::RefCell;
use std::future::Future;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use contacts_api::Trace;
use contacts_api::domain::ContactService;
use contacts_api::inbound::http::configure_contacts;
use contacts_api::inbound::http::state::HttpState;
use contacts_api::outbound::memory::InMemoryContactRepository;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct ContactsWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) repository: Arc<InMemoryContactRepository>,
    pub(crate) stored_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_location: Option<String>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<ContactsWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // The stop future must not borrow the world.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Drive `operation` to completion on the world's runtime.
pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_contacts_server(state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Trace)
            .configure(configure_contacts)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// Start a server over an empty in-memory store.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let repository = Arc::new(InMemoryContactRepository::new());
    let service = Arc::new(ContactService::new(repository.clone()));
    let state = HttpState::new(service.clone(), service);

    let (base_url, server) = local
        .block_on(&runtime, spawn_contacts_server(state))
        .expect("contacts server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(ContactsWorld {
            runtime,
            local,
            base_url,
            server,
            repository,
            stored_id: None,
            last_status: None,
            last_location: None,
            last_body: None,
        })),
    }
}
