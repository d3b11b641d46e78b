//! OpenAPI documentation configuration.
//!
//! Registers the contact and health paths together with the schema wrappers
//! from [`crate::inbound::http::schemas`]. Served by Swagger UI in debug
//! builds and exported with `cargo run --bin openapi-dump`.

use crate::inbound::http::contacts::ContactRequest;
use crate::inbound::http::schemas::{
    ContactSchema, ErrorCodeSchema, ErrorSchema, ValidationErrorsSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts API",
        description = "CRUD for contact records with field validation and unique email addresses."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactSchema,
        ContactRequest,
        ErrorSchema,
        ErrorCodeSchema,
        ValidationErrorsSchema
    )),
    tags(
        (name = "contacts", description = "Contact records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
