//! Contact HTTP handlers.
//!
//! ```text
//! GET    /contacts
//! GET    /contacts/{id}
//! POST   /contacts {"firstName":"Jo","lastName":"Do","favoriteColor":"Red","birthday":"01/01/2000","email":"jo@x.com"}
//! PUT    /contacts/{id}
//! DELETE /contacts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::validation::{ContactRecord, FieldInput};
use crate::domain::{ApiResult, Contact};
use crate::inbound::http::schemas::{ContactSchema, ErrorSchema, ValidationErrorsSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_contact_id};

const CONTACT_ID: FieldName = FieldName::new("id");

/// Request body for create and update.
///
/// Every field is optional at this layer; presence and type are checked by
/// the validation pipeline so all problems are reported together.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(value_type = Option<String>, example = "Jo")]
    first_name: Option<Value>,
    #[schema(value_type = Option<String>, example = "Do")]
    last_name: Option<Value>,
    #[schema(value_type = Option<String>, example = "Red")]
    favorite_color: Option<Value>,
    #[schema(value_type = Option<String>, example = "01/01/2000")]
    birthday: Option<Value>,
    #[schema(value_type = Option<String>, example = "jo@x.com")]
    email: Option<Value>,
}

fn field_input(value: Option<Value>) -> FieldInput {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::String(text)) => FieldInput::Text(text),
        Some(_) => FieldInput::NotText,
    }
}

impl From<ContactRequest> for ContactRecord {
    fn from(value: ContactRequest) -> Self {
        Self {
            first_name: field_input(value.first_name),
            last_name: field_input(value.last_name),
            favorite_color: field_input(value.favorite_color),
            birthday: field_input(value.birthday),
            email: field_input(value.email),
        }
    }
}

/// List every contact, oldest first.
#[utoipa::path(
    get,
    path = "/contacts",
    responses(
        (status = 200, description = "Contacts", body = [ContactSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Contact>>> {
    let contacts = state.contacts_query.list_contacts().await?;
    Ok(web::Json(contacts))
}

/// Fetch one contact.
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    params(("id" = String, Path, description = "Contact UUID")),
    responses(
        (status = 200, description = "Contact", body = ContactSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Contact>> {
    let id = parse_contact_id(&path, CONTACT_ID)?;
    let contact = state.contacts_query.get_contact(&id).await?;
    Ok(web::Json(contact))
}

/// Validate and create a contact.
#[utoipa::path(
    post,
    path = "/contacts",
    request_body = ContactRequest,
    responses(
        (
            status = 201,
            description = "Created",
            headers(("Location" = String, description = "URI of the new contact")),
            body = ContactSchema
        ),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ValidationErrorsSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let record = ContactRecord::from(payload.into_inner());
    let contact = state.contacts_command.create_contact(record).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/contacts/{}", contact.id())))
        .json(contact))
}

/// Validate and replace every field of a contact.
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    params(("id" = String, Path, description = "Contact UUID")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Updated", body = ContactSchema),
        (status = 400, description = "Malformed id or body", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ValidationErrorsSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<Contact>> {
    let id = parse_contact_id(&path, CONTACT_ID)?;
    let record = ContactRecord::from(payload.into_inner());
    let contact = state.contacts_command.update_contact(&id, record).await?;
    Ok(web::Json(contact))
}

/// Remove a contact.
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(("id" = String, Path, description = "Contact UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_contact_id(&path, CONTACT_ID)?;
    state.contacts_command.delete_contact(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
