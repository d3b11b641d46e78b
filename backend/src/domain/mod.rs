//! Domain primitives, validation and use-cases.
//!
//! Purpose: Define the contact aggregate, the field validation pipeline and
//! the service that drives create, read, update and delete through the
//! repository port. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - Contact, ContactDraft, ContactId, FavoriteColor: the aggregate and its
//!   value types.
//! - Error, ErrorCode: API error payload shared by every adapter.
//! - ContactService: implementation of the driving ports.
//! - TraceId: request correlation identifier.

pub mod contact;
pub mod contact_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod validation;

pub use self::contact::{
    Contact, ContactDraft, ContactId, ContactIdValidationError, FavoriteColor, UnknownColorError,
};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use contacts_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
