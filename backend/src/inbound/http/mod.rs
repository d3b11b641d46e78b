//! HTTP inbound adapter exposing the contact REST endpoints.

use actix_web::web;

pub mod contacts;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

/// Register the contact routes and the JSON body error handler.
///
/// Callers add [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use contacts_api::inbound::http::configure_contacts;
///
/// let app = App::new().configure(configure_contacts);
/// ```
pub fn configure_contacts(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .service(contacts::list_contacts)
        .service(contacts::get_contact)
        .service(contacts::create_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact);
}
