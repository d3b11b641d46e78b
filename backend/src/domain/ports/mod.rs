//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`ContactsQuery`], [`ContactsCommand`]) are what inbound
//! adapters call. The driven port ([`ContactRepository`]) is what outbound
//! adapters implement.

mod contact_repository;
mod contacts_command;
mod contacts_query;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use contacts_command::MockContactsCommand;
pub use contacts_command::ContactsCommand;
#[cfg(test)]
pub use contacts_query::MockContactsQuery;
pub use contacts_query::ContactsQuery;
