//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! [`DieselContactRepository`] implements the contact repository port over a
//! `diesel-async` + `bb8` pool. Row structs and the table definition stay
//! private to this module; only domain types cross the boundary.
//!
//! # Example
//!
//! ```no_run
//! use contacts_api::outbound::persistence::{
//!     DbPool, DieselContactRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/contacts";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselContactRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_contact_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
