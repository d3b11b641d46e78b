//! Diesel table definitions.
//!
//! Mirrors `migrations/`; regenerate with `diesel print-schema` after
//! changing a migration.

diesel::table! {
    /// Stored contacts. `email` carries a unique constraint.
    contacts (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        favorite_color -> Varchar,
        birthday -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
