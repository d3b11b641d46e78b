//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Emails arrive normalised, so equality is a plain column comparison. The
//! `contacts_email_key` unique constraint backs up the validation gate when
//! two writers race on the same address.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDraft, ContactId, FavoriteColor};

use super::models::{ContactRow, ContactUpdate, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

const EMAIL_UNIQUE_CONSTRAINT: &str = "contacts_email_key";

/// Diesel-backed implementation of the [`ContactRepository`] port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ContactRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ContactRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        _ => ContactRepositoryError::query("database error"),
    }
}

/// Like [`map_diesel_error`], but turns an email unique violation into
/// [`ContactRepositoryError::DuplicateEmail`].
fn map_write_error(error: diesel::result::Error, email: &str) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let on_email = info
            .constraint_name()
            .is_none_or(|name| name == EMAIL_UNIQUE_CONSTRAINT);
        if on_email {
            debug!(email, "email unique constraint rejected write");
            return ContactRepositoryError::duplicate_email(email);
        }
    }
    map_diesel_error(error)
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let favorite_color: FavoriteColor = row.favorite_color.parse().map_err(|_| {
        warn!(
            value = %row.favorite_color,
            contact_id = %row.id,
            "unrecognised favorite_color value in storage"
        );
        ContactRepositoryError::query("stored favorite color is not recognised")
    })?;

    let draft = ContactDraft::new(
        row.first_name,
        row.last_name,
        row.email,
        favorite_color,
        row.birthday,
    );
    Ok(Contact::new(ContactId::from_uuid(row.id), draft))
}

fn to_count(count: i64) -> Result<usize, ContactRepositoryError> {
    usize::try_from(count).map_err(|_| ContactRepositoryError::query("negative row count"))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order((contacts::created_at.asc(), contacts::id.asc()))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(id.as_uuid())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn count_by_email(
        &self,
        email: &str,
        excluding: Option<ContactId>,
    ) -> Result<usize, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = contacts::table
            .filter(contacts::email.eq(email))
            .into_boxed();
        if let Some(id) = excluding {
            query = query.filter(contacts::id.ne(*id.as_uuid()));
        }

        let count: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_count(count)
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewContactRow {
            id: *contact.id().as_uuid(),
            first_name: contact.first_name(),
            last_name: contact.last_name(),
            email: contact.email(),
            favorite_color: contact.favorite_color().as_str(),
            birthday: contact.birthday(),
        };

        diesel::insert_into(contacts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, contact.email()))
    }

    async fn update(&self, contact: &Contact) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ContactUpdate {
            first_name: contact.first_name(),
            last_name: contact.last_name(),
            email: contact.email(),
            favorite_color: contact.favorite_color().as_str(),
            birthday: contact.birthday(),
            updated_at: Utc::now(),
        };

        let updated_rows = diesel::update(contacts::table.find(contact.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, contact.email()))?;
        Ok(updated_rows > 0)
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(contacts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted_rows > 0)
    }

    async fn ping(&self) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and row conversion coverage; queries run against a
    //! live database only.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    struct ConstraintInfo(Option<&'static str>);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("contacts")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo(constraint)),
        )
    }

    fn row(favorite_color: &str) -> ContactRow {
        ContactRow {
            id: Uuid::new_v4(),
            first_name: "Jo".to_owned(),
            last_name: "Do".to_owned(),
            email: "jo@x.com".to_owned(),
            favorite_color: favorite_color.to_owned(),
            birthday: "01/01/2000".to_owned(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, ContactRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(DieselError::NotFound);

        assert_eq!(repo_err, ContactRepositoryError::query("record not found"));
    }

    #[rstest]
    #[case(Some(EMAIL_UNIQUE_CONSTRAINT))]
    #[case(None)]
    fn email_unique_violation_maps_to_duplicate(#[case] constraint: Option<&'static str>) {
        let repo_err = map_write_error(unique_violation(constraint), "jo@x.com");

        assert_eq!(repo_err, ContactRepositoryError::duplicate_email("jo@x.com"));
    }

    #[rstest]
    fn other_unique_violation_stays_a_query_error() {
        let repo_err = map_write_error(unique_violation(Some("contacts_pkey")), "jo@x.com");

        assert!(matches!(repo_err, ContactRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_converts_to_contact() {
        let source = row("Teal");
        let id = source.id;

        let contact = row_to_contact(source).expect("valid row");

        assert_eq!(contact.id().as_uuid(), &id);
        assert_eq!(contact.favorite_color(), FavoriteColor::Teal);
        assert_eq!(contact.email(), "jo@x.com");
    }

    #[rstest]
    fn unknown_stored_colour_is_a_query_error() {
        let error = row_to_contact(row("Mauve")).expect_err("unknown colour");

        assert!(matches!(error, ContactRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(3, Some(3))]
    #[case(-1, None)]
    fn counts_convert_to_usize(#[case] raw: i64, #[case] expected: Option<usize>) {
        assert_eq!(to_count(raw).ok(), expected);
    }
}
