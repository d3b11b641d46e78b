//! Tests for the contact service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockContactRepository;
use crate::domain::validation::FieldInput;
use crate::domain::{ContactDraft, ErrorCode, FavoriteColor};
use crate::outbound::memory::InMemoryContactRepository;
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

fn make_service(repo: MockContactRepository) -> ContactService {
    ContactService::new(Arc::new(repo))
}

#[fixture]
fn record() -> ContactRecord {
    ContactRecord {
        first_name: FieldInput::text("Jo"),
        last_name: FieldInput::text("Do"),
        favorite_color: FieldInput::text("Red"),
        birthday: FieldInput::text("01/01/2000"),
        email: FieldInput::text("Jo@X.com"),
    }
}

fn stored(id: ContactId, email: &str) -> Contact {
    Contact::new(
        id,
        ContactDraft::new("Jo", "Do", email, FavoriteColor::Red, "01/01/2000"),
    )
}

#[rstest]
#[tokio::test]
async fn create_stores_sanitised_contact(record: ContactRecord) {
    let mut repo = MockContactRepository::new();
    repo.expect_count_by_email()
        .withf(|email, excluding| email == "jo@x.com" && excluding.is_none())
        .times(1)
        .return_once(|_, _| Ok(0));
    repo.expect_insert()
        .withf(|contact| contact.email() == "jo@x.com" && contact.first_name() == "Jo")
        .times(1)
        .return_once(|_| Ok(()));

    let contact = make_service(repo)
        .create_contact(record)
        .await
        .expect("create succeeds");

    assert_eq!(contact.email(), "jo@x.com");
    assert_eq!(contact.favorite_color(), FavoriteColor::Red);
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_email_without_writing(record: ContactRecord) {
    let mut repo = MockContactRepository::new();
    repo.expect_count_by_email().return_once(|_, _| Ok(1));
    repo.expect_insert().times(0);

    let error = make_service(repo)
        .create_contact(record)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.details(),
        Some(&json!([{ "email": "This email already exists." }]))
    );
}

#[rstest]
#[tokio::test]
async fn create_maps_unique_violation_to_duplicate_email(record: ContactRecord) {
    let mut repo = MockContactRepository::new();
    repo.expect_count_by_email().return_once(|_, _| Ok(0));
    repo.expect_insert()
        .return_once(|_| Err(ContactRepositoryError::duplicate_email("jo@x.com")));

    let error = make_service(repo)
        .create_contact(record)
        .await
        .expect_err("race lost");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.details(),
        Some(&json!([{ "email": "This email already exists." }]))
    );
}

#[rstest]
#[tokio::test]
async fn storage_failure_during_validation_is_internal(record: ContactRecord) {
    let mut repo = MockContactRepository::new();
    repo.expect_count_by_email()
        .return_once(|_, _| Err(ContactRepositoryError::connection("refused")));
    repo.expect_insert().times(0);

    let error = make_service(repo)
        .create_contact(record)
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(error.details().is_none());
}

#[rstest]
#[tokio::test]
async fn update_allows_keeping_own_email(record: ContactRecord) {
    let id = ContactId::random();
    let existing = stored(id, "jo@x.com");
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id()
        .with(eq(id))
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_count_by_email()
        .withf(move |email, excluding| email == "jo@x.com" && *excluding == Some(id))
        .return_once(|_, _| Ok(0));
    repo.expect_update()
        .withf(move |contact| *contact.id() == id)
        .times(1)
        .return_once(|_| Ok(true));

    let contact = make_service(repo)
        .update_contact(&id, record)
        .await
        .expect("update succeeds");

    assert_eq!(*contact.id(), id);
}

#[rstest]
#[tokio::test]
async fn update_to_another_contacts_email_is_a_duplicate(mut record: ContactRecord) {
    let first = stored(ContactId::random(), "a@x.com");
    let second = stored(ContactId::random(), "b@x.com");
    let repo = Arc::new(InMemoryContactRepository::with_contacts([
        first.clone(),
        second.clone(),
    ]));
    let service = ContactService::new(repo.clone());
    record.email = FieldInput::text("B@x.com");

    let error = service
        .update_contact(first.id(), record)
        .await
        .expect_err("email held by another contact");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        error.details(),
        Some(&json!([{ "email": "This email already exists." }]))
    );
    assert_eq!(
        repo.list().await.expect("list"),
        vec![first, second],
        "rejected update must not touch the store"
    );
}

#[rstest]
#[tokio::test]
async fn update_of_missing_contact_is_not_found(record: ContactRecord) {
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let error = make_service(repo)
        .update_contact(&ContactId::random(), record)
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_reports_contact_removed_mid_flight(record: ContactRecord) {
    let id = ContactId::random();
    let existing = stored(id, "jo@x.com");
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_count_by_email().return_once(|_, _| Ok(0));
    repo.expect_update().return_once(|_| Ok(false));

    let error = make_service(repo)
        .update_contact(&id, record)
        .await
        .expect_err("gone");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_missing_contact_is_not_found() {
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(repo)
        .get_contact(&ContactId::random())
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "contact not found");
}

#[tokio::test]
async fn list_returns_repository_contents() {
    let first = stored(ContactId::random(), "a@x.com");
    let second = stored(ContactId::random(), "b@x.com");
    let expected = vec![first.clone(), second.clone()];
    let mut repo = MockContactRepository::new();
    repo.expect_list()
        .return_once(move || Ok(vec![first, second]));

    let contacts = make_service(repo).list_contacts().await.expect("list");

    assert_eq!(contacts, expected);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_contacts(
    #[case] removed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockContactRepository::new();
    repo.expect_delete().return_once(move |_| Ok(removed));

    let outcome = make_service(repo)
        .delete_contact(&ContactId::random())
        .await;

    assert_eq!(outcome.err().map(|err| err.code()), expected);
}
