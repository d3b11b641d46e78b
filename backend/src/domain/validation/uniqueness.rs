//! Email uniqueness lookups against the contact store.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::ContactId;
use crate::domain::ports::{ContactRepository, ContactRepositoryError};

/// Failures that stop a uniqueness lookup from producing a count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniquenessError {
    /// The contact being updated does not exist.
    #[error("contact {0} not found")]
    NotFound(ContactId),
    /// The store failed.
    #[error(transparent)]
    Storage(#[from] ContactRepositoryError),
}

/// Counts stored contacts that already use a candidate email.
///
/// Read-only; the candidate must already be normalised.
#[derive(Clone)]
pub struct EmailUniquenessChecker {
    repository: Arc<dyn ContactRepository>,
}

impl EmailUniquenessChecker {
    /// Build a checker over the given store.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    /// Number of stored contacts whose email equals `candidate`.
    ///
    /// # Errors
    /// [`UniquenessError::Storage`] when the store fails.
    pub async fn count_matches(&self, candidate: &str) -> Result<usize, UniquenessError> {
        let count = self.repository.count_by_email(candidate, None).await?;
        debug!(matches = count, "email uniqueness checked");
        Ok(count)
    }

    /// Number of contacts other than `contact_id` whose email equals
    /// `candidate`.
    ///
    /// The target is resolved first so a missing contact is reported as
    /// [`UniquenessError::NotFound`] rather than as zero matches.
    ///
    /// # Errors
    /// [`UniquenessError::NotFound`] for an unknown id,
    /// [`UniquenessError::Storage`] when the store fails.
    pub async fn count_matches_excluding(
        &self,
        candidate: &str,
        contact_id: &ContactId,
    ) -> Result<usize, UniquenessError> {
        if self.repository.find_by_id(contact_id).await?.is_none() {
            return Err(UniquenessError::NotFound(*contact_id));
        }
        let count = self
            .repository
            .count_by_email(candidate, Some(*contact_id))
            .await?;
        debug!(matches = count, contact_id = %contact_id, "email uniqueness checked for update");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockContactRepository;
    use crate::domain::{Contact, ContactDraft, FavoriteColor};
    use rstest::rstest;

    fn stored(email: &str) -> Contact {
        Contact::new(
            ContactId::random(),
            ContactDraft::new("Jo", "Do", email, FavoriteColor::Red, "01/01/2000"),
        )
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[tokio::test]
    async fn count_matches_reports_store_count(#[case] stored_count: usize) {
        let mut repo = MockContactRepository::new();
        repo.expect_count_by_email()
            .withf(|email, excluding| email == "jo@x.com" && excluding.is_none())
            .times(1)
            .return_once(move |_, _| Ok(stored_count));

        let checker = EmailUniquenessChecker::new(Arc::new(repo));
        let count = checker.count_matches("jo@x.com").await.expect("count");

        assert_eq!(count, stored_count);
    }

    #[tokio::test]
    async fn count_matches_excluding_skips_the_target() {
        let target = stored("jo@x.com");
        let target_id = *target.id();
        let mut repo = MockContactRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(target)));
        repo.expect_count_by_email()
            .withf(move |email, excluding| email == "jo@x.com" && *excluding == Some(target_id))
            .times(1)
            .return_once(|_, _| Ok(0));

        let checker = EmailUniquenessChecker::new(Arc::new(repo));
        let count = checker
            .count_matches_excluding("jo@x.com", &target_id)
            .await
            .expect("count");

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn count_matches_excluding_reports_missing_target() {
        let missing = ContactId::random();
        let mut repo = MockContactRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        repo.expect_count_by_email().times(0);

        let checker = EmailUniquenessChecker::new(Arc::new(repo));
        let error = checker
            .count_matches_excluding("jo@x.com", &missing)
            .await
            .expect_err("missing target");

        assert_eq!(error, UniquenessError::NotFound(missing));
    }

    #[tokio::test]
    async fn storage_failures_are_distinct_from_no_match() {
        let mut repo = MockContactRepository::new();
        repo.expect_count_by_email()
            .times(1)
            .return_once(|_, _| Err(ContactRepositoryError::connection("pool exhausted")));

        let checker = EmailUniquenessChecker::new(Arc::new(repo));
        let error = checker
            .count_matches("jo@x.com")
            .await
            .expect_err("storage failure");

        assert!(matches!(
            error,
            UniquenessError::Storage(ContactRepositoryError::Connection { .. })
        ));
    }
}
