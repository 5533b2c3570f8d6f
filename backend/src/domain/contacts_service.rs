//! Contact message domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{ContactRepository, ContactRepositoryError, Contacts};
use crate::domain::{Contact, ContactDraft, ContactId, ContactValidationError, Error};

fn map_repository_error(error: ContactRepositoryError) -> Error {
    Error::internal(format!("contact repository error: {error}"))
}

fn map_validation_error(error: ContactValidationError) -> Error {
    let field = match error {
        ContactValidationError::MissingEmail => "email",
        ContactValidationError::MissingMessage => "message",
    };
    Error::invalid_request(error.to_string())
        .with_details(serde_json::json!({ "field": field }))
}

/// Contact service implementing the [`Contacts`] driving port.
#[derive(Clone)]
pub struct ContactService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactService<R> {
    /// Create a new service over a contact repository.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> Contacts for ContactService<R>
where
    R: ContactRepository,
{
    async fn submit(&self, draft: ContactDraft) -> Result<Contact, Error> {
        let contact = Contact::from_draft(ContactId::random(), draft, self.clock.utc())
            .map_err(map_validation_error)?;
        self.repository
            .insert(&contact)
            .await
            .map_err(map_repository_error)?;
        Ok(contact)
    }

    async fn list(&self) -> Result<Vec<Contact>, Error> {
        self.repository
            .list_recent()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use mockable::DefaultClock;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::outbound::persistence::MemoryContactRepository;

    fn service() -> ContactService<MemoryContactRepository> {
        ContactService::new(
            Arc::new(MemoryContactRepository::default()),
            Arc::new(DefaultClock),
        )
    }

    #[rstest]
    #[case(ContactDraft { email: None, message: Some("hi".to_owned()), ..ContactDraft::default() }, "email")]
    #[case(ContactDraft { email: Some("a@x.com".to_owned()), message: None, ..ContactDraft::default() }, "message")]
    #[tokio::test]
    async fn submit_rejects_blank_required_fields(
        #[case] draft: ContactDraft,
        #[case] field: &str,
    ) {
        let svc = service();
        let err = svc.submit(draft).await.expect_err("must be rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(
            err.details
                .as_ref()
                .and_then(|d| d.get("field"))
                .and_then(serde_json::Value::as_str),
            Some(field)
        );
        assert!(svc.list().await.expect("list succeeds").is_empty());
    }

    #[tokio::test]
    async fn submit_stores_and_list_returns_newest_first() {
        let svc = service();
        svc.submit(ContactDraft {
            name: None,
            email: Some("first@x.com".to_owned()),
            message: Some("first".to_owned()),
        })
        .await
        .expect("first stored");
        let second = svc
            .submit(ContactDraft {
                name: Some("Bea".to_owned()),
                email: Some("second@x.com".to_owned()),
                message: Some("second".to_owned()),
            })
            .await
            .expect("second stored");
        let listed = svc.list().await.expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.first().map(Contact::id), Some(second.id()));
    }
}
