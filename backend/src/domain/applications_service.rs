//! Application domain service: validation, duplicate detection, notification,
//! and CRUD orchestration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, Applications, NotificationGateway,
    NotificationGatewayError,
};
use crate::domain::{Application, ApplicationDetails, ApplicationId, Error};

fn map_repository_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::UniqueViolation { .. } => {
            Error::conflict("Application already exists")
        }
        other => Error::internal(format!("application repository error: {other}")),
    }
}

fn map_notification_error(error: NotificationGatewayError) -> Error {
    Error::notification_failed(format!("failed to send application email: {error}"))
}

/// Application service implementing the [`Applications`] driving port.
#[derive(Clone)]
pub struct ApplicationService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<R, N> ApplicationService<R, N> {
    /// Create a new service over a repository and notification gateway.
    pub fn new(repository: Arc<R>, notifications: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            notifications,
            clock,
        }
    }
}

#[async_trait]
impl<R, N> Applications for ApplicationService<R, N>
where
    R: ApplicationRepository,
    N: NotificationGateway,
{
    async fn submit(&self, draft: ApplicationDetails) -> Result<Application, Error> {
        let missing = draft.missing_required_fields();
        if !missing.is_empty() {
            return Err(Error::invalid_request("Missing required fields")
                .with_details(json!({ "missing": missing })));
        }

        let key = draft
            .dedup_key()
            .ok_or_else(|| Error::internal("validated submission lacks a dedup key"))?;
        let existing = self
            .repository
            .find_by_dedup_key(&key)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict("Application already exists"));
        }

        let application = Application::new(ApplicationId::random(), draft, self.clock.utc());

        // Both emails go out before the record is persisted; a dispatch
        // failure must leave nothing behind.
        self.notifications
            .application_received(&application)
            .await
            .map_err(map_notification_error)?;
        self.notifications
            .application_confirmation(&application)
            .await
            .map_err(map_notification_error)?;

        self.repository
            .insert(&application)
            .await
            .map_err(map_repository_error)?;
        Ok(application)
    }

    async fn list(&self) -> Result<Vec<Application>, Error> {
        self.repository
            .list_recent()
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: ApplicationId) -> Result<Application, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Application not found"))
    }

    async fn update(
        &self,
        id: ApplicationId,
        fields: ApplicationDetails,
    ) -> Result<Application, Error> {
        let mut application = self.get(id).await?;
        application.apply_update(fields, self.clock.utc());
        let replaced = self
            .repository
            .update(&application)
            .await
            .map_err(map_repository_error)?;
        if !replaced {
            return Err(Error::not_found("Application not found"));
        }
        Ok(application)
    }

    async fn delete(&self, id: ApplicationId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found("Application not found"));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, Error> {
        self.repository
            .delete_all()
            .await
            .map_err(map_repository_error)
    }
}
