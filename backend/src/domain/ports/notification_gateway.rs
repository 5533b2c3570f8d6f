//! Port for outbound email notifications on new applications.
//!
//! Two messages go out per accepted submission: an alert to the admissions
//! mailbox and a confirmation to the applicant. Delivery mechanics live in
//! adapters; the domain only depends on the attempt succeeding or failing.

use async_trait::async_trait;

use crate::domain::Application;

/// Errors raised by notification gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationGatewayError {
    /// The message could not be handed to the mail transport.
    #[error("notification dispatch failed: {message}")]
    Dispatch {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl NotificationGatewayError {
    /// Build a [`NotificationGatewayError::Dispatch`].
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }
}

/// Port for dispatching application notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Alert the admissions mailbox about a new application.
    async fn application_received(
        &self,
        application: &Application,
    ) -> Result<(), NotificationGatewayError>;

    /// Confirm receipt to the applicant.
    async fn application_confirmation(
        &self,
        application: &Application,
    ) -> Result<(), NotificationGatewayError>;
}

/// Gateway that records the attempt in the log and succeeds.
///
/// Wired in when no mail relay is configured so local development does not
/// need an outbound mail path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotificationGateway;

#[async_trait]
impl NotificationGateway for NoopNotificationGateway {
    async fn application_received(
        &self,
        application: &Application,
    ) -> Result<(), NotificationGatewayError> {
        tracing::info!(application_id = %application.id(), "admin alert skipped: no mail relay configured");
        Ok(())
    }

    async fn application_confirmation(
        &self,
        application: &Application,
    ) -> Result<(), NotificationGatewayError> {
        tracing::info!(application_id = %application.id(), "applicant confirmation skipped: no mail relay configured");
        Ok(())
    }
}
