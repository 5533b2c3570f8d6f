//! Reqwest-backed mail relay notification adapter.
//!
//! This adapter owns transport details only: composing the two outbound
//! messages, POSTing them to the configured relay endpoint as JSON, and
//! mapping HTTP failures onto the notification port error. Whether the relay
//! forwards over SMTP or an API is its own business.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::Application;
use crate::domain::ports::{NotificationGateway, NotificationGatewayError};

const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Relay endpoint and mailbox settings for outbound notifications.
#[derive(Debug, Clone)]
pub struct MailRelaySettings {
    /// Relay endpoint accepting JSON mail messages.
    pub endpoint: Url,
    /// Admissions mailbox receiving new-application alerts.
    pub admin_mailbox: String,
}

/// One outbound mail message in the relay's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
}

fn applicant_email(application: &Application) -> Result<&str, NotificationGatewayError> {
    application
        .details()
        .email
        .as_deref()
        .ok_or_else(|| NotificationGatewayError::dispatch("application has no applicant email"))
}

fn applicant_name(application: &Application) -> &str {
    application
        .details()
        .name
        .as_deref()
        .unwrap_or("applicant")
}

/// Compose the alert sent to the admissions mailbox.
///
/// # Errors
/// Returns [`NotificationGatewayError`] when the application carries no
/// applicant email or cannot be rendered.
pub fn admin_alert(
    admin_mailbox: &str,
    application: &Application,
) -> Result<MailMessage, NotificationGatewayError> {
    let email = applicant_email(application)?;
    let rendered = serde_json::to_string_pretty(application).map_err(|error| {
        NotificationGatewayError::dispatch(format!("failed to render application: {error}"))
    })?;
    Ok(MailMessage {
        from: email.to_owned(),
        to: admin_mailbox.to_owned(),
        subject: "New Application Received".to_owned(),
        text: format!(
            "New application from {name}\n\n{rendered}",
            name = applicant_name(application)
        ),
    })
}

/// Compose the confirmation sent back to the applicant.
///
/// # Errors
/// Returns [`NotificationGatewayError`] when the application carries no
/// applicant email.
pub fn applicant_confirmation(
    admin_mailbox: &str,
    application: &Application,
) -> Result<MailMessage, NotificationGatewayError> {
    let email = applicant_email(application)?;
    Ok(MailMessage {
        from: admin_mailbox.to_owned(),
        to: email.to_owned(),
        subject: "Application Received".to_owned(),
        text: format!(
            "Dear {name},\n\nWe have received your application.\n\nBest regards,\nThe Admissions Office",
            name = applicant_name(application)
        ),
    })
}

/// Notification gateway POSTing messages to a mail relay endpoint.
pub struct MailRelayNotificationGateway {
    client: Client,
    endpoint: Url,
    admin_mailbox: String,
}

impl MailRelayNotificationGateway {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: MailRelaySettings) -> Result<Self, reqwest::Error> {
        Self::with_timeout(settings, DEFAULT_RELAY_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        settings: MailRelaySettings,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint,
            admin_mailbox: settings.admin_mailbox,
        })
    }

    async fn dispatch(&self, message: &MailMessage) -> Result<(), NotificationGatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(message)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, body.as_ref()))
    }
}

#[async_trait]
impl NotificationGateway for MailRelayNotificationGateway {
    async fn application_received(
        &self,
        application: &Application,
    ) -> Result<(), NotificationGatewayError> {
        let message = admin_alert(&self.admin_mailbox, application)?;
        self.dispatch(&message).await
    }

    async fn application_confirmation(
        &self,
        application: &Application,
    ) -> Result<(), NotificationGatewayError> {
        let message = applicant_confirmation(&self.admin_mailbox, application)?;
        self.dispatch(&message).await
    }
}

fn map_transport_error(error: reqwest::Error) -> NotificationGatewayError {
    if error.is_timeout() {
        NotificationGatewayError::dispatch(format!("relay timed out: {error}"))
    } else {
        NotificationGatewayError::dispatch(format!("relay unreachable: {error}"))
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> NotificationGatewayError {
    let preview = body_preview(body);
    if preview.is_empty() {
        NotificationGatewayError::dispatch(format!("relay returned status {}", status.as_u16()))
    } else {
        NotificationGatewayError::dispatch(format!(
            "relay returned status {}: {preview}",
            status.as_u16()
        ))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
