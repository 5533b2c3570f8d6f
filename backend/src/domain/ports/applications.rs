//! Driving port for application use-cases.
//!
//! Inbound adapters call this port to run submissions and administrative
//! CRUD without knowing the backing infrastructure, which keeps HTTP handler
//! tests deterministic: they can substitute a test double instead of wiring
//! persistence and mail.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationDetails, ApplicationId, Error};

/// Domain use-case port for admissions applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Applications: Send + Sync {
    /// Validate, dedup-check, notify, and persist a new submission.
    async fn submit(&self, draft: ApplicationDetails) -> Result<Application, Error>;

    /// All applications, newest first.
    async fn list(&self) -> Result<Vec<Application>, Error>;

    /// Fetch one application.
    async fn get(&self, id: ApplicationId) -> Result<Application, Error>;

    /// Overlay fields onto an existing application.
    async fn update(&self, id: ApplicationId, fields: ApplicationDetails)
    -> Result<Application, Error>;

    /// Remove one application.
    async fn delete(&self, id: ApplicationId) -> Result<(), Error>;

    /// Remove every application, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, Error>;
}
