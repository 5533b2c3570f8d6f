//! Driving port for contact message use-cases.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, Error};

/// Domain use-case port for contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Contacts: Send + Sync {
    /// Validate and persist a new contact message.
    async fn submit(&self, draft: ContactDraft) -> Result<Contact, Error>;

    /// All contact messages, newest first.
    async fn list(&self) -> Result<Vec<Contact>, Error>;
}
