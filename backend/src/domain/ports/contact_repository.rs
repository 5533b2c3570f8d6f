//! Port for contact message persistence adapters.

use async_trait::async_trait;

use crate::domain::Contact;

/// Persistence errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// Repository backend could not be reached.
    #[error("contact repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ContactRepositoryError {
    /// Build a [`ContactRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`ContactRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for storing and listing contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persist a new contact message.
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// All contact messages, newest first.
    async fn list_recent(&self) -> Result<Vec<Contact>, ContactRepositoryError>;
}
