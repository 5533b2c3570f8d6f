//! Port for the server-side session store.
//!
//! Sessions are keyed by their opaque token and carry their own expiry.
//! `load` must never return an expired record; adapters are free to evict
//! lazily on load or via a background sweep, or both.

use async_trait::async_trait;

use crate::domain::{SessionRecord, SessionToken};

/// Errors raised by session store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    /// The backing store failed to serve the operation.
    #[error("session store failure: {message}")]
    Backend {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl SessionStoreError {
    /// Build a [`SessionStoreError::Backend`].
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Port for creating, resolving, and destroying sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a freshly issued session.
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Resolve a token to its live session, if any. Expired sessions are
    /// reported as absent.
    async fn load(&self, token: &SessionToken)
    -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Destroy a session. Destroying an unknown token is a no-op so logout
    /// stays idempotent.
    async fn delete(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}
