//! Port for application persistence adapters and their errors.
//!
//! The store, not the service, is the authoritative guard for the duplicate
//! invariant: `insert` and `update` must reject a record whose dedup key
//! collides with another stored application, atomically with the write. The
//! service-level lookup exists only to produce a friendly error first.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationId, DedupKey};

/// Persistence errors raised by application repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationRepositoryError {
    /// Repository backend could not be reached.
    #[error("application repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("application repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The write collided with the unique index over the dedup key.
    #[error("application unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: String,
    },
}

impl ApplicationRepositoryError {
    /// Build a [`ApplicationRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`ApplicationRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`ApplicationRepositoryError::UniqueViolation`].
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }
}

/// Port for reading and writing stored applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new application, enforcing the dedup-key unique index.
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// Fetch an application by its dedup key.
    async fn find_by_dedup_key(
        &self,
        key: &DedupKey,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Fetch an application by identifier.
    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// All applications, newest first.
    async fn list_recent(&self) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Replace a stored application. Returns `false` when the id is unknown.
    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError>;

    /// Remove one application. Returns `false` when the id is unknown.
    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError>;

    /// Remove every application, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, ApplicationRepositoryError>;
}
