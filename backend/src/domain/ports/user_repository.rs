//! Port for account persistence adapters and their errors.
//!
//! As with applications, the store is the authoritative uniqueness guard:
//! `insert` and `update` reject writes colliding with the unique indexes
//! over email and username, atomically with the write.

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// Unique indexes an account write can collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserConstraint {
    /// The unique index over account emails.
    Email,
    /// The unique index over account usernames.
    Username,
}

impl std::fmt::Display for UserConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Username => f.write_str("username"),
        }
    }
}

/// Persistence errors raised by account repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository backend could not be reached.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The write collided with a unique account index.
    #[error("user unique constraint violated: {constraint}")]
    UniqueViolation {
        /// The violated index.
        constraint: UserConstraint,
    },
}

impl UserRepositoryError {
    /// Build a [`UserRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`UserRepositoryError::UniqueViolation`].
    #[must_use]
    pub const fn unique_violation(constraint: UserConstraint) -> Self {
        Self::UniqueViolation { constraint }
    }
}

/// Port for reading and writing stored accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account, enforcing the email and username indexes.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by exact email string.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// All accounts, newest first.
    async fn list_recent(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Replace a stored account. Returns `false` when the id is unknown.
    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError>;

    /// Remove one account. Returns `false` when the id is unknown.
    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
