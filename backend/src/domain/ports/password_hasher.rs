//! Port for one-way password hashing and verification.

use crate::domain::PasswordHash;

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHasherError {
    /// Hashing or verification could not run.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl PasswordHasherError {
    /// Build a [`PasswordHasherError::Hashing`].
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }
}

/// Port for deriving and checking salted password hashes.
///
/// Hashing is CPU work rather than I/O, so the port is synchronous; the
/// services call it inline on the request path.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash from a plaintext password.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
