//! Bcrypt-backed password hashing adapter.

use bcrypt::DEFAULT_COST;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Password hasher deriving salted bcrypt digests.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher with an explicit cost factor. Tests use a low cost to
    /// stay fast; production keeps the default.
    #[must_use]
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        bcrypt::hash(password, self.cost)
            .map(PasswordHash::new)
            .map_err(|error| PasswordHasherError::hashing(error.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        bcrypt::verify(password, hash.as_str())
            .map_err(|error| PasswordHasherError::hashing(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    // bcrypt's minimum cost keeps the tests quick.
    const TEST_COST: u32 = 4;

    #[test]
    fn hashes_verify_and_never_store_the_plaintext() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let hash = hasher.hash("pw123").expect("hashing succeeds");
        assert!(!hash.as_str().contains("pw123"));
        assert!(hasher.verify("pw123", &hash).expect("verification runs"));
        assert!(!hasher.verify("wrong", &hash).expect("verification runs"));
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let first = hasher.hash("pw123").expect("hashing succeeds");
        let second = hasher.hash("pw123").expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn garbage_stored_hash_is_an_error_not_a_match() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let result = hasher.verify("pw123", &PasswordHash::new("not-a-hash".to_owned()));
        assert!(result.is_err());
    }
}
