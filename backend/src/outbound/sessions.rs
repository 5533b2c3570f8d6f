//! In-process session store with TTL enforcement.
//!
//! Records are keyed by token. Expired records are evicted lazily when their
//! token is next resolved; a periodic sweep can call
//! [`MemorySessionStore::purge_expired`] to reclaim tokens that never come
//! back.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionRecord, SessionToken};

/// Session store backed by an in-process map.
pub struct MemorySessionStore {
    clock: Arc<dyn Clock>,
    inner: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl MemorySessionStore {
    /// Create an empty store reading expiry time from the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, SessionRecord>>, SessionStoreError> {
        self.inner
            .write()
            .map_err(|_| SessionStoreError::backend("session map lock poisoned"))
    }

    /// Drop every expired record, returning how many were removed.
    ///
    /// # Errors
    /// Returns [`SessionStoreError`] when the store lock is poisoned.
    pub fn purge_expired(&self) -> Result<usize, SessionStoreError> {
        let now = self.clock.utc();
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now));
        Ok(before - sessions.len())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let mut sessions = self.write()?;
        sessions.insert(*record.token().as_uuid(), record.clone());
        Ok(())
    }

    async fn load(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        let now = self.clock.utc();
        // Write guard so an expired record can be evicted on the way out.
        let mut sessions = self.write()?;
        match sessions.get(token.as_uuid()) {
            Some(record) if record.is_expired(now) => {
                sessions.remove(token.as_uuid());
                Ok(None)
            }
            Some(record) => Ok(Some(record.clone())),
            None => Ok(None),
        }
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let mut sessions = self.write()?;
        sessions.remove(token.as_uuid());
        Ok(())
    }
}
