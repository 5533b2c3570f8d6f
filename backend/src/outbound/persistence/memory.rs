//! In-process document store adapters.
//!
//! Each collection is a `Vec` of entries behind an `RwLock`. Mutations take
//! the write guard, run their unique-index checks, and commit inside the same
//! critical section, so check-then-insert races between requests resolve
//! here rather than in the services. Listing clones records and sorts newest
//! first, using an insertion sequence to keep ordering stable when
//! timestamps collide.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, ContactRepository, ContactRepositoryError,
    UserConstraint, UserRepository, UserRepositoryError,
};
use crate::domain::{Application, ApplicationId, Contact, DedupKey, User, UserId};

/// Name of the unique index over the application dedup key.
const APPLICATION_DEDUP_INDEX: &str = "applications.email_id_number";

#[derive(Debug)]
struct Collection<T> {
    next_seq: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Entry<T> {
    seq: u64,
    record: T,
}

impl<T: Clone> Collection<T> {
    fn push(&mut self, record: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { seq, record });
    }

    fn newest_first(&self, created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
        let mut ordered: Vec<&Entry<T>> = self.entries.iter().collect();
        ordered.sort_by(|a, b| {
            created_at(&b.record)
                .cmp(&created_at(&a.record))
                .then(b.seq.cmp(&a.seq))
        });
        ordered.into_iter().map(|entry| entry.record.clone()).collect()
    }
}

/// In-memory application collection with a unique index over the dedup key.
#[derive(Debug, Default)]
pub struct MemoryApplicationRepository {
    inner: RwLock<Collection<Application>>,
}

impl MemoryApplicationRepository {
    fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, Collection<Application>>, ApplicationRepositoryError> {
        self.inner
            .read()
            .map_err(|_| ApplicationRepositoryError::query("application collection lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Collection<Application>>, ApplicationRepositoryError> {
        self.inner
            .write()
            .map_err(|_| ApplicationRepositoryError::query("application collection lock poisoned"))
    }
}

fn dedup_collision(
    entries: &[Entry<Application>],
    key: &DedupKey,
    except: Option<ApplicationId>,
) -> bool {
    entries.iter().any(|entry| {
        except != Some(entry.record.id()) && entry.record.dedup_key().as_ref() == Some(key)
    })
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut collection = self.write()?;
        if let Some(key) = application.dedup_key()
            && dedup_collision(&collection.entries, &key, None)
        {
            return Err(ApplicationRepositoryError::unique_violation(
                APPLICATION_DEDUP_INDEX,
            ));
        }
        collection.push(application.clone());
        Ok(())
    }

    async fn find_by_dedup_key(
        &self,
        key: &DedupKey,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let collection = self.read()?;
        Ok(collection
            .entries
            .iter()
            .find(|entry| entry.record.dedup_key().as_ref() == Some(key))
            .map(|entry| entry.record.clone()))
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let collection = self.read()?;
        Ok(collection
            .entries
            .iter()
            .find(|entry| entry.record.id() == id)
            .map(|entry| entry.record.clone()))
    }

    async fn list_recent(&self) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let collection = self.read()?;
        Ok(collection.newest_first(Application::created_at))
    }

    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError> {
        let mut collection = self.write()?;
        let Some(position) = collection
            .entries
            .iter()
            .position(|entry| entry.record.id() == application.id())
        else {
            return Ok(false);
        };
        if let Some(key) = application.dedup_key()
            && dedup_collision(&collection.entries, &key, Some(application.id()))
        {
            return Err(ApplicationRepositoryError::unique_violation(
                APPLICATION_DEDUP_INDEX,
            ));
        }
        if let Some(entry) = collection.entries.get_mut(position) {
            entry.record = application.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut collection = self.write()?;
        let before = collection.entries.len();
        collection.entries.retain(|entry| entry.record.id() != id);
        Ok(collection.entries.len() < before)
    }

    async fn delete_all(&self) -> Result<u64, ApplicationRepositoryError> {
        let mut collection = self.write()?;
        let removed = collection.entries.len() as u64;
        collection.entries.clear();
        Ok(removed)
    }
}

/// In-memory contact collection. Append and list only.
#[derive(Debug, Default)]
pub struct MemoryContactRepository {
    inner: RwLock<Collection<Contact>>,
}

impl MemoryContactRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, Collection<Contact>>, ContactRepositoryError> {
        self.inner
            .read()
            .map_err(|_| ContactRepositoryError::query("contact collection lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collection<Contact>>, ContactRepositoryError> {
        self.inner
            .write()
            .map_err(|_| ContactRepositoryError::query("contact collection lock poisoned"))
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut collection = self.write()?;
        collection.push(contact.clone());
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let collection = self.read()?;
        Ok(collection.newest_first(Contact::created_at))
    }
}

/// In-memory account collection with unique indexes over email and username.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    inner: RwLock<Collection<User>>,
}

impl MemoryUserRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, Collection<User>>, UserRepositoryError> {
        self.inner
            .read()
            .map_err(|_| UserRepositoryError::query("user collection lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collection<User>>, UserRepositoryError> {
        self.inner
            .write()
            .map_err(|_| UserRepositoryError::query("user collection lock poisoned"))
    }
}

fn user_collision(
    entries: &[Entry<User>],
    candidate: &User,
) -> Option<UserConstraint> {
    for entry in entries {
        if entry.record.id() == candidate.id() {
            continue;
        }
        if entry.record.email() == candidate.email() {
            return Some(UserConstraint::Email);
        }
        if entry.record.username() == candidate.username() {
            return Some(UserConstraint::Username);
        }
    }
    None
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut collection = self.write()?;
        if let Some(constraint) = user_collision(&collection.entries, user) {
            return Err(UserRepositoryError::unique_violation(constraint));
        }
        collection.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let collection = self.read()?;
        Ok(collection
            .entries
            .iter()
            .find(|entry| entry.record.email().as_ref() == email)
            .map(|entry| entry.record.clone()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let collection = self.read()?;
        Ok(collection
            .entries
            .iter()
            .find(|entry| entry.record.id() == id)
            .map(|entry| entry.record.clone()))
    }

    async fn list_recent(&self) -> Result<Vec<User>, UserRepositoryError> {
        let collection = self.read()?;
        Ok(collection.newest_first(User::created_at))
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut collection = self.write()?;
        let Some(position) = collection
            .entries
            .iter()
            .position(|entry| entry.record.id() == user.id())
        else {
            return Ok(false);
        };
        if let Some(constraint) = user_collision(&collection.entries, user) {
            return Err(UserRepositoryError::unique_violation(constraint));
        }
        if let Some(entry) = collection.entries.get_mut(position) {
            entry.record = user.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut collection = self.write()?;
        let before = collection.entries.len();
        collection.entries.retain(|entry| entry.record.id() != id);
        Ok(collection.entries.len() < before)
    }
}
