//! Account domain service: signup, login, logout, profile CRUD, and the
//! administrative dashboard aggregate.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    Accounts, ApplicationRepository, ApplicationRepositoryError, ContactRepository,
    ContactRepositoryError, DashboardSnapshot, LoginOutcome, PasswordHasher, PasswordHasherError,
    SessionStore, SessionStoreError, UserConstraint, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Credentials, Error, SessionRecord, SessionToken, SignupDetails, User, UserId, UserProfile,
    UserUpdate,
};

/// How many of the newest applications and contacts the dashboard surfaces.
const DASHBOARD_LATEST_LIMIT: usize = 5;

/// The one message both credential failures share, so neither response
/// reveals whether the email exists.
const BAD_CREDENTIALS: &str = "Invalid email or password";

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::UniqueViolation {
            constraint: UserConstraint::Email,
        } => Error::conflict("Email already exists"),
        UserRepositoryError::UniqueViolation {
            constraint: UserConstraint::Username,
        } => Error::conflict("Username already exists"),
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_application_repository_error(error: ApplicationRepositoryError) -> Error {
    Error::internal(format!("application repository error: {error}"))
}

fn map_contact_repository_error(error: ContactRepositoryError) -> Error {
    Error::internal(format!("contact repository error: {error}"))
}

fn map_session_store_error(error: SessionStoreError) -> Error {
    Error::internal(format!("session store error: {error}"))
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("credential hashing error: {error}"))
}

/// Dependency bundle for [`AccountService`].
pub struct AccountServiceParts<U, A, C, S, H> {
    /// Account repository.
    pub users: Arc<U>,
    /// Application repository, read for the dashboard aggregate.
    pub applications: Arc<A>,
    /// Contact repository, read for the dashboard aggregate.
    pub contacts: Arc<C>,
    /// Server-side session store.
    pub sessions: Arc<S>,
    /// Password hashing adapter.
    pub hasher: Arc<H>,
    /// Time source for signup and session issue timestamps.
    pub clock: Arc<dyn Clock>,
}

/// Account service implementing the [`Accounts`] driving port.
pub struct AccountService<U, A, C, S, H> {
    users: Arc<U>,
    applications: Arc<A>,
    contacts: Arc<C>,
    sessions: Arc<S>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, A, C, S, H> AccountService<U, A, C, S, H> {
    /// Create a new service from its dependency bundle.
    pub fn new(parts: AccountServiceParts<U, A, C, S, H>) -> Self {
        let AccountServiceParts {
            users,
            applications,
            contacts,
            sessions,
            hasher,
            clock,
        } = parts;
        Self {
            users,
            applications,
            contacts,
            sessions,
            hasher,
            clock,
        }
    }
}

impl<U, A, C, S, H> AccountService<U, A, C, S, H>
where
    U: UserRepository,
{
    async fn fetch_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<U, A, C, S, H> Accounts for AccountService<U, A, C, S, H>
where
    U: UserRepository,
    A: ApplicationRepository,
    C: ContactRepository,
    S: SessionStore,
    H: PasswordHasher,
{
    async fn signup(&self, details: SignupDetails) -> Result<UserProfile, Error> {
        let registered = self
            .users
            .find_by_email(details.email().as_ref())
            .await
            .map_err(map_user_repository_error)?;
        if registered.is_some() {
            return Err(Error::conflict("Email already exists"));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            details.username().clone(),
            details.email().clone(),
            password_hash,
            details.role(),
            self.clock.utc(),
        );
        self.users
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;
        Ok(UserProfile::from(user))
    }

    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?
        else {
            return Err(Error::auth_failed(BAD_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hasher_error)?;
        if !verified {
            return Err(Error::auth_failed(BAD_CREDENTIALS));
        }

        let session = SessionRecord::issue(user.id(), user.role(), self.clock.utc());
        self.sessions
            .insert(&session)
            .await
            .map_err(map_session_store_error)?;
        Ok(LoginOutcome {
            user: UserProfile::from(user),
            session,
        })
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions
            .delete(token)
            .await
            .map_err(|error| Error::internal(format!("Logout failed: {error}")))
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self
            .users
            .list_recent()
            .await
            .map_err(map_user_repository_error)?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    async fn get_user(&self, id: UserId) -> Result<UserProfile, Error> {
        Ok(UserProfile::from(self.fetch_user(id).await?))
    }

    async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<UserProfile, Error> {
        let mut user = self.fetch_user(id).await?;
        user.apply_update(update);
        let replaced = self
            .users
            .update(&user)
            .await
            .map_err(map_user_repository_error)?;
        if !replaced {
            return Err(Error::not_found("User not found"));
        }
        Ok(UserProfile::from(user))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(id)
            .await
            .map_err(map_user_repository_error)?;
        if !removed {
            return Err(Error::not_found("User not found"));
        }
        Ok(())
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot, Error> {
        let users = self.list_users().await?;
        let applications = self
            .applications
            .list_recent()
            .await
            .map_err(map_application_repository_error)?;
        let contacts = self
            .contacts
            .list_recent()
            .await
            .map_err(map_contact_repository_error)?;

        // Counts come from the listings themselves so the aggregate can
        // never disagree with what it returns.
        let latest_applications = applications
            .iter()
            .take(DASHBOARD_LATEST_LIMIT)
            .cloned()
            .collect();
        let latest_contacts = contacts.iter().take(DASHBOARD_LATEST_LIMIT).cloned().collect();
        Ok(DashboardSnapshot {
            total_users: users.len() as u64,
            application_count: applications.len() as u64,
            contact_count: contacts.len() as u64,
            users,
            applications,
            contacts,
            latest_applications,
            latest_contacts,
        })
    }
}
