//! Driving port for account and session use-cases.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Application, Contact, Credentials, Error, SessionRecord, SessionToken, SignupDetails,
    UserId, UserProfile, UserUpdate,
};

/// Successful login: the account profile plus its freshly issued session.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// Authenticated account without credential material.
    pub user: UserProfile,
    /// Session to hand back to the client as an opaque token.
    pub session: SessionRecord,
}

/// Read-only administrative aggregate over every collection.
///
/// ## Invariants
/// - `total_users == users.len()`, `application_count == applications.len()`,
///   and `contact_count == contacts.len()`: counts are derived from the same
///   listings returned in the response, never from separate queries.
/// - `latest_applications` and `latest_contacts` are the first five entries
///   of their respective listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Every account, newest first.
    pub users: Vec<UserProfile>,
    /// Cardinality of `users`.
    pub total_users: u64,
    /// Every application, newest first.
    pub applications: Vec<Application>,
    /// Every contact message, newest first.
    pub contacts: Vec<Contact>,
    /// Cardinality of `applications`.
    pub application_count: u64,
    /// Cardinality of `contacts`.
    pub contact_count: u64,
    /// The five most recent applications.
    pub latest_applications: Vec<Application>,
    /// The five most recent contact messages.
    pub latest_contacts: Vec<Contact>,
}

/// Domain use-case port for accounts, sessions, and the dashboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new account, hashing its password.
    async fn signup(&self, details: SignupDetails) -> Result<UserProfile, Error>;

    /// Authenticate credentials and issue a session.
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, Error>;

    /// Destroy a session. Succeeds when the session is already gone.
    async fn logout(&self, token: &SessionToken) -> Result<(), Error>;

    /// All accounts, newest first.
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;

    /// Fetch one account.
    async fn get_user(&self, id: UserId) -> Result<UserProfile, Error>;

    /// Apply a profile update restricted to username, email, and role.
    async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<UserProfile, Error>;

    /// Remove one account.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;

    /// Build the administrative aggregate.
    async fn dashboard(&self) -> Result<DashboardSnapshot, Error>;
}
