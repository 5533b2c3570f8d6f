//! Domain ports and supporting types for the hexagonal boundary.

mod accounts;
mod application_repository;
mod applications;
mod contact_repository;
mod contacts;
mod notification_gateway;
mod password_hasher;
mod session_store;
mod user_repository;

#[cfg(test)]
pub use accounts::MockAccounts;
pub use accounts::{Accounts, DashboardSnapshot, LoginOutcome};
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use applications::MockApplications;
pub use applications::Applications;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use contacts::MockContacts;
pub use contacts::Contacts;
#[cfg(test)]
pub use notification_gateway::MockNotificationGateway;
pub use notification_gateway::{
    NoopNotificationGateway, NotificationGateway, NotificationGatewayError,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserConstraint, UserRepository, UserRepositoryError};
