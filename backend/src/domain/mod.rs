//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: define the strongly typed entities and use-case services behind
//! the HTTP adapter. Types stay immutable where practical and document their
//! invariants and serde contracts in each type's Rustdoc. Nothing in this
//! tree imports actix or any outbound infrastructure.

pub mod application;
pub mod auth;
pub mod contact;
pub mod error;
pub mod ports;
pub mod session;
pub mod user;

mod accounts_service;
mod applications_service;
mod contacts_service;

pub use self::accounts_service::{AccountService, AccountServiceParts};
pub use self::application::{Application, ApplicationDetails, ApplicationId, DedupKey};
pub use self::applications_service::ApplicationService;
pub use self::auth::{
    Credentials, CredentialsValidationError, SignupDetails, SignupValidationError,
};
pub use self::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
pub use self::contacts_service::ContactService;
pub use self::error::{Error, ErrorCode};
pub use self::session::{
    SESSION_TTL_HOURS, SessionRecord, SessionToken, SessionTokenError,
};
pub use self::user::{
    EmailAddress, PasswordHash, Role, User, UserId, UserProfile, UserUpdate, UserValidationError,
    Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn guard() -> ApiResult<()> {
///     Err(Error::forbidden("Access denied"))
/// }
/// # assert!(guard().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
