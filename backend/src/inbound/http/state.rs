//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Accounts, Applications, Contacts, SessionStore};
use crate::inbound::http::session_config::CookieSettings;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Application use-cases.
    pub applications: Arc<dyn Applications>,
    /// Contact message use-cases.
    pub contacts: Arc<dyn Contacts>,
    /// Account, session, and dashboard use-cases.
    pub accounts: Arc<dyn Accounts>,
    /// Session store the authorization guard resolves tokens against.
    pub sessions: Arc<dyn SessionStore>,
    /// Attributes stamped on issued session cookies.
    pub cookies: CookieSettings,
}

impl HttpState {
    /// Construct state from its ports and cookie settings.
    pub fn new(
        applications: Arc<dyn Applications>,
        contacts: Arc<dyn Contacts>,
        accounts: Arc<dyn Accounts>,
        sessions: Arc<dyn SessionStore>,
        cookies: CookieSettings,
    ) -> Self {
        Self {
            applications,
            contacts,
            accounts,
            sessions,
            cookies,
        }
    }
}
