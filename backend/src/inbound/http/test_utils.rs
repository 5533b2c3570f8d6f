//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::SameSite;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::NoopNotificationGateway;
use crate::domain::{AccountService, AccountServiceParts, ApplicationService, ContactService};
use crate::inbound::http::session_config::CookieSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::BcryptPasswordHasher;
use crate::outbound::persistence::{
    MemoryApplicationRepository, MemoryContactRepository, MemoryUserRepository,
};
use crate::outbound::sessions::MemorySessionStore;

// bcrypt's minimum cost keeps handler tests quick.
const TEST_BCRYPT_COST: u32 = 4;

/// Build a fully wired state over in-memory adapters.
///
/// - Notifications go to the no-op gateway.
/// - The cookie is non-secure so plain HTTP test clients round-trip it.
pub fn memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let application_repo = Arc::new(MemoryApplicationRepository::default());
    let contact_repo = Arc::new(MemoryContactRepository::default());
    let user_repo = Arc::new(MemoryUserRepository::default());
    let sessions = Arc::new(MemorySessionStore::new(Arc::clone(&clock)));

    let applications = Arc::new(ApplicationService::new(
        Arc::clone(&application_repo),
        Arc::new(NoopNotificationGateway),
        Arc::clone(&clock),
    ));
    let contacts = Arc::new(ContactService::new(
        Arc::clone(&contact_repo),
        Arc::clone(&clock),
    ));
    let accounts = Arc::new(AccountService::new(AccountServiceParts {
        users: user_repo,
        applications: application_repo,
        contacts: contact_repo,
        sessions: Arc::clone(&sessions),
        hasher: Arc::new(BcryptPasswordHasher::with_cost(TEST_BCRYPT_COST)),
        clock,
    }));

    HttpState::new(
        applications,
        contacts,
        accounts,
        sessions,
        CookieSettings {
            secure: false,
            same_site: SameSite::Lax,
        },
    )
}
