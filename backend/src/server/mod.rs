//! Server construction and route wiring.

mod config;

pub use config::{ServerConfig, ServerConfigError};

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{Applications, NoopNotificationGateway};
use crate::domain::{AccountService, AccountServiceParts, ApplicationService, ContactService};
use crate::inbound::http::applications::{
    delete_all_applications, delete_application, get_application, list_applications,
    submit_application, update_application,
};
use crate::inbound::http::contacts::{list_contacts, submit_contact};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    admin_dashboard, delete_user, get_user, list_users, login, logout, signup, update_user,
};
use crate::outbound::credentials::BcryptPasswordHasher;
use crate::outbound::notify::MailRelayNotificationGateway;
use crate::outbound::persistence::{
    MemoryApplicationRepository, MemoryContactRepository, MemoryUserRepository,
};
use crate::outbound::sessions::MemorySessionStore;

/// How often the background sweep reclaims expired sessions.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Assemble the actix application with every route registered.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .service(submit_application)
        .service(list_applications)
        .service(get_application)
        .service(update_application)
        .service(delete_application)
        .service(delete_all_applications)
        .service(submit_contact)
        .service(list_contacts)
        .service(signup)
        .service(login)
        .service(logout)
        .service(admin_dashboard)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Wire the in-process adapters and domain services into handler state.
///
/// Returns the state plus the concrete session store so the caller can run
/// the expiry sweep against it.
///
/// # Errors
/// Propagates [`std::io::Error`] when the mail relay client cannot be built.
pub fn build_http_state(
    server_config: &ServerConfig,
) -> std::io::Result<(HttpState, Arc<MemorySessionStore>)> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let application_repo = Arc::new(MemoryApplicationRepository::default());
    let contact_repo = Arc::new(MemoryContactRepository::default());
    let user_repo = Arc::new(MemoryUserRepository::default());
    let sessions = Arc::new(MemorySessionStore::new(Arc::clone(&clock)));

    let applications: Arc<dyn Applications> = match &server_config.mail_relay {
        Some(relay) => {
            let gateway = MailRelayNotificationGateway::new(relay.clone())
                .map_err(|error| std::io::Error::other(format!("mail relay client: {error}")))?;
            Arc::new(ApplicationService::new(
                Arc::clone(&application_repo),
                Arc::new(gateway),
                Arc::clone(&clock),
            ))
        }
        None => Arc::new(ApplicationService::new(
            Arc::clone(&application_repo),
            Arc::new(NoopNotificationGateway),
            Arc::clone(&clock),
        )),
    };
    let contacts = Arc::new(ContactService::new(
        Arc::clone(&contact_repo),
        Arc::clone(&clock),
    ));
    let accounts = Arc::new(AccountService::new(AccountServiceParts {
        users: user_repo,
        applications: application_repo,
        contacts: contact_repo,
        sessions: Arc::clone(&sessions),
        hasher: Arc::new(BcryptPasswordHasher::default()),
        clock,
    }));

    let state = HttpState::new(
        applications,
        contacts,
        accounts,
        Arc::clone(&sessions) as Arc<dyn crate::domain::ports::SessionStore>,
        server_config.cookies,
    );
    Ok((state, sessions))
}

fn spawn_session_sweep(sessions: Arc<MemorySessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        // The first tick fires immediately; harmless against an empty map.
        loop {
            interval.tick().await;
            match sessions.purge_expired() {
                Ok(0) => {}
                Ok(purged) => tracing::debug!(purged, "expired sessions reclaimed"),
                Err(error) => warn!(%error, "session sweep failed"),
            }
        }
    });
}

/// Construct the HTTP server from validated configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter construction or socket
/// binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    server_config: &ServerConfig,
) -> std::io::Result<Server> {
    let (http_state, sessions) = build_http_state(server_config)?;
    spawn_session_sweep(sessions);

    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(http_state.clone(), server_health_state.clone())
    })
    .bind(server_config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
