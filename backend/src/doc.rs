//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint from the inbound layer, the shared error
//! schema, and the session cookie security scheme. Swagger UI serves the
//! generated document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::DashboardSnapshot;
use crate::domain::{
    Application, ApplicationDetails, Contact, ContactDraft, Error, ErrorCode, Role, UserProfile,
};
use crate::inbound::http::applications::{
    ApplicationResponse, BulkDeleteResponse, MessageResponse,
};
use crate::inbound::http::contacts::ContactResponse;
use crate::inbound::http::users::{
    LoginRequest, SignupRequest, UpdateUserRequest, UserResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Admissions backend API",
        description = "HTTP interface for admissions applications, contact messages, and session-authenticated account administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::update_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::applications::delete_all_applications,
        crate::inbound::http::contacts::submit_contact,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::admin_dashboard,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Application,
        ApplicationDetails,
        ApplicationResponse,
        BulkDeleteResponse,
        MessageResponse,
        Contact,
        ContactDraft,
        ContactResponse,
        UserProfile,
        Role,
        DashboardSnapshot,
        SignupRequest,
        LoginRequest,
        UpdateUserRequest,
        UserResponse,
    )),
    tags(
        (name = "applications", description = "Admissions application submission and administration"),
        (name = "contacts", description = "Inbound contact messages"),
        (name = "users", description = "Accounts, sessions, and the admin dashboard"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
