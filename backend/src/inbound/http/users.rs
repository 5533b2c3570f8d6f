//! Account API handlers.
//!
//! ```text
//! POST   /signup           Create an account
//! POST   /login            Authenticate and issue a session cookie
//! POST   /logout           Destroy the current session
//! GET    /dashboard/users  Administrative aggregate (admin only)
//! GET    /users            List accounts (admin only)
//! GET    /users/{id}       Fetch one account (admin only)
//! PUT    /users/{id}       Update username/email/role (admin only)
//! DELETE /users/{id}       Delete an account (admin only)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::DashboardSnapshot;
use crate::domain::{
    Credentials, CredentialsValidationError, EmailAddress, Error, Role, SignupDetails,
    SignupValidationError, UserId, UserProfile, UserUpdate, UserValidationError, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{self, SessionCookie};
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Requested login handle.
    pub username: String,
    /// Requested unique address.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Optional role; defaults to `user`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Address the account was registered with.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Profile update body for `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    /// Replacement username, if any.
    pub username: Option<String>,
    /// Replacement email, if any.
    pub email: Option<String>,
    /// Replacement role, if any.
    pub role: Option<String>,
}

/// Envelope for an account profile plus a confirmation message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The account, never including credential material.
    pub user: UserProfile,
}

/// Envelope for simple confirmations.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn user_field(error: &UserValidationError) -> &'static str {
    match error {
        UserValidationError::EmptyUsername
        | UserValidationError::UsernameTooShort { .. }
        | UserValidationError::UsernameTooLong { .. }
        | UserValidationError::UsernameInvalidCharacters => "username",
        UserValidationError::EmptyEmail | UserValidationError::InvalidEmail => "email",
        UserValidationError::InvalidRole { .. } => "role",
    }
}

fn map_signup_error(error: SignupValidationError) -> Error {
    let field = match &error {
        SignupValidationError::User(user_error) => user_field(user_error),
        SignupValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn map_credentials_error(error: CredentialsValidationError) -> Error {
    let field = match error {
        CredentialsValidationError::EmptyEmail => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn map_user_field_error(error: UserValidationError) -> Error {
    let field = user_field(&error);
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = UserValidationError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let UpdateUserRequest {
            username,
            email,
            role,
        } = value;
        Ok(Self {
            username: username.map(Username::new).transpose()?,
            email: email.map(EmailAddress::new).transpose()?,
            role: role.as_deref().map(Role::parse).transpose()?,
        })
    }
}

/// Create a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid fields or registered email", body = Error),
        (status = 500, description = "Server failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        username,
        email,
        password,
        role,
    } = payload.into_inner();
    let details = SignupDetails::try_from_parts(&username, &email, &password, role.as_deref())
        .map_err(map_signup_error)?;
    let user = state.accounts.signup(details).await?;
    Ok(HttpResponse::Created().json(UserResponse {
        message: "User signed up!".to_owned(),
        user,
    }))
}

/// Authenticate and establish a session.
///
/// Unknown email and wrong password produce byte-identical error payloads so
/// the response does not reveal which check failed.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid payload or credentials", body = Error),
        (status = 500, description = "Server failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        Credentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let outcome = state.accounts.login(credentials).await?;
    let cookie = session::issue_cookie(outcome.session.token(), &state.cookies);
    Ok(HttpResponse::Ok().cookie(cookie).json(UserResponse {
        message: "Login successful".to_owned(),
        user: outcome.user,
    }))
}

/// Destroy the current session.
///
/// Idempotent: a missing or already-destroyed session still logs out
/// cleanly and clears the cookie.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session destroyed", body = MessageResponse),
        (status = 500, description = "Session store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, cookie: SessionCookie) -> ApiResult<HttpResponse> {
    if let Some(token) = cookie.token() {
        state.accounts.logout(token).await?;
    }
    Ok(HttpResponse::Ok()
        .cookie(session::removal_cookie(&state.cookies))
        .json(MessageResponse {
            message: "Logout successful".to_owned(),
        }))
}

/// Administrative aggregate over accounts, applications, and contacts.
#[utoipa::path(
    get,
    path = "/dashboard/users",
    responses(
        (status = 200, description = "Dashboard aggregate", body = DashboardSnapshot),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 500, description = "Server failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "adminDashboard"
)]
#[get("/dashboard/users")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<web::Json<DashboardSnapshot>> {
    session::authorize_admin(&state, &cookie).await?;
    Ok(web::Json(state.accounts.dashboard().await?))
}

/// List every account, newest first.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Accounts", body = [UserProfile]),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<web::Json<Vec<UserProfile>>> {
    session::authorize_admin(&state, &cookie).await?;
    Ok(web::Json(state.accounts.list_users().await?))
}

/// Fetch one account by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = UserProfile),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<UserProfile>> {
    session::authorize_admin(&state, &cookie).await?;
    let user = state.accounts.get_user(UserId::new(id.into_inner())).await?;
    Ok(web::Json(user))
}

/// Update an account's username, email, or role.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Invalid fields or uniqueness conflict", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    session::authorize_admin(&state, &cookie).await?;
    let update = UserUpdate::try_from(payload.into_inner()).map_err(map_user_field_error)?;
    let user = state
        .accounts
        .update_user(UserId::new(id.into_inner()), update)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        message: "User updated successfully".to_owned(),
        user,
    }))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session::authorize_admin(&state, &cookie).await?;
    state
        .accounts
        .delete_user(UserId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::session::SESSION_COOKIE_NAME;
    use crate::inbound::http::test_utils;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(test_utils::memory_state()))
            .service(signup)
            .service(login)
            .service(logout)
            .service(admin_dashboard)
            .service(list_users)
            .service(get_user)
            .service(update_user)
            .service(delete_user)
    }

    type TestService = actix_http::Request;

    async fn do_signup(
        app: &impl actix_web::dev::Service<
            TestService,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        username: &str,
        email: &str,
        role: Option<&str>,
    ) -> Value {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(json!({
                    "username": username,
                    "email": email,
                    "password": "pw123",
                    "role": role,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        actix_test::read_body_json(response).await
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            TestService,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "email": email, "password": "pw123" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie issued")
            .into_owned()
    }

    #[actix_web::test]
    async fn signup_defaults_the_role_and_hides_credentials() {
        let app = actix_test::init_service(test_app()).await;
        let body = do_signup(&app, "bob", "b@x.com", None).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("User signed up!")
        );
        let user = body.get("user").expect("profile echoed");
        assert_eq!(user.get("role").and_then(Value::as_str), Some("user"));
        let fields = user.as_object().expect("profile is an object");
        assert!(fields.keys().all(|key| !key.to_lowercase().contains("password")));
    }

    #[actix_web::test]
    async fn signup_rejects_an_unknown_role() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(json!({
                    "username": "bob",
                    "email": "b@x.com",
                    "password": "pw123",
                    "role": "root",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("details").and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("role")
        );
    }

    #[actix_web::test]
    async fn duplicate_email_signup_is_a_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "bob", "b@x.com", None).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup")
                .set_json(json!({
                    "username": "robert",
                    "email": "b@x.com",
                    "password": "pw123",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Email already exists")
        );
    }

    #[actix_web::test]
    async fn failed_logins_return_byte_identical_payloads() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "bob", "b@x.com", None).await;

        let mut bodies = Vec::new();
        for payload in [
            json!({ "email": "b@x.com", "password": "wrong" }),
            json!({ "email": "missing@x.com", "password": "pw123" }),
        ] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/login")
                    .set_json(payload)
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            bodies.push(actix_test::read_body(response).await);
        }
        assert_eq!(bodies.first(), bodies.get(1));
    }

    #[actix_web::test]
    async fn login_issues_an_http_only_session_cookie() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "bob", "b@x.com", None).await;
        let cookie = login_cookie(&app, "b@x.com").await;
        assert_eq!(cookie.http_only(), Some(true));
        assert!(!cookie.value().is_empty());
    }

    #[actix_web::test]
    async fn non_admin_sessions_are_denied_the_dashboard() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "bob", "b@x.com", None).await;
        let cookie = login_cookie(&app, "b@x.com").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard/users")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Access denied")
        );
    }

    #[actix_web::test]
    async fn missing_sessions_are_denied_the_admin_routes() {
        let app = actix_test::init_service(test_app()).await;
        for uri in ["/dashboard/users", "/users"] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri(uri).to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[actix_web::test]
    async fn admin_sessions_reach_the_dashboard_with_consistent_counts() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "root", "root@x.com", Some("admin")).await;
        do_signup(&app, "bob", "b@x.com", None).await;
        let cookie = login_cookie(&app, "root@x.com").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard/users")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let users = body.get("users").and_then(Value::as_array).expect("users");
        assert_eq!(
            body.get("totalUsers").and_then(Value::as_u64),
            Some(users.len() as u64)
        );
        assert_eq!(body.get("applicationCount").and_then(Value::as_u64), Some(0));
        assert_eq!(body.get("contactCount").and_then(Value::as_u64), Some(0));
    }

    #[actix_web::test]
    async fn logout_destroys_the_session_for_admin_routes() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "root", "root@x.com", Some("admin")).await;
        let cookie = login_cookie(&app, "root@x.com").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response
            .response()
            .cookies()
            .find(|candidate| candidate.name() == SESSION_COOKIE_NAME)
            .expect("removal cookie present");
        assert_eq!(cleared.value(), "");

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard/users")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn logout_without_a_session_still_succeeds() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/logout").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Logout successful")
        );
    }

    #[actix_web::test]
    async fn admin_user_crud_round_trip() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "root", "root@x.com", Some("admin")).await;
        let target = do_signup(&app, "bob", "b@x.com", None).await;
        let target_id = target
            .get("user")
            .and_then(|user| user.get("id"))
            .and_then(Value::as_str)
            .expect("target id")
            .to_owned();
        let cookie = login_cookie(&app, "root@x.com").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/users/{target_id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/users/{target_id}"))
                .cookie(cookie.clone())
                .set_json(json!({ "role": "admin" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("user").and_then(|u| u.get("role")).and_then(Value::as_str),
            Some("admin")
        );

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/users/{target_id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/users/{target_id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_rejects_invalid_fields_with_the_offending_name() {
        let app = actix_test::init_service(test_app()).await;
        do_signup(&app, "root", "root@x.com", Some("admin")).await;
        let cookie = login_cookie(&app, "root@x.com").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/users/{}", uuid::Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({ "email": "not-an-email" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("details").and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("email")
        );
    }
}
