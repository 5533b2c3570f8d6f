//! Session cookie plumbing and the authorization guard.
//!
//! The cookie carries nothing but the opaque session token; everything else
//! lives server-side in the session store. The guard is an explicit function
//! called at the top of protected handlers rather than framework middleware,
//! so a handler's requirements are visible at its definition.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, time};
use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::{ApiResult, Error, SESSION_TTL_HOURS, SessionRecord, SessionToken};
use crate::inbound::http::session_config::CookieSettings;
use crate::inbound::http::state::HttpState;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Extractor for the request's session token, when one is present.
///
/// A missing cookie and a malformed token are both represented as absence:
/// the guard treats every unauthenticated shape identically anyway.
#[derive(Debug, Clone)]
pub struct SessionCookie(Option<SessionToken>);

impl SessionCookie {
    /// Build directly from an optional token. Handler tests use this to
    /// sidestep request plumbing.
    #[must_use]
    pub const fn from_token(token: Option<SessionToken>) -> Self {
        Self(token)
    }

    /// The carried token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        self.0.as_ref()
    }
}

impl FromRequest for SessionCookie {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .cookie(SESSION_COOKIE_NAME)
            .and_then(|cookie| match SessionToken::parse(cookie.value()) {
                Ok(token) => Some(token),
                Err(error) => {
                    tracing::warn!(%error, "malformed session token in cookie");
                    None
                }
            });
        ready(Ok(Self(token)))
    }
}

/// Build the cookie handed out on login.
#[must_use]
pub fn issue_cookie(token: SessionToken, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, token.to_string())
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .max_age(time::Duration::hours(SESSION_TTL_HOURS))
        .finish()
}

/// Build the cookie that clears the session on logout.
#[must_use]
pub fn removal_cookie(settings: &CookieSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "")
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .finish();
    cookie.make_removal();
    cookie
}

/// Resolve the request's token against the session store.
///
/// # Errors
/// Returns an internal [`Error`] when the store cannot be reached.
pub async fn resolve(
    state: &HttpState,
    cookie: &SessionCookie,
) -> ApiResult<Option<SessionRecord>> {
    match cookie.token() {
        Some(token) => state
            .sessions
            .load(token)
            .await
            .map_err(|error| Error::internal(format!("session store error: {error}"))),
        None => Ok(None),
    }
}

/// Admit only an authenticated administrator.
///
/// Absence of a session, an expired session, and a non-admin role all get
/// the same answer so the response does not reveal which check failed.
///
/// # Errors
/// Returns a forbidden [`Error`] for every non-admin shape.
pub fn require_admin(session: Option<SessionRecord>) -> ApiResult<SessionRecord> {
    match session {
        Some(record) if record.role().is_admin() => Ok(record),
        _ => Err(Error::forbidden("Access denied")),
    }
}

/// Resolve and gate in one step; the usual entry for admin handlers.
///
/// # Errors
/// Returns a forbidden [`Error`] for unauthenticated or non-admin callers
/// and an internal [`Error`] when the store cannot be reached.
pub async fn authorize_admin(
    state: &HttpState,
    cookie: &SessionCookie,
) -> ApiResult<SessionRecord> {
    require_admin(resolve(state, cookie).await?)
}

#[cfg(test)]
mod tests {
    //! Coverage for the extractor, cookie attributes, and guard decisions.

    use std::sync::Arc;

    use actix_web::cookie::SameSite;
    use actix_web::test::TestRequest;
    use mockable::DefaultClock;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::SessionStore;
    use crate::domain::{ErrorCode, Role, UserId};
    use crate::inbound::http::test_utils;
    use crate::outbound::sessions::MemorySessionStore;

    const SETTINGS: CookieSettings = CookieSettings {
        secure: false,
        same_site: SameSite::Lax,
    };

    #[actix_web::test]
    async fn extractor_reads_a_well_formed_token() {
        let token = SessionToken::generate();
        let request = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE_NAME, token.to_string()))
            .to_http_request();
        let cookie = SessionCookie::extract(&request)
            .await
            .expect("extraction is infallible");
        assert_eq!(cookie.token(), Some(&token));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::malformed(Some("not-a-token"))]
    #[actix_web::test]
    async fn extractor_treats_bad_cookies_as_absent(#[case] raw: Option<&str>) {
        let mut request = TestRequest::default();
        if let Some(raw) = raw {
            request = request.cookie(Cookie::new(SESSION_COOKIE_NAME, raw));
        }
        let cookie = SessionCookie::extract(&request.to_http_request())
            .await
            .expect("extraction is infallible");
        assert!(cookie.token().is_none());
    }

    #[test]
    fn issued_cookie_is_http_only_with_the_session_ttl() {
        let cookie = issue_cookie(SessionToken::generate(), &SETTINGS);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::hours(SESSION_TTL_HOURS))
        );
    }

    #[test]
    fn removal_cookie_blanks_the_value() {
        let cookie = removal_cookie(&SETTINGS);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[rstest]
    #[case::no_session(None)]
    #[case::plain_user(Some(Role::User))]
    fn guard_denies_every_non_admin_shape(#[case] role: Option<Role>) {
        let session =
            role.map(|role| SessionRecord::issue(UserId::random(), role, chrono::Utc::now()));
        let err = require_admin(session).expect_err("must be denied");
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message, "Access denied");
    }

    #[test]
    fn guard_admits_an_admin_session() {
        let session = SessionRecord::issue(UserId::random(), Role::Admin, chrono::Utc::now());
        let admitted = require_admin(Some(session.clone())).expect("admin passes");
        assert_eq!(admitted, session);
    }

    #[actix_web::test]
    async fn authorize_admin_rejects_a_destroyed_session() {
        let state = test_utils::memory_state();
        let sessions = Arc::new(MemorySessionStore::new(Arc::new(DefaultClock)));
        let record = SessionRecord::issue(UserId::random(), Role::Admin, chrono::Utc::now());
        sessions.insert(&record).await.expect("insert succeeds");
        let state = HttpState {
            sessions: sessions.clone(),
            ..state
        };
        let cookie = SessionCookie::from_token(Some(record.token()));

        authorize_admin(&state, &cookie)
            .await
            .expect("live admin session passes");

        sessions
            .delete(&record.token())
            .await
            .expect("delete succeeds");
        let err = authorize_admin(&state, &cookie)
            .await
            .expect_err("destroyed session is denied");
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
