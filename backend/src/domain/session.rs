//! Server-side session records.
//!
//! A session binds an opaque token to an authenticated account and its role
//! at login time. Records live in a session store keyed by token; nothing on
//! the account references its sessions back.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::domain::user::{Role, UserId};

/// Fixed session lifetime in hours.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Error raised when an inbound token is not a well-formed session token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session token must be a UUID")]
pub struct SessionTokenError;

/// Opaque token identifying one session.
///
/// Tokens are random UUIDs: unguessable enough for a cookie value and cheap
/// to index by. The wire form is the hyphenated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token from its wire form.
    ///
    /// # Errors
    /// Returns [`SessionTokenError`] when the input is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, SessionTokenError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| SessionTokenError)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One authenticated session.
///
/// ## Invariants
/// - Valid only while unexpired and not explicitly destroyed.
/// - `role` is a snapshot taken at login; later role changes on the account
///   do not retroactively change the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    token: SessionToken,
    user_id: UserId,
    role: Role,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Issue a new session for an authenticated account.
    #[must_use]
    pub fn issue(user_id: UserId, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            token: SessionToken::generate(),
            user_id,
            role,
            created_at: now,
            expires_at: now + TimeDelta::hours(SESSION_TTL_HOURS),
        }
    }

    /// Opaque token identifying this session.
    #[must_use]
    pub const fn token(&self) -> SessionToken {
        self.token
    }

    /// Account this session belongs to.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Role captured at login time.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Login timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Expiry instant, fixed at issue time.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether this session has outlived its TTL at the given instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
