//! Server configuration from environment variables.

use std::net::SocketAddr;

use mockable::Env;
use reqwest::Url;
use tracing::warn;

use crate::inbound::http::session_config::{
    BuildMode, CookieSettings, SessionConfigError, cookie_settings_from_env,
};
use crate::outbound::notify::MailRelaySettings;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const MAIL_RELAY_URL_ENV: &str = "MAIL_RELAY_URL";
const ADMIN_EMAIL_ENV: &str = "ADMIN_EMAIL";

/// Errors raised while validating server configuration.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    /// Cookie toggles failed validation.
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}': {reason}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// Only one half of the mail relay pair is configured.
    #[error("MAIL_RELAY_URL and ADMIN_EMAIL must be set together")]
    IncompleteMailRelay,
}

/// Validated server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket the HTTP server binds.
    pub bind_addr: SocketAddr,
    /// Attributes stamped on issued session cookies.
    pub cookies: CookieSettings,
    /// Outbound mail relay, absent when notifications are log-only.
    pub mail_relay: Option<MailRelaySettings>,
}

impl ServerConfig {
    /// Build server settings from environment variables and build mode.
    ///
    /// # Errors
    /// Returns [`ServerConfigError`] for unparsable values, an incomplete
    /// mail relay pair, or cookie toggles rejected by the build mode.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ServerConfigError> {
        let bind_addr = bind_addr_from_env(env)?;
        let cookies = cookie_settings_from_env(env, mode)?;
        let mail_relay = mail_relay_from_env(env)?;
        if mail_relay.is_none() {
            warn!("mail relay not configured; application notifications are logged only");
        }
        Ok(Self {
            bind_addr,
            cookies,
            mail_relay,
        })
    }
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ServerConfigError> {
    let raw = env
        .string(BIND_ADDR_ENV)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    raw.parse()
        .map_err(|error: std::net::AddrParseError| ServerConfigError::InvalidEnv {
            name: BIND_ADDR_ENV,
            value: raw,
            reason: error.to_string(),
        })
}

fn mail_relay_from_env<E: Env>(env: &E) -> Result<Option<MailRelaySettings>, ServerConfigError> {
    match (env.string(MAIL_RELAY_URL_ENV), env.string(ADMIN_EMAIL_ENV)) {
        (Some(url), Some(admin_mailbox)) => {
            let endpoint =
                Url::parse(&url).map_err(|error| ServerConfigError::InvalidEnv {
                    name: MAIL_RELAY_URL_ENV,
                    value: url,
                    reason: error.to_string(),
                })?;
            Ok(Some(MailRelaySettings {
                endpoint,
                admin_mailbox,
            }))
        }
        (None, None) => Ok(None),
        _ => Err(ServerConfigError::IncompleteMailRelay),
    }
}
