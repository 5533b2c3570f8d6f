//! Session cookie configuration parsing and validation.
//!
//! Centralises the environment-driven cookie toggles so they are validated
//! consistently and can be tested in isolation. Debug builds tolerate
//! missing toggles with a warning; release builds require explicit values.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Attributes stamped on the session cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieSettings {
    /// Whether the cookie carries the `Secure` flag.
    pub secure: bool,
    /// Configured `SameSite` policy.
    pub same_site: SameSite,
}

/// Errors raised while validating session cookie configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Accepted forms.
        expected: &'static str,
    },
    /// `SameSite=None` requires a secure cookie setting in release builds.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
}

/// Build cookie settings from environment variables and build mode.
///
/// # Errors
/// Returns [`SessionConfigError`] in release mode for missing or invalid
/// toggles, or for `SameSite=None` without a secure cookie.
pub fn cookie_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<CookieSettings, SessionConfigError> {
    let secure = cookie_secure_from_env(env, mode)?;
    let same_site = same_site_from_env(env, mode, secure)?;
    Ok(CookieSettings { secure, same_site })
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match env.string(COOKIE_SECURE_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => {
                if mode.is_debug() {
                    warn!(value = %value, "invalid SESSION_COOKIE_SECURE; defaulting to secure");
                    Ok(true)
                } else {
                    Err(SessionConfigError::InvalidEnv {
                        name: COOKIE_SECURE_ENV,
                        value,
                        expected: BOOL_EXPECTED,
                    })
                }
            }
        },
        None => {
            if mode.is_debug() {
                warn!("SESSION_COOKIE_SECURE not set; defaulting to secure");
                Ok(true)
            } else {
                Err(SessionConfigError::MissingEnv {
                    name: COOKIE_SECURE_ENV,
                })
            }
        }
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let value = match env.string(SAMESITE_ENV) {
        Some(value) => value,
        None => {
            if mode.is_debug() {
                warn!("SESSION_SAMESITE not set; using default");
                return Ok(default_same_site);
            }
            return Err(SessionConfigError::MissingEnv { name: SAMESITE_ENV });
        }
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => {
            if cookie_secure {
                Ok(SameSite::None)
            } else if mode.is_debug() {
                warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
                Ok(SameSite::None)
            } else {
                Err(SessionConfigError::InsecureSameSiteNone)
            }
        }
        _ => {
            if mode.is_debug() {
                warn!(value = %value, "invalid SESSION_SAMESITE, using default");
                Ok(default_same_site)
            } else {
                Err(SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value,
                    expected: SAMESITE_EXPECTED,
                })
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn env_with(secure: Option<&str>, same_site: Option<&str>) -> MockEnv {
        let secure = secure.map(str::to_owned);
        let same_site = same_site.map(str::to_owned);
        let mut env = MockEnv::new();
        env.expect_string().returning(move |name| match name {
            COOKIE_SECURE_ENV => secure.clone(),
            SAMESITE_ENV => same_site.clone(),
            _ => None,
        });
        env
    }

    #[rstest]
    #[case(Some("1"), Some("Strict"), true, SameSite::Strict)]
    #[case(Some("0"), Some("Lax"), false, SameSite::Lax)]
    #[case(Some("yes"), Some("none"), true, SameSite::None)]
    fn release_accepts_explicit_valid_toggles(
        #[case] secure: Option<&str>,
        #[case] same_site: Option<&str>,
        #[case] expected_secure: bool,
        #[case] expected_same_site: SameSite,
    ) {
        let settings = cookie_settings_from_env(&env_with(secure, same_site), BuildMode::Release)
            .expect("valid settings");
        assert_eq!(settings.secure, expected_secure);
        assert_eq!(settings.same_site, expected_same_site);
    }

    #[test]
    fn release_requires_every_toggle() {
        let err = cookie_settings_from_env(&env_with(None, Some("Lax")), BuildMode::Release)
            .expect_err("missing secure toggle");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == COOKIE_SECURE_ENV));

        let err = cookie_settings_from_env(&env_with(Some("1"), None), BuildMode::Release)
            .expect_err("missing samesite toggle");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == SAMESITE_ENV));
    }

    #[test]
    fn release_rejects_invalid_values() {
        let err = cookie_settings_from_env(&env_with(Some("maybe"), Some("Lax")), BuildMode::Release)
            .expect_err("invalid bool");
        assert!(matches!(err, SessionConfigError::InvalidEnv { name, .. } if name == COOKIE_SECURE_ENV));

        let err =
            cookie_settings_from_env(&env_with(Some("1"), Some("sideways")), BuildMode::Release)
                .expect_err("invalid samesite");
        assert!(matches!(err, SessionConfigError::InvalidEnv { name, .. } if name == SAMESITE_ENV));
    }

    #[test]
    fn release_rejects_insecure_same_site_none() {
        let err = cookie_settings_from_env(&env_with(Some("0"), Some("None")), BuildMode::Release)
            .expect_err("insecure none");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[test]
    fn debug_defaults_to_secure_lax() {
        let settings = cookie_settings_from_env(&env_with(None, None), BuildMode::Debug)
            .expect("debug defaults apply");
        assert!(settings.secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[test]
    fn debug_tolerates_invalid_values_with_defaults() {
        let settings =
            cookie_settings_from_env(&env_with(Some("maybe"), Some("sideways")), BuildMode::Debug)
                .expect("debug falls back");
        assert!(settings.secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }
}
