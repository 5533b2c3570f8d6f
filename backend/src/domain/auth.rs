//! Authentication primitives: login credentials and signup details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Passwords travel in [`Zeroizing`] buffers so the plaintext is wiped once
//! dropped.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, Role, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty, but deliberately NOT checked for
///   address shape: a malformed email simply fails the account lookup and
///   produces the same non-specific error as a wrong password.
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    /// Returns [`CredentialsValidationError`] when either field is blank.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup details.
///
/// The role defaults to [`Role::User`] when unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    role: Role,
}

impl SignupDetails {
    /// Construct signup details from raw string inputs.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] for invalid username, email, or role,
    /// and treats a blank password as an invalid field too.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Self, SignupValidationError> {
        let username = Username::new(username).map_err(SignupValidationError::User)?;
        let email = EmailAddress::new(email).map_err(SignupValidationError::User)?;
        if password.is_empty() {
            return Err(SignupValidationError::EmptyPassword);
        }
        let role = match role {
            Some(raw) => Role::parse(raw).map_err(SignupValidationError::User)?,
            None => Role::default(),
        };
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }

    /// Requested username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Validation errors raised while accepting a signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// Username, email, or role failed account validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for SignupValidationError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("b@x.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err =
            Credentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn credentials_trim_email_but_not_password() {
        let creds = Credentials::try_from_parts("  b@x.com  ", " pw123 ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), "b@x.com");
        assert_eq!(creds.password(), " pw123 ");
    }

    #[test]
    fn malformed_email_is_accepted_for_login() {
        // Shape checks would leak which half of the credential pair failed.
        let creds =
            Credentials::try_from_parts("not-an-email", "pw123").expect("lookup key accepted");
        assert_eq!(creds.email(), "not-an-email");
    }

    #[test]
    fn signup_defaults_role_to_user() {
        let details = SignupDetails::try_from_parts("bob", "b@x.com", "pw123", None)
            .expect("valid signup");
        assert_eq!(details.role(), Role::User);
    }

    #[rstest]
    #[case("bob", "b@x.com", "pw123", Some("root"))]
    #[case("x", "b@x.com", "pw123", None)]
    #[case("bob", "nope", "pw123", None)]
    fn invalid_signup_fields_are_rejected(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: Option<&str>,
    ) {
        let result = SignupDetails::try_from_parts(username, email, password, role);
        assert!(matches!(result, Err(SignupValidationError::User(_))));
    }

    #[test]
    fn blank_signup_password_is_rejected() {
        let err = SignupDetails::try_from_parts("bob", "b@x.com", "", None)
            .expect_err("blank password must fail");
        assert_eq!(err, SignupValidationError::EmptyPassword);
    }
}
