//! Contact message data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised while accepting a contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Email was missing or blank once trimmed.
    MissingEmail,
    /// Message body was missing or blank once trimmed.
    MissingMessage,
}

impl std::fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEmail => write!(f, "email is required"),
            Self::MissingMessage => write!(f, "message is required"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Caller-supplied contact fields, validated before storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDraft {
    /// Optional sender name.
    pub name: Option<String>,
    /// Sender address, required.
    pub email: Option<String>,
    /// Message body, required.
    pub message: Option<String>,
}

impl ContactDraft {
    /// Check the required fields, reporting the first violation.
    ///
    /// # Errors
    /// Returns [`ContactValidationError`] when email or message is blank.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.email.as_deref().is_none_or(|email| email.trim().is_empty()) {
            return Err(ContactValidationError::MissingEmail);
        }
        if self
            .message
            .as_deref()
            .is_none_or(|message| message.trim().is_empty())
        {
            return Err(ContactValidationError::MissingMessage);
        }
        Ok(())
    }
}

/// A stored contact message. Read-only once accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    id: ContactId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl Contact {
    /// Build a contact record from a validated draft.
    ///
    /// # Errors
    /// Returns [`ContactValidationError`] when the draft fails validation.
    pub fn from_draft(
        id: ContactId,
        draft: ContactDraft,
        received_at: DateTime<Utc>,
    ) -> Result<Self, ContactValidationError> {
        draft.validate()?;
        let ContactDraft {
            name,
            email,
            message,
        } = draft;
        Ok(Self {
            id,
            name,
            // Validation guarantees both fields are present.
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
            created_at: received_at,
        })
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> ContactId {
        self.id
    }

    /// Optional sender name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sender address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Receipt timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    fn draft(email: Option<&str>, message: Option<&str>) -> ContactDraft {
        ContactDraft {
            name: Some("Ann".to_owned()),
            email: email.map(str::to_owned),
            message: message.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(draft(None, Some("hi")), ContactValidationError::MissingEmail)]
    #[case(draft(Some("   "), Some("hi")), ContactValidationError::MissingEmail)]
    #[case(draft(Some("a@x.com"), None), ContactValidationError::MissingMessage)]
    #[case(draft(Some("a@x.com"), Some("")), ContactValidationError::MissingMessage)]
    fn rejects_blank_required_fields(
        #[case] draft: ContactDraft,
        #[case] expected: ContactValidationError,
    ) {
        let err = draft.validate().expect_err("draft must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn accepts_valid_draft_and_keeps_fields() {
        let received = Utc::now();
        let contact = Contact::from_draft(
            ContactId::random(),
            draft(Some("a@x.com"), Some("hello there")),
            received,
        )
        .expect("valid draft");
        assert_eq!(contact.email(), "a@x.com");
        assert_eq!(contact.message(), "hello there");
        assert_eq!(contact.name(), Some("Ann"));
        assert_eq!(contact.created_at(), received);
    }

    #[test]
    fn omits_absent_name_from_wire_payload() {
        let contact = Contact::from_draft(
            ContactId::random(),
            ContactDraft {
                name: None,
                email: Some("a@x.com".to_owned()),
                message: Some("hi".to_owned()),
            },
            Utc::now(),
        )
        .expect("valid draft");
        let value = serde_json::to_value(&contact).expect("contact serialises");
        assert!(value.get("name").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
