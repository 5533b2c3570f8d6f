//! Admissions application data model.
//!
//! An application is a bag of applicant-supplied fields plus server-assigned
//! identity and timestamps. Only four fields are mandatory; the rest mirror
//! the admissions form and stay optional. Duplicate submissions are detected
//! by the (email, id number) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
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

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ApplicationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Applicant-supplied form fields.
///
/// All fields are optional at this layer; required-field enforcement happens
/// in [`ApplicationDetails::missing_required_fields`] so a rejection can name
/// every absent field at once. Wire names are camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub high_school: Option<String>,
    pub grades: Option<String>,
    pub course: Option<String>,
    pub message: Option<String>,
    pub id_number: Option<String>,
    pub index_number: Option<String>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub district: Option<String>,
    pub sector: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_name: Option<String>,
    pub disability: Option<String>,
    pub completion_year: Option<String>,
    pub other_course: Option<String>,
    pub cell: Option<String>,
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

impl ApplicationDetails {
    /// Names of required fields that are absent or blank, in wire-name form.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ApplicationDetails;
    ///
    /// let details = ApplicationDetails {
    ///     email: Some("a@x.com".into()),
    ///     ..ApplicationDetails::default()
    /// };
    /// assert_eq!(
    ///     details.missing_required_fields(),
    ///     vec!["idNumber", "name", "phone"]
    /// );
    /// ```
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("email", &self.email),
            ("idNumber", &self.id_number),
            ("name", &self.name),
            ("phone", &self.phone),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| is_blank(value.as_ref()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Duplicate-detection key, present once email and id number are set.
    #[must_use]
    pub fn dedup_key(&self) -> Option<DedupKey> {
        match (self.email.as_deref(), self.id_number.as_deref()) {
            (Some(email), Some(id_number)) => DedupKey::new(email, id_number),
            _ => None,
        }
    }

    /// Overlay the provided fields onto this record; absent fields keep
    /// their current value.
    pub fn merge(&mut self, update: Self) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = update.$field {
                    self.$field = Some(value);
                })*
            };
        }
        overlay!(
            name,
            email,
            phone,
            dob,
            gender,
            address,
            high_school,
            grades,
            course,
            message,
            id_number,
            index_number,
            nationality,
            country,
            district,
            sector,
            father_name,
            mother_name,
            guardian_name,
            disability,
            completion_year,
            other_course,
            cell,
        );
    }
}

/// Duplicate-detection key over the (email, id number) pair.
///
/// Values are trimmed so accidental whitespace does not defeat detection.
/// Blank components yield no key, matching stores that skip missing values
/// in sparse unique indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    email: String,
    id_number: String,
}

impl DedupKey {
    /// Build a key from raw field values. Returns `None` when either
    /// component is blank.
    #[must_use]
    pub fn new(email: &str, id_number: &str) -> Option<Self> {
        let email = email.trim();
        let id_number = id_number.trim();
        if email.is_empty() || id_number.is_empty() {
            return None;
        }
        Some(Self {
            email: email.to_owned(),
            id_number: id_number.to_owned(),
        })
    }

    /// Email component of the key.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Id-number component of the key.
    #[must_use]
    pub fn id_number(&self) -> &str {
        self.id_number.as_str()
    }
}

/// A stored admissions application.
///
/// ## Invariants
/// - At most one stored application exists per [`DedupKey`].
/// - `updated_at` never precedes `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    id: ApplicationId,
    #[serde(flatten)]
    details: ApplicationDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Application {
    /// Build a new application stamped with the submission time.
    #[must_use]
    pub fn new(id: ApplicationId, details: ApplicationDetails, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at: submitted_at,
            updated_at: submitted_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Applicant-supplied fields.
    #[must_use]
    pub const fn details(&self) -> &ApplicationDetails {
        &self.details
    }

    /// Submission timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Duplicate-detection key of the stored record, when derivable.
    #[must_use]
    pub fn dedup_key(&self) -> Option<DedupKey> {
        self.details.dedup_key()
    }

    /// Overlay updated fields and refresh the mutation timestamp.
    pub fn apply_update(&mut self, fields: ApplicationDetails, updated_at: DateTime<Utc>) {
        self.details.merge(fields);
        self.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    fn complete_details() -> ApplicationDetails {
        ApplicationDetails {
            name: Some("Ann".to_owned()),
            email: Some("a@x.com".to_owned()),
            phone: Some("123".to_owned()),
            id_number: Some("ID1".to_owned()),
            course: Some("Software Engineering".to_owned()),
            ..ApplicationDetails::default()
        }
    }

    #[test]
    fn complete_submission_has_no_missing_fields() {
        assert!(complete_details().missing_required_fields().is_empty());
    }

    #[rstest]
    #[case(ApplicationDetails::default(), vec!["email", "idNumber", "name", "phone"])]
    #[case(
        ApplicationDetails { email: Some("  ".to_owned()), ..complete_details() },
        vec!["email"]
    )]
    #[case(
        ApplicationDetails { phone: None, id_number: None, ..complete_details() },
        vec!["idNumber", "phone"]
    )]
    fn blank_required_fields_are_reported(
        #[case] details: ApplicationDetails,
        #[case] expected: Vec<&'static str>,
    ) {
        assert_eq!(details.missing_required_fields(), expected);
    }

    #[test]
    fn dedup_key_trims_components() {
        let details = ApplicationDetails {
            email: Some(" a@x.com ".to_owned()),
            id_number: Some("ID1".to_owned()),
            ..ApplicationDetails::default()
        };
        let key = details.dedup_key().expect("key derivable");
        assert_eq!(key.email(), "a@x.com");
        assert_eq!(key.id_number(), "ID1");
    }

    #[test]
    fn dedup_key_requires_both_components() {
        let details = ApplicationDetails {
            email: Some("a@x.com".to_owned()),
            ..ApplicationDetails::default()
        };
        assert!(details.dedup_key().is_none());
        assert!(DedupKey::new("a@x.com", "   ").is_none());
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let mut details = complete_details();
        details.merge(ApplicationDetails {
            course: Some("Networking".to_owned()),
            ..ApplicationDetails::default()
        });
        assert_eq!(details.course.as_deref(), Some("Networking"));
        assert_eq!(details.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn apply_update_refreshes_timestamp_only_forward() {
        let submitted = Utc::now();
        let mut application = Application::new(ApplicationId::random(), complete_details(), submitted);
        let later = submitted + chrono::TimeDelta::seconds(5);
        application.apply_update(
            ApplicationDetails {
                grades: Some("A".to_owned()),
                ..ApplicationDetails::default()
            },
            later,
        );
        assert_eq!(application.created_at(), submitted);
        assert_eq!(application.updated_at(), later);
        assert_eq!(application.details().grades.as_deref(), Some("A"));
    }

    #[test]
    fn serialises_camel_case_wire_names() {
        let application = Application::new(
            ApplicationId::random(),
            ApplicationDetails {
                high_school: Some("GS Kigali".to_owned()),
                ..complete_details()
            },
            Utc::now(),
        );
        let value = serde_json::to_value(&application).expect("application serialises");
        assert_eq!(
            value.get("highSchool").and_then(serde_json::Value::as_str),
            Some("GS Kigali")
        );
        assert_eq!(
            value.get("idNumber").and_then(serde_json::Value::as_str),
            Some("ID1")
        );
        assert!(value.get("createdAt").is_some());
    }
}
