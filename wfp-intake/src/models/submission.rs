//! Inbound webform submission shape
//!
//! Submissions arrive as a field-keyed record: a webform title plus a list
//! of `{field_key, field_value: [..]}` entries. Only the first value of an
//! entry is meaningful for the petition fields; multi-value entries exist
//! for other form element types.

use serde::{Deserialize, Serialize};

/// Routing key naming the handler that processes this submission
pub const FIELD_PROCESSING_CLASS: &str = "processing_class";

pub const FIELD_FIRST_NAME: &str = "petition_first_name";
pub const FIELD_LAST_NAME: &str = "petition_last_name";
pub const FIELD_EMAIL: &str = "petition_email";
pub const FIELD_BIRTH_DATE: &str = "petition_birth_date";
pub const FIELD_CAMPAIGN_ID: &str = "petition_campaign_id";
pub const FIELD_KEEP_INFORMED: &str = "petition_keep_me_informed";
pub const FIELD_GROUP_IDS: &str = "petition_group_ids";

/// One submitted form field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionField {
    pub field_key: String,
    #[serde(default)]
    pub field_value: Vec<String>,
}

/// Raw webform submission as posted by the form transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebformSubmission {
    #[serde(default)]
    pub webform_title: String,
    #[serde(default)]
    pub data: Vec<SubmissionField>,
}

impl WebformSubmission {
    /// Whether the form declared `key` at all (even with no value)
    pub fn has_field(&self, key: &str) -> bool {
        self.data.iter().any(|f| f.field_key == key)
    }

    /// First value of `key`, if declared and non-empty
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|f| f.field_key == key)
            .and_then(|f| f.field_value.first())
            .map(|v| v.as_str())
    }

    /// Routing value declared by the form, if any
    pub fn processing_class(&self) -> Option<&str> {
        self.first_value(FIELD_PROCESSING_CLASS)
    }
}

/// Petition fields after validation, trimmed but otherwise raw
///
/// Optional fields keep their submitted form; interpretation (birth date
/// parsing, opt-in truthiness, group id splitting) happens where the
/// value is consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct PetitionFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: Option<String>,
    pub campaign_ref: String,
    pub keep_informed: Option<String>,
    pub group_selection: Option<String>,
}

impl PetitionFields {
    /// Consent flag: `1`, `true`, `yes`, `on` (case-insensitive) opt in;
    /// everything else, including an absent field, opts out.
    pub fn opt_in(&self) -> bool {
        match &self.keep_informed {
            Some(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, value: &str) -> SubmissionField {
        SubmissionField {
            field_key: key.to_string(),
            field_value: vec![value.to_string()],
        }
    }

    #[test]
    fn first_value_finds_declared_field() {
        let submission = WebformSubmission {
            webform_title: "Petition".to_string(),
            data: vec![field(FIELD_EMAIL, "ann@example.org")],
        };
        assert_eq!(submission.first_value(FIELD_EMAIL), Some("ann@example.org"));
        assert_eq!(submission.first_value(FIELD_FIRST_NAME), None);
    }

    #[test]
    fn declared_but_valueless_field_is_detected() {
        let submission = WebformSubmission {
            webform_title: "Petition".to_string(),
            data: vec![SubmissionField {
                field_key: FIELD_EMAIL.to_string(),
                field_value: vec![],
            }],
        };
        assert!(submission.has_field(FIELD_EMAIL));
        assert_eq!(submission.first_value(FIELD_EMAIL), None);
    }

    #[test]
    fn opt_in_truthiness() {
        let mut fields = PetitionFields {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.org".to_string(),
            birth_date: None,
            campaign_ref: "42".to_string(),
            keep_informed: None,
            group_selection: None,
        };
        assert!(!fields.opt_in());

        for yes in ["1", "true", "Yes", "ON", " yes "] {
            fields.keep_informed = Some(yes.to_string());
            assert!(fields.opt_in(), "{yes:?} should opt in");
        }
        for no in ["0", "false", "no", "", "maybe"] {
            fields.keep_informed = Some(no.to_string());
            assert!(!fields.opt_in(), "{no:?} should opt out");
        }
    }
}
