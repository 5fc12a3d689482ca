//! Petition submission validator
//!
//! Checks the mandatory fields and the email shape before any store
//! traffic happens. A failed validation is a rejection of the submission,
//! never a pipeline error; callers log it and answer the transport
//! normally.

use crate::models::{
    PetitionFields, WebformSubmission, FIELD_BIRTH_DATE, FIELD_CAMPAIGN_ID, FIELD_EMAIL,
    FIELD_FIRST_NAME, FIELD_GROUP_IDS, FIELD_KEEP_INFORMED, FIELD_LAST_NAME,
};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Why a submission was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("mandatory field '{0}' is missing")]
    MissingField(String),

    #[error("mandatory field '{0}' is empty")]
    EmptyField(String),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

// WHATWG HTML5 input[type=email] pattern.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

fn mandatory<'a>(
    submission: &'a WebformSubmission,
    key: &str,
) -> Result<&'a str, ValidationFailure> {
    let value = submission
        .first_value(key)
        .ok_or_else(|| ValidationFailure::MissingField(key.to_string()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationFailure::EmptyField(key.to_string()));
    }
    Ok(value)
}

/// Validate a petition submission and extract its fields
pub fn validate(submission: &WebformSubmission) -> Result<PetitionFields, ValidationFailure> {
    let first_name = mandatory(submission, FIELD_FIRST_NAME)?;
    let last_name = mandatory(submission, FIELD_LAST_NAME)?;
    let email = mandatory(submission, FIELD_EMAIL)?;
    let campaign_ref = mandatory(submission, FIELD_CAMPAIGN_ID)?;

    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationFailure::InvalidEmail(email.to_string()));
    }

    let optional = |key: &str| {
        submission
            .first_value(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Ok(PetitionFields {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        birth_date: optional(FIELD_BIRTH_DATE),
        campaign_ref: campaign_ref.to_string(),
        keep_informed: optional(FIELD_KEEP_INFORMED),
        group_selection: optional(FIELD_GROUP_IDS),
    })
}
