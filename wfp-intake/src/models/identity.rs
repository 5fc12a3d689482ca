//! Identity attributes and match results
//!
//! The identity record is what the matching rules compare against the
//! contact store. All free-text fields are trimmed and unescaped before
//! comparison; a rule never mutates the caller's identity.

use chrono::NaiveDate;

/// Contact record id in the external store
pub type ContactId = i64;
/// Group record id
pub type GroupId = i64;
/// Activity record id
pub type ActivityId = i64;
/// Campaign record id
pub type CampaignId = i64;

/// Contact type used when a submission does not declare one
pub const DEFAULT_CONTACT_TYPE: &str = "Individual";

/// Normalized identity attributes extracted from a submission
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityAttributes {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub contact_type: String,
}

impl Default for IdentityAttributes {
    fn default() -> Self {
        Self {
            first_name: None,
            last_name: None,
            email: None,
            birth_date: None,
            contact_type: DEFAULT_CONTACT_TYPE.to_string(),
        }
    }
}

/// Outcome of one matching rule invocation
///
/// `contact_id: None` with confidence 0.0 is the no-match sentinel, an
/// expected result rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub contact_id: Option<ContactId>,
    pub confidence: f32,
}

impl MatchResult {
    /// The no-match sentinel
    pub fn no_match() -> Self {
        Self {
            contact_id: None,
            confidence: 0.0,
        }
    }

    pub fn matched(contact_id: ContactId, confidence: f32) -> Self {
        Self {
            contact_id: Some(contact_id),
            confidence,
        }
    }

    pub fn is_match(&self) -> bool {
        self.contact_id.is_some()
    }
}

/// Strip backslash escaping from submitted text
///
/// Web layers that escape quotes on the way in leave `\'` and `\\` in
/// free-text fields; comparisons run on the unescaped form.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a submitted birth date
///
/// Accepts ISO (`1990-04-21`) plus the two day-first forms webforms
/// commonly send (`21-04-1990`, `21/04/1990`). Anything else is `None`;
/// the caller decides whether that is worth a warning.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_strips_backslashes() {
        assert_eq!(unescape_text(r"O\'Brien"), "O'Brien");
        assert_eq!(unescape_text(r"back\\slash"), r"back\slash");
        assert_eq!(unescape_text("plain"), "plain");
    }

    #[test]
    fn unescape_keeps_trailing_backslash() {
        assert_eq!(unescape_text(r"ends\"), r"ends\");
    }

    #[test]
    fn birth_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(1990, 4, 21).unwrap();
        assert_eq!(parse_birth_date("1990-04-21"), Some(expected));
        assert_eq!(parse_birth_date("21-04-1990"), Some(expected));
        assert_eq!(parse_birth_date("21/04/1990"), Some(expected));
    }

    #[test]
    fn birth_date_rejects_garbage() {
        assert_eq!(parse_birth_date("soon"), None);
        assert_eq!(parse_birth_date(""), None);
        assert_eq!(parse_birth_date("1990-13-45"), None);
    }

    #[test]
    fn no_match_sentinel() {
        let result = MatchResult::no_match();
        assert!(!result.is_match());
        assert_eq!(result.confidence, 0.0);
    }
}
