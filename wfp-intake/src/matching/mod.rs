//! Contact matching rules
//!
//! Rules run in configured order and the first decisive answer wins. Each
//! rule scrubs the submitted names, queries the store, and reports a match
//! with a confidence that reflects how it was found: 0.85 for an exact
//! identity hit, 0.80 for a single contact on email alone, 0.75 whenever
//! the picker had to break a tie or the name comparison was approximate.

pub mod email_only;
pub mod name_email;
pub mod picker;

pub use email_only::EmailOnlyRule;
pub use name_email::NameEmailRule;
pub use picker::{ContactPicker, PickPolicy};

use crate::models::{unescape_text, IdentityAttributes, MatchResult};
use crate::store::{CrmStore, StoreResult};
use async_trait::async_trait;

/// Confidence for an exact first/last/email match
pub const CONFIDENCE_EXACT: f32 = 0.85;
/// Confidence when an email maps to exactly one contact
pub const CONFIDENCE_SINGLE_EMAIL: f32 = 0.80;
/// Confidence for picker-selected or near-name matches
pub const CONFIDENCE_PICKED: f32 = 0.75;

/// One strategy for finding an existing contact
#[async_trait]
pub trait MatchingRule: Send + Sync {
    /// Name this rule goes by in configuration
    fn name(&self) -> &'static str;

    /// Look for an existing contact matching `identity`
    async fn match_contact(
        &self,
        store: &dyn CrmStore,
        identity: &IdentityAttributes,
    ) -> StoreResult<MatchResult>;
}

/// Trim and unescape a submitted name before it reaches a query
pub(crate) fn scrub(value: &str) -> String {
    unescape_text(value.trim())
}

/// Build the rule chain from configured rule names
pub fn build_rule_chain(
    names: &[String],
    picker: ContactPicker,
) -> wfp_common::Result<Vec<Box<dyn MatchingRule>>> {
    let mut rules: Vec<Box<dyn MatchingRule>> = Vec::with_capacity(names.len());
    for name in names {
        match name.as_str() {
            name_email::RULE_NAME => rules.push(Box::new(NameEmailRule::new(picker))),
            email_only::RULE_NAME => rules.push(Box::new(EmailOnlyRule::new(picker))),
            other => {
                return Err(wfp_common::Error::Config(format!(
                    "unknown matching rule '{other}'"
                )))
            }
        }
    }
    Ok(rules)
}
