//! Email-only matching rule

use super::{ContactPicker, MatchingRule, CONFIDENCE_PICKED, CONFIDENCE_SINGLE_EMAIL};
use crate::models::{IdentityAttributes, MatchResult};
use crate::store::{CrmStore, StoreResult};
use async_trait::async_trait;

pub const RULE_NAME: &str = "email_only";

/// Matches on the email address alone, ignoring names
pub struct EmailOnlyRule {
    picker: ContactPicker,
}

impl EmailOnlyRule {
    pub fn new(picker: ContactPicker) -> Self {
        Self { picker }
    }
}

#[async_trait]
impl MatchingRule for EmailOnlyRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    async fn match_contact(
        &self,
        store: &dyn CrmStore,
        identity: &IdentityAttributes,
    ) -> StoreResult<MatchResult> {
        let Some(email) = identity
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        else {
            return Ok(MatchResult::no_match());
        };

        let candidates = store
            .contacts_by_email(email, &identity.contact_type)
            .await?;
        match candidates.len() {
            0 => Ok(MatchResult::no_match()),
            1 => Ok(MatchResult::matched(
                candidates[0].id,
                CONFIDENCE_SINGLE_EMAIL,
            )),
            n => {
                tracing::debug!(candidates = n, "email shared by several contacts, picking one");
                match self.picker.pick(&candidates) {
                    Some(id) => Ok(MatchResult::matched(id, CONFIDENCE_PICKED)),
                    None => Ok(MatchResult::no_match()),
                }
            }
        }
    }
}
