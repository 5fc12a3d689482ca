//! Contact resolution
//!
//! Runs the configured matching rules in order; the first rule that finds
//! a contact settles the question. When every rule comes back empty a new
//! contact is created from the submitted identity, which is by definition
//! a perfect match for itself.

use crate::matching::MatchingRule;
use crate::models::{ContactId, IdentityAttributes};
use crate::store::{CrmStore, StoreResult};

/// How a submission was tied to a contact record
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContact {
    pub contact_id: ContactId,
    pub confidence: f32,
    /// Name of the rule that matched; `None` when the contact was created
    pub matched_by: Option<&'static str>,
    pub created: bool,
}

/// Orchestrates the matching rule chain
pub struct ContactResolver {
    rules: Vec<Box<dyn MatchingRule>>,
}

impl ContactResolver {
    pub fn new(rules: Vec<Box<dyn MatchingRule>>) -> Self {
        Self { rules }
    }

    /// Find an existing contact for `identity`, or create one
    ///
    /// Store failures inside any rule abort resolution; a rule that merely
    /// finds nobody passes the question to the next rule.
    pub async fn resolve_or_create(
        &self,
        store: &dyn CrmStore,
        identity: &IdentityAttributes,
    ) -> StoreResult<ResolvedContact> {
        for rule in &self.rules {
            let result = rule.match_contact(store, identity).await?;
            if let Some(contact_id) = result.contact_id {
                tracing::info!(
                    contact_id,
                    rule = rule.name(),
                    confidence = result.confidence,
                    "matched existing contact"
                );
                return Ok(ResolvedContact {
                    contact_id,
                    confidence: result.confidence,
                    matched_by: Some(rule.name()),
                    created: false,
                });
            }
            tracing::debug!(rule = rule.name(), "rule found no contact");
        }

        let contact_id = store.create_contact(identity).await?;
        tracing::info!(contact_id, "no rule matched, created new contact");
        Ok(ResolvedContact {
            contact_id,
            confidence: 1.0,
            matched_by: None,
            created: true,
        })
    }
}
