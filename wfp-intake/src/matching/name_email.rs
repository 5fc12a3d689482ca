//! First/last name plus email matching rule
//!
//! Two phases. The exact phase queries on all of first name, last name,
//! and email; a single hit is the strongest signal this service produces.
//! Anything else drops to the near-name phase: fetch every contact holding
//! the email and keep those whose names differ from the submission by at
//! most two positional characters.

use super::{scrub, ContactPicker, MatchingRule, CONFIDENCE_EXACT, CONFIDENCE_PICKED};
use crate::models::{IdentityAttributes, MatchResult};
use crate::store::{ContactCandidate, CrmStore, StoreResult};
use async_trait::async_trait;

pub const RULE_NAME: &str = "first_last_name_email";

/// Positional character differences tolerated per name field
const NEAR_NAME_LIMIT: usize = 2;

/// Matches on first name, last name, and email, with a near-name fallback
pub struct NameEmailRule {
    picker: ContactPicker,
}

impl NameEmailRule {
    pub fn new(picker: ContactPicker) -> Self {
        Self { picker }
    }
}

/// Count positional character differences over the shared prefix.
///
/// Characters past the shorter name's length are not counted, so "Ann"
/// and "Anne" compare as zero differences. This mirrors how near-name
/// matching has always behaved in this pipeline; tightening it would
/// change which historical contacts deduplicate.
fn name_distance(stored: &str, submitted: &str) -> usize {
    let shorter = stored.chars().count().min(submitted.chars().count());
    let a: String = stored.chars().take(shorter).collect();
    let b: String = submitted.chars().take(shorter).collect();
    strsim::hamming(&a, &b).unwrap_or(usize::MAX)
}

fn near(candidate: &ContactCandidate, first: &str, last: &str) -> bool {
    name_distance(candidate.first_name.as_deref().unwrap_or(""), first) <= NEAR_NAME_LIMIT
        && name_distance(candidate.last_name.as_deref().unwrap_or(""), last) <= NEAR_NAME_LIMIT
}

#[async_trait]
impl MatchingRule for NameEmailRule {
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

        let first = scrub(identity.first_name.as_deref().unwrap_or(""));
        let last = scrub(identity.last_name.as_deref().unwrap_or(""));

        let exact = store
            .contacts_by_name_and_email(&first, &last, email, &identity.contact_type)
            .await?;
        if exact.len() == 1 {
            return Ok(MatchResult::matched(exact[0].id, CONFIDENCE_EXACT));
        }

        // Zero or several exact hits: widen to everyone holding the email
        // and compare names approximately.
        let candidates = store
            .contacts_by_email(email, &identity.contact_type)
            .await?;
        let close: Vec<ContactCandidate> = candidates
            .into_iter()
            .filter(|c| near(c, &first, &last))
            .collect();

        match close.len() {
            0 => Ok(MatchResult::no_match()),
            1 => Ok(MatchResult::matched(close[0].id, CONFIDENCE_PICKED)),
            n => {
                tracing::debug!(candidates = n, "several near-name contacts, picking one");
                match self.picker.pick(&close) {
                    Some(id) => Ok(MatchResult::matched(id, CONFIDENCE_PICKED)),
                    None => Ok(MatchResult::no_match()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::PickPolicy;
    use crate::store::SqliteStore;

    #[test]
    fn name_distance_counts_prefix_differences() {
        assert_eq!(name_distance("Ann", "Ann"), 0);
        assert_eq!(name_distance("Ann", "Anne"), 0);
        assert_eq!(name_distance("Anna", "Anne"), 1);
        assert_eq!(name_distance("Bob", "Ann"), 3);
        assert_eq!(name_distance("", "Ann"), 0);
    }

    async fn seeded_store(rows: &[(&str, &str, &str)]) -> SqliteStore {
        let pool = wfp_common::db::open_memory_pool().await.unwrap();
        crate::db::create_schema(&pool).await.unwrap();
        for &(first, last, email) in rows {
            sqlx::query(
                "INSERT INTO contacts (contact_type, first_name, last_name, email)
                 VALUES ('Individual', ?1, ?2, ?3)",
            )
            .bind(first)
            .bind(last)
            .bind(email)
            .execute(&pool)
            .await
            .unwrap();
        }
        SqliteStore::new(pool)
    }

    fn identity(first: &str, last: &str, email: &str) -> IdentityAttributes {
        IdentityAttributes {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            email: Some(email.to_string()),
            ..IdentityAttributes::default()
        }
    }

    #[tokio::test]
    async fn exact_hit_matches_at_point_eighty_five() {
        let store = seeded_store(&[("Ann", "Lee", "ann.lee@example.org")]).await;
        let rule = NameEmailRule::new(ContactPicker::default());
        let result = rule
            .match_contact(&store, &identity("Ann", "Lee", "ann.lee@example.org"))
            .await
            .unwrap();
        assert_eq!(result.contact_id, Some(1));
        assert_eq!(result.confidence, CONFIDENCE_EXACT);
    }

    #[tokio::test]
    async fn escaped_name_still_hits_exactly() {
        let store = seeded_store(&[("Ann", "O'Brien", "ann@example.org")]).await;
        let rule = NameEmailRule::new(ContactPicker::default());
        let result = rule
            .match_contact(&store, &identity("Ann", "O\\'Brien", "ann@example.org"))
            .await
            .unwrap();
        assert_eq!(result.confidence, CONFIDENCE_EXACT);
    }

    #[tokio::test]
    async fn near_name_matches_at_point_seventy_five() {
        let store = seeded_store(&[("Anna", "Lee", "ann.lee@example.org")]).await;
        let rule = NameEmailRule::new(ContactPicker::default());
        let result = rule
            .match_contact(&store, &identity("Anne", "Lee", "ann.lee@example.org"))
            .await
            .unwrap();
        assert_eq!(result.contact_id, Some(1));
        assert_eq!(result.confidence, CONFIDENCE_PICKED);
    }

    #[tokio::test]
    async fn distant_name_is_no_match() {
        let store = seeded_store(&[("Robert", "King", "shared@example.org")]).await;
        let rule = NameEmailRule::new(ContactPicker::default());
        let result = rule
            .match_contact(&store, &identity("Ann", "Lee", "shared@example.org"))
            .await
            .unwrap();
        assert!(!result.is_match());
    }

    #[tokio::test]
    async fn duplicate_exact_rows_defer_to_picker() {
        let store = seeded_store(&[
            ("Ann", "Lee", "ann.lee@example.org"),
            ("Ann", "Lee", "ann.lee@example.org"),
        ])
        .await;
        let rule = NameEmailRule::new(ContactPicker::new(PickPolicy::LowestId));
        let result = rule
            .match_contact(&store, &identity("Ann", "Lee", "ann.lee@example.org"))
            .await
            .unwrap();
        assert_eq!(result.contact_id, Some(1));
        assert_eq!(result.confidence, CONFIDENCE_PICKED);
    }

    #[tokio::test]
    async fn missing_email_is_no_match() {
        let store = seeded_store(&[("Ann", "Lee", "ann.lee@example.org")]).await;
        let rule = NameEmailRule::new(ContactPicker::default());
        let mut id = identity("Ann", "Lee", "ignored");
        id.email = None;
        let result = rule.match_contact(&store, &id).await.unwrap();
        assert!(!result.is_match());
    }
}
