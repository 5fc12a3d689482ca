//! Narrow interface to the CRM storage engine
//!
//! The pipeline never owns contact, activity, group, or campaign state; it
//! consults and mutates the store through this trait. Lookups return
//! `Ok(None)` for the expected not-found case; only genuine operation
//! failures surface as `StoreError`, and those are caught and logged at
//! the boundary where they occur.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::models::{ActivityId, CampaignId, ContactId, GroupId, IdentityAttributes};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Store operation failure
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query or write failed inside the storage engine
    #[error("storage query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// Store unreachable or refusing operations
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Contact row as seen by the matching rules and the picker
///
/// Timestamps stay in the store's `YYYY-MM-DD HH:MM:SS` text form; that
/// form orders lexicographically, which is all the picker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactCandidate {
    pub id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub modified_at: Option<String>,
}

impl ContactCandidate {
    /// Number of populated identity fields, for the most-complete policy
    pub fn completeness(&self) -> usize {
        [&self.first_name, &self.last_name, &self.birth_date]
            .iter()
            .filter(|v| v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false))
            .count()
    }
}

/// Activity to be written for a resolved contact
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub activity_type_id: i64,
    /// None when the status reference never resolved; the required-field
    /// guard rejects such activities before any write
    pub status_id: Option<i64>,
    pub source_contact_id: ContactId,
    pub target_contact_id: ContactId,
    pub campaign_id: Option<CampaignId>,
    pub subject: Option<String>,
    pub activity_date_time: DateTime<Utc>,
}

impl NewActivity {
    /// Idempotence key: the tuple that must stay unique among current,
    /// non-deleted, non-test activities
    pub fn key(&self) -> ActivityKey {
        ActivityKey {
            activity_type_id: self.activity_type_id,
            campaign_id: self.campaign_id,
            source_contact_id: self.source_contact_id,
            target_contact_id: self.target_contact_id,
        }
    }
}

/// Existence-check key for the duplicate-activity guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityKey {
    pub activity_type_id: i64,
    pub campaign_id: Option<CampaignId>,
    pub source_contact_id: ContactId,
    pub target_contact_id: ContactId,
}

/// External collaborator operations the intake core depends on
#[async_trait]
pub trait CrmStore: Send + Sync {
    /// All contacts holding `email` with the given contact type
    async fn contacts_by_email(
        &self,
        email: &str,
        contact_type: &str,
    ) -> StoreResult<Vec<ContactCandidate>>;

    /// Contacts matching the exact four-field identity
    async fn contacts_by_name_and_email(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        contact_type: &str,
    ) -> StoreResult<Vec<ContactCandidate>>;

    /// Create a contact from the submitted identity
    async fn create_contact(&self, identity: &IdentityAttributes) -> StoreResult<ContactId>;

    /// Reference metadata lookup by `(option group, name)`
    async fn find_option_value(&self, option_group: &str, name: &str)
        -> StoreResult<Option<i64>>;

    /// Provision a missing reference metadata value
    async fn create_option_value(
        &self,
        option_group: &str,
        name: &str,
        label: &str,
        description: &str,
    ) -> StoreResult<i64>;

    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<GroupId>>;

    async fn create_group(
        &self,
        name: &str,
        title: &str,
        description: &str,
    ) -> StoreResult<GroupId>;

    /// Organization contact by legal name
    async fn find_organization_contact(&self, legal_name: &str)
        -> StoreResult<Option<ContactId>>;

    async fn create_organization_contact(&self, legal_name: &str) -> StoreResult<ContactId>;

    /// Current, non-deleted, non-test activities matching `key`
    async fn count_matching_activities(&self, key: &ActivityKey) -> StoreResult<u64>;

    async fn create_activity(&self, activity: &NewActivity) -> StoreResult<ActivityId>;

    /// Idempotent membership add
    async fn add_contact_to_group(
        &self,
        group_id: GroupId,
        contact_id: ContactId,
    ) -> StoreResult<()>;

    /// Membership remove; removing a non-member is a no-op
    async fn remove_contact_from_group(
        &self,
        group_id: GroupId,
        contact_id: ContactId,
    ) -> StoreResult<()>;

    /// Campaign title, `None` when the campaign does not exist
    async fn campaign_title(&self, campaign_id: CampaignId) -> StoreResult<Option<String>>;
}
