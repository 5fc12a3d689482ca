//! SQLite-backed store
//!
//! Thin façade over the `db` query modules; each trait method delegates to
//! the matching free function and lets `sqlx::Error` convert into
//! `StoreError::Query`.

use super::{ActivityKey, ContactCandidate, CrmStore, NewActivity, StoreResult};
use crate::db;
use crate::models::{ActivityId, CampaignId, ContactId, GroupId, IdentityAttributes};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// CRM store backed by the local SQLite database
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CrmStore for SqliteStore {
    async fn contacts_by_email(
        &self,
        email: &str,
        contact_type: &str,
    ) -> StoreResult<Vec<ContactCandidate>> {
        Ok(db::contacts::by_email(&self.pool, email, contact_type).await?)
    }

    async fn contacts_by_name_and_email(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        contact_type: &str,
    ) -> StoreResult<Vec<ContactCandidate>> {
        Ok(db::contacts::by_name_and_email(
            &self.pool, first_name, last_name, email, contact_type,
        )
        .await?)
    }

    async fn create_contact(&self, identity: &IdentityAttributes) -> StoreResult<ContactId> {
        Ok(db::contacts::create(&self.pool, identity).await?)
    }

    async fn find_option_value(
        &self,
        option_group: &str,
        name: &str,
    ) -> StoreResult<Option<i64>> {
        Ok(db::option_values::find(&self.pool, option_group, name).await?)
    }

    async fn create_option_value(
        &self,
        option_group: &str,
        name: &str,
        label: &str,
        description: &str,
    ) -> StoreResult<i64> {
        Ok(db::option_values::create(&self.pool, option_group, name, label, description).await?)
    }

    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<GroupId>> {
        Ok(db::groups::find_by_name(&self.pool, name).await?)
    }

    async fn create_group(
        &self,
        name: &str,
        title: &str,
        description: &str,
    ) -> StoreResult<GroupId> {
        Ok(db::groups::create(&self.pool, name, title, description).await?)
    }

    async fn find_organization_contact(
        &self,
        legal_name: &str,
    ) -> StoreResult<Option<ContactId>> {
        Ok(db::contacts::find_organization(&self.pool, legal_name).await?)
    }

    async fn create_organization_contact(&self, legal_name: &str) -> StoreResult<ContactId> {
        Ok(db::contacts::create_organization(&self.pool, legal_name).await?)
    }

    async fn count_matching_activities(&self, key: &ActivityKey) -> StoreResult<u64> {
        Ok(db::activities::count_matching(&self.pool, key).await?)
    }

    async fn create_activity(&self, activity: &NewActivity) -> StoreResult<ActivityId> {
        Ok(db::activities::create(&self.pool, activity).await?)
    }

    async fn add_contact_to_group(
        &self,
        group_id: GroupId,
        contact_id: ContactId,
    ) -> StoreResult<()> {
        Ok(db::groups::add_member(&self.pool, group_id, contact_id).await?)
    }

    async fn remove_contact_from_group(
        &self,
        group_id: GroupId,
        contact_id: ContactId,
    ) -> StoreResult<()> {
        Ok(db::groups::remove_member(&self.pool, group_id, contact_id).await?)
    }

    async fn campaign_title(&self, campaign_id: CampaignId) -> StoreResult<Option<String>> {
        Ok(db::campaigns::title(&self.pool, campaign_id).await?)
    }
}
