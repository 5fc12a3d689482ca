//! Engagement recording
//!
//! Writes the petition activity and maintains group membership for a
//! resolved contact. Every operation here is best-effort: a store failure
//! is logged and reported in the outcome, never raised, so one failed
//! write cannot take down the rest of the submission.

use crate::models::{ActivityOutcome, CampaignId, ContactId, GroupId};
use crate::services::ReferenceConfig;
use crate::store::{CrmStore, NewActivity};
use chrono::Utc;
use std::sync::Arc;

/// Records activities and group membership against the store
pub struct EngagementRecorder {
    store: Arc<dyn CrmStore>,
    refs: Arc<ReferenceConfig>,
}

impl EngagementRecorder {
    pub fn new(store: Arc<dyn CrmStore>, refs: Arc<ReferenceConfig>) -> Self {
        Self { store, refs }
    }

    /// Record the petition activity for a contact, once
    ///
    /// An equivalent current activity already in the store suppresses the
    /// write. Unresolved reference ids skip the write entirely rather than
    /// produce a half-formed activity.
    pub async fn record_activity(
        &self,
        target_contact_id: ContactId,
        campaign_id: Option<CampaignId>,
        subject: Option<String>,
    ) -> ActivityOutcome {
        let Some(status_id) = self.refs.activity_status_id else {
            tracing::warn!(
                contact_id = target_contact_id,
                "activity status unresolved, activity not recorded"
            );
            return ActivityOutcome::Skipped;
        };
        if self.refs.activity_type_id <= 0 || target_contact_id <= 0 {
            tracing::warn!(
                activity_type_id = self.refs.activity_type_id,
                contact_id = target_contact_id,
                "incomplete activity parameters, activity not recorded"
            );
            return ActivityOutcome::Skipped;
        }

        let activity = NewActivity {
            activity_type_id: self.refs.activity_type_id,
            status_id: Some(status_id),
            source_contact_id: self.refs.organization_contact_id,
            target_contact_id,
            campaign_id,
            subject,
            activity_date_time: Utc::now(),
        };

        match self.store.count_matching_activities(&activity.key()).await {
            Ok(0) => {}
            Ok(_) => {
                tracing::info!(
                    contact_id = target_contact_id,
                    campaign_id = ?campaign_id,
                    "activity already exists, not duplicated"
                );
                return ActivityOutcome::Duplicate;
            }
            Err(err) => {
                tracing::error!(error = %err, "duplicate check failed, activity not recorded");
                return ActivityOutcome::Skipped;
            }
        }

        match self.store.create_activity(&activity).await {
            Ok(activity_id) => {
                tracing::info!(
                    activity_id,
                    contact_id = target_contact_id,
                    campaign_id = ?campaign_id,
                    "petition activity recorded"
                );
                ActivityOutcome::Created(activity_id)
            }
            Err(err) => {
                tracing::error!(error = %err, "activity creation failed");
                ActivityOutcome::Skipped
            }
        }
    }

    /// Add a contact to a group; `true` when the membership write went through
    pub async fn add_to_group(&self, group_id: GroupId, contact_id: ContactId) -> bool {
        if group_id <= 0 || contact_id <= 0 {
            tracing::warn!(group_id, contact_id, "unresolved id, group add skipped");
            return false;
        }
        match self.store.add_contact_to_group(group_id, contact_id).await {
            Ok(()) => {
                tracing::debug!(group_id, contact_id, "contact added to group");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, group_id, contact_id, "group add failed");
                false
            }
        }
    }

    /// Remove a contact from a group; removing a non-member still succeeds
    pub async fn remove_from_group(&self, group_id: GroupId, contact_id: ContactId) -> bool {
        if group_id <= 0 || contact_id <= 0 {
            tracing::warn!(group_id, contact_id, "unresolved id, group remove skipped");
            return false;
        }
        match self
            .store
            .remove_contact_from_group(group_id, contact_id)
            .await
        {
            Ok(()) => {
                tracing::debug!(group_id, contact_id, "contact removed from group");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, group_id, contact_id, "group remove failed");
                false
            }
        }
    }
}
