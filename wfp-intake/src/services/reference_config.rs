//! Reference record bootstrap
//!
//! The pipeline leans on a handful of records that must exist in the
//! store before any submission is processed: the petition activity type,
//! the default signer group, and the organization contact that authors
//! activities. Resolution runs once at startup; a mandatory reference
//! that cannot be found or created keeps the service from starting. The
//! activity status is the one optional reference: when it is absent the
//! recorder skips activity writes instead.

use crate::models::{ContactId, GroupId};
use crate::store::{CrmStore, StoreError};
use wfp_common::{Error, Result};

pub const ACTIVITY_TYPE_GROUP: &str = "activity_type";
pub const ACTIVITY_TYPE_NAME: &str = "petition_signed";
const ACTIVITY_TYPE_LABEL: &str = "Petition Signed";
const ACTIVITY_TYPE_DESCRIPTION: &str = "Activity Type used when petition form signed";

pub const ACTIVITY_STATUS_GROUP: &str = "activity_status";
pub const ACTIVITY_STATUS_NAME: &str = "Completed";

pub const SIGNER_GROUP_NAME: &str = "petition_form_signed";
const SIGNER_GROUP_TITLE: &str = "Petition Form Signed";
const SIGNER_GROUP_DESCRIPTION: &str =
    "Group of contact that signed a petition form and were not deduplicated yet";

/// Resolved ids of the reference records the pipeline depends on
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    pub activity_type_id: i64,
    /// `None` when the completed status is absent from the store
    pub activity_status_id: Option<i64>,
    pub organization_contact_id: ContactId,
    pub default_group_id: GroupId,
}

fn fatal(what: &str, err: StoreError) -> Error {
    Error::Internal(format!("resolving {what} failed: {err}"))
}

impl ReferenceConfig {
    /// Resolve every reference record, creating the missing mandatory ones
    pub async fn resolve(store: &dyn CrmStore, organization_name: &str) -> Result<Self> {
        let activity_type_id = match store
            .find_option_value(ACTIVITY_TYPE_GROUP, ACTIVITY_TYPE_NAME)
            .await
            .map_err(|e| fatal("activity type", e))?
        {
            Some(id) => id,
            None => {
                let id = store
                    .create_option_value(
                        ACTIVITY_TYPE_GROUP,
                        ACTIVITY_TYPE_NAME,
                        ACTIVITY_TYPE_LABEL,
                        ACTIVITY_TYPE_DESCRIPTION,
                    )
                    .await
                    .map_err(|e| fatal("activity type", e))?;
                tracing::info!(id, name = ACTIVITY_TYPE_NAME, "created missing activity type");
                id
            }
        };

        let activity_status_id = match store
            .find_option_value(ACTIVITY_STATUS_GROUP, ACTIVITY_STATUS_NAME)
            .await
        {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(error = %err, "activity status lookup failed, continuing without");
                None
            }
        };

        let default_group_id = match store
            .find_group_by_name(SIGNER_GROUP_NAME)
            .await
            .map_err(|e| fatal("signer group", e))?
        {
            Some(id) => id,
            None => {
                let id = store
                    .create_group(SIGNER_GROUP_NAME, SIGNER_GROUP_TITLE, SIGNER_GROUP_DESCRIPTION)
                    .await
                    .map_err(|e| fatal("signer group", e))?;
                tracing::info!(id, name = SIGNER_GROUP_NAME, "created missing signer group");
                id
            }
        };

        let organization_contact_id = match store
            .find_organization_contact(organization_name)
            .await
            .map_err(|e| fatal("organization contact", e))?
        {
            Some(id) => id,
            None => {
                let id = store
                    .create_organization_contact(organization_name)
                    .await
                    .map_err(|e| fatal("organization contact", e))?;
                tracing::info!(id, legal_name = organization_name, "created organization contact");
                id
            }
        };

        tracing::info!(
            activity_type_id,
            activity_status_id = ?activity_status_id,
            organization_contact_id,
            default_group_id,
            "reference records resolved"
        );

        Ok(Self {
            activity_type_id,
            activity_status_id,
            organization_contact_id,
            default_group_id,
        })
    }
}
