//! Petition submission handler
//!
//! Drives one submission through the whole pipeline: validate, resolve the
//! signer to a contact, record the provenance activity, then apply group
//! membership. Validation failures reject the submission; a contact
//! resolution error abandons it; everything after that point is
//! best-effort and the pipeline runs to the end regardless.

use super::SubmissionHandler;
use crate::matching::scrub;
use crate::models::{
    parse_birth_date, CampaignId, GroupId, IdentityAttributes, IntakeState, ProcessOutcome,
    WebformSubmission, DEFAULT_CONTACT_TYPE,
};
use crate::services::{ContactResolver, EngagementRecorder, ReferenceConfig};
use crate::store::CrmStore;
use crate::validators::{validate, ValidationFailure};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Handles `processing_class = petition` submissions
pub struct PetitionHandler {
    store: Arc<dyn CrmStore>,
    resolver: ContactResolver,
    recorder: EngagementRecorder,
    refs: Arc<ReferenceConfig>,
}

impl PetitionHandler {
    pub fn new(
        store: Arc<dyn CrmStore>,
        resolver: ContactResolver,
        recorder: EngagementRecorder,
        refs: Arc<ReferenceConfig>,
    ) -> Self {
        Self {
            store,
            resolver,
            recorder,
            refs,
        }
    }

    /// Campaign linkage for the activity: both the id and the subject, or
    /// neither. A reference that does not name a known campaign leaves the
    /// activity unlinked rather than pointing at nothing.
    async fn campaign_link(
        &self,
        submission_id: Uuid,
        campaign_ref: &str,
    ) -> (Option<CampaignId>, Option<String>) {
        let Ok(campaign_id) = campaign_ref.trim().parse::<CampaignId>() else {
            tracing::warn!(
                submission_id = %submission_id,
                campaign_ref,
                "campaign reference is not numeric, activity will not be linked"
            );
            return (None, None);
        };

        match self.store.campaign_title(campaign_id).await {
            Ok(Some(title)) => (Some(campaign_id), Some(title)),
            Ok(None) => {
                tracing::warn!(
                    submission_id = %submission_id,
                    campaign_id,
                    "campaign not found, activity will not be linked"
                );
                (None, None)
            }
            Err(err) => {
                tracing::error!(
                    submission_id = %submission_id,
                    campaign_id,
                    error = %err,
                    "campaign lookup failed, activity will not be linked"
                );
                (None, None)
            }
        }
    }
}

#[async_trait]
impl SubmissionHandler for PetitionHandler {
    fn class_name(&self) -> &'static str {
        "Petition"
    }

    async fn process(&self, submission: &WebformSubmission) -> ProcessOutcome {
        let submission_id = Uuid::new_v4();
        let mut outcome = ProcessOutcome::new(submission_id);
        tracing::info!(
            submission_id = %submission_id,
            webform = %submission.webform_title,
            "petition submission received"
        );

        let fields = match validate(submission) {
            Ok(fields) => fields,
            Err(failure) => {
                match &failure {
                    ValidationFailure::InvalidEmail(email) => tracing::warn!(
                        submission_id = %submission_id,
                        email = %email,
                        "not a valid email, petition signature ignored"
                    ),
                    other => tracing::warn!(
                        submission_id = %submission_id,
                        reason = %other,
                        "petition submission rejected"
                    ),
                }
                outcome.state = IntakeState::Rejected;
                outcome.reject_reason = Some(failure.to_string());
                return outcome;
            }
        };
        outcome.state = IntakeState::Validated;

        let identity = IdentityAttributes {
            first_name: Some(scrub(&fields.first_name)),
            last_name: Some(scrub(&fields.last_name)),
            email: Some(fields.email.clone()),
            birth_date: fields.birth_date.as_deref().and_then(|raw| {
                let parsed = parse_birth_date(raw);
                if parsed.is_none() {
                    tracing::warn!(
                        submission_id = %submission_id,
                        value = raw,
                        "unparseable birth date dropped"
                    );
                }
                parsed
            }),
            contact_type: DEFAULT_CONTACT_TYPE.to_string(),
        };

        let resolved = match self
            .resolver
            .resolve_or_create(self.store.as_ref(), &identity)
            .await
        {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::error!(
                    submission_id = %submission_id,
                    error = %err,
                    "contact resolution failed, submission abandoned"
                );
                outcome.state = IntakeState::Failed;
                return outcome;
            }
        };
        outcome.contact_id = Some(resolved.contact_id);
        outcome.contact_created = resolved.created;
        outcome.state = IntakeState::ContactResolved;

        let (campaign_id, subject) = self
            .campaign_link(submission_id, &fields.campaign_ref)
            .await;
        let activity = self
            .recorder
            .record_activity(resolved.contact_id, campaign_id, subject)
            .await;
        outcome.activity = Some(activity);
        outcome.state = IntakeState::ActivityRecorded;

        // Every signer lands in the default group regardless of consent.
        if self
            .recorder
            .add_to_group(self.refs.default_group_id, resolved.contact_id)
            .await
        {
            outcome.groups_added += 1;
        }

        if let Some(selection) = &fields.group_selection {
            let opt_in = fields.opt_in();
            for token in selection.split(';') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                let Ok(group_id) = token.parse::<GroupId>() else {
                    tracing::warn!(
                        submission_id = %submission_id,
                        token,
                        "unparseable group id skipped"
                    );
                    continue;
                };
                if opt_in {
                    if self.recorder.add_to_group(group_id, resolved.contact_id).await {
                        outcome.groups_added += 1;
                    }
                } else if self
                    .recorder
                    .remove_from_group(group_id, resolved.contact_id)
                    .await
                {
                    outcome.groups_removed += 1;
                }
            }
        }
        outcome.state = IntakeState::Done;
        tracing::info!(
            submission_id = %submission_id,
            contact_id = resolved.contact_id,
            contact_created = resolved.created,
            confidence = resolved.confidence,
            activity = ?outcome.activity,
            groups_added = outcome.groups_added,
            groups_removed = outcome.groups_removed,
            "petition submission processed"
        );
        outcome
    }
}
