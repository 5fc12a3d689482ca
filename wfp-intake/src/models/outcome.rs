//! Intake pipeline state machine and per-submission outcome
//!
//! A submission progresses RECEIVED → VALIDATED → CONTACT_RESOLVED →
//! ACTIVITY_RECORDED → GROUPS_UPDATED → DONE, with early exits to
//! REJECTED (validation failure) or FAILED (contact resolution error).

use super::identity::{ActivityId, ContactId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline state for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntakeState {
    /// Submission accepted from the transport, nothing checked yet
    Received,
    /// Mandatory fields present and well-formed
    Validated,
    /// Identity resolved to an existing or freshly created contact
    ContactResolved,
    /// Provenance activity created or found to already exist
    ActivityRecorded,
    /// Default and selected group memberships applied
    GroupsUpdated,
    /// Pipeline ran to completion
    Done,
    /// Dropped at validation; expected, recoverable
    Rejected,
    /// Contact resolution errored; submission abandoned
    Failed,
}

/// What happened to the provenance activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityOutcome {
    /// New activity written
    Created(ActivityId),
    /// Equivalent current activity already present; creation suppressed
    Duplicate,
    /// Required ids missing or the write failed; logged, not raised
    Skipped,
}

/// Result of processing one submission
///
/// This is a logging/testing artifact; the transport only ever sees the
/// plain acknowledgment.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Correlation id carried through every log line for this submission
    pub submission_id: Uuid,
    pub state: IntakeState,
    pub contact_id: Option<ContactId>,
    /// True when resolution created a contact rather than matching one
    pub contact_created: bool,
    /// None until the activity step runs
    pub activity: Option<ActivityOutcome>,
    pub groups_added: usize,
    pub groups_removed: usize,
    /// Populated on the REJECTED path
    pub reject_reason: Option<String>,
}

impl ProcessOutcome {
    pub fn new(submission_id: Uuid) -> Self {
        Self {
            submission_id,
            state: IntakeState::Received,
            contact_id: None,
            contact_created: false,
            activity: None,
            groups_added: 0,
            groups_removed: 0,
            reject_reason: None,
        }
    }
}
