//! Data types for the intake pipeline

pub mod identity;
pub mod outcome;
pub mod submission;

pub use identity::{
    parse_birth_date, unescape_text, ActivityId, CampaignId, ContactId, GroupId,
    IdentityAttributes, MatchResult, DEFAULT_CONTACT_TYPE,
};
pub use outcome::{ActivityOutcome, IntakeState, ProcessOutcome};
pub use submission::{
    PetitionFields, SubmissionField, WebformSubmission, FIELD_BIRTH_DATE, FIELD_CAMPAIGN_ID,
    FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_GROUP_IDS, FIELD_KEEP_INFORMED, FIELD_LAST_NAME,
    FIELD_PROCESSING_CLASS,
};
