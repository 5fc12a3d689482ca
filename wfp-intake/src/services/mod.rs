//! Intake services
//!
//! Service objects sitting between the transport handlers and the store:
//! reference bootstrap, contact resolution, and engagement recording.

pub mod contact_resolver;
pub mod engagement_recorder;
pub mod reference_config;

pub use contact_resolver::{ContactResolver, ResolvedContact};
pub use engagement_recorder::EngagementRecorder;
pub use reference_config::ReferenceConfig;
