//! Submission workflow
//!
//! A submission names its handler through the `processing_class` routing
//! field; the registry maps routing keys to handlers, case-insensitively.
//! Once a handler takes over, the transport's job is done: handlers never
//! raise, they fold every collaborator failure into the outcome and the
//! log stream.

pub mod petition;

pub use petition::PetitionHandler;

use crate::models::{ProcessOutcome, WebformSubmission};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Processes one class of webform submission
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    /// Routing key this handler answers to
    fn class_name(&self) -> &'static str;

    /// Process a submission end to end
    async fn process(&self, submission: &WebformSubmission) -> ProcessOutcome;
}

/// Routing table from processing class to handler
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn SubmissionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its class name
    pub fn register(&mut self, handler: Arc<dyn SubmissionHandler>) -> wfp_common::Result<()> {
        let key = handler.class_name().to_ascii_lowercase();
        if self.handlers.contains_key(&key) {
            return Err(wfp_common::Error::Config(format!(
                "handler class '{key}' registered twice"
            )));
        }
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Handler for a routing key, matched case-insensitively
    pub fn get(&self, class: &str) -> Option<Arc<dyn SubmissionHandler>> {
        self.handlers
            .get(&class.trim().to_ascii_lowercase())
            .cloned()
    }
}
