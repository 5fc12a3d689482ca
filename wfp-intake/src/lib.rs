//! wfp-intake library interface
//!
//! Exposes the intake pipeline for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod matching;
pub mod models;
pub mod services;
pub mod store;
pub mod validators;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::IntakeSettings;
use crate::matching::{build_rule_chain, ContactPicker};
use crate::services::{ContactResolver, EngagementRecorder, ReferenceConfig};
use crate::store::CrmStore;
use crate::workflow::{HandlerRegistry, PetitionHandler};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Routing table from processing class to handler
    pub registry: Arc<HandlerRegistry>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            startup_time: Utc::now(),
        }
    }
}

/// Assemble the processing pipeline over an opened store
///
/// Resolves the reference records, builds the matching rule chain from
/// configuration, and registers the petition handler. Fails when a
/// mandatory reference cannot be provisioned or the configuration names
/// an unknown rule.
pub async fn init_pipeline(
    store: Arc<dyn CrmStore>,
    settings: &IntakeSettings,
) -> wfp_common::Result<AppState> {
    let refs = Arc::new(
        ReferenceConfig::resolve(store.as_ref(), &settings.organization_name).await?,
    );

    let picker = ContactPicker::new(settings.picker_policy);
    let rules = build_rule_chain(&settings.matching_rules, picker)?;
    let resolver = ContactResolver::new(rules);
    let recorder = EngagementRecorder::new(store.clone(), refs.clone());
    let handler = PetitionHandler::new(store, resolver, recorder, refs);

    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(handler))?;

    Ok(AppState::new(Arc::new(registry)))
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::webform_routes())
        .merge(api::health_routes())
        .with_state(state)
}
