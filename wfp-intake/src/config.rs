//! Typed intake settings
//!
//! `TomlConfig` is the raw file shape shared through wfp-common; this
//! module turns it into settings the service can act on, rejecting values
//! the pipeline cannot honor before anything binds or connects.

use crate::matching::PickPolicy;
use std::path::PathBuf;
use wfp_common::config::TomlConfig;
use wfp_common::{Error, Result};

/// Validated service settings
#[derive(Debug, Clone)]
pub struct IntakeSettings {
    pub bind_address: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub organization_name: String,
    pub matching_rules: Vec<String>,
    pub picker_policy: PickPolicy,
}

impl IntakeSettings {
    pub fn from_config(config: TomlConfig) -> Result<Self> {
        let picker_policy = PickPolicy::parse(&config.picker_policy).ok_or_else(|| {
            Error::Config(format!("unknown picker policy '{}'", config.picker_policy))
        })?;
        if config.matching_rules.is_empty() {
            return Err(Error::Config(
                "matching_rules must name at least one rule".to_string(),
            ));
        }

        let database_path = config.database_path();
        Ok(Self {
            bind_address: config.bind_address,
            port: config.port,
            database_path,
            organization_name: config.organization_name,
            matching_rules: config.matching_rules,
            picker_policy,
        })
    }
}
