//! Configuration loading for WFP services
//!
//! Resolves the service TOML config with Environment → user config dir →
//! system config dir priority, falling back to compiled defaults when no
//! file exists. A missing config file is not an error; a malformed one is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Service configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database path; platform data dir when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Legal name of the organization contact used as activity source
    #[serde(default = "default_organization_name")]
    pub organization_name: String,

    /// Matching rule chain, evaluated in order
    #[serde(default = "default_matching_rules")]
    pub matching_rules: Vec<String>,

    /// Disambiguation policy when a rule finds several candidates
    #[serde(default = "default_picker_policy")]
    pub picker_policy: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5740
}

fn default_organization_name() -> String {
    "Default Organization".to_string()
}

fn default_matching_rules() -> Vec<String> {
    vec![
        "first_last_name_email".to_string(),
        "email_only".to_string(),
    ]
}

fn default_picker_policy() -> String {
    "lowest_id".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            database_path: None,
            organization_name: default_organization_name(),
            matching_rules: default_matching_rules(),
            picker_policy: default_picker_policy(),
        }
    }
}

impl TomlConfig {
    /// Database path, resolved to the platform default when unset
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

/// Locate the config file for `service` (e.g. "intake"):
/// 1. `env_var` (highest priority, explicit path)
/// 2. `~/.config/wfp/<service>.toml`
/// 3. `/etc/wfp/<service>.toml` (Linux)
///
/// Returns `None` when no candidate exists.
pub fn resolve_config_path(env_var: &str, service: &str) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(env_var) {
        return Some(PathBuf::from(path));
    }

    let file_name = format!("{}.toml", service);
    if let Some(user_path) = dirs::config_dir().map(|d| d.join("wfp").join(&file_name)) {
        if user_path.exists() {
            return Some(user_path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_path = PathBuf::from("/etc/wfp").join(&file_name);
        if system_path.exists() {
            return Some(system_path);
        }
    }

    None
}

/// Load config from `path`, or defaults when `path` is `None` or missing
pub fn load_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        info!("No config file found, using defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        info!("Config file {} does not exist, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// OS-dependent default database path
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("wfp").join("intake.db"))
        .unwrap_or_else(|| PathBuf::from("./wfp_data/intake.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 5740);
        assert_eq!(
            config.matching_rules,
            vec!["first_last_name_email", "email_only"]
        );
        assert_eq!(config.picker_policy, "lowest_id");
    }

    #[test]
    fn defaults_when_file_missing() {
        let config = load_config(Some(Path::new("/nonexistent/wfp/intake.toml"))).unwrap();
        assert_eq!(config.organization_name, "Default Organization");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\norganization_name = \"Acme Advocacy\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.organization_name, "Acme Advocacy");
        // Unspecified keys fall back
        assert_eq!(config.bind_address, "127.0.0.1");
        assert!(config.database_path.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    #[serial_test::serial]
    fn env_var_overrides_config_path() {
        std::env::set_var("WFP_TEST_CONFIG", "/tmp/custom-intake.toml");
        let path = resolve_config_path("WFP_TEST_CONFIG", "intake");
        assert_eq!(path, Some(PathBuf::from("/tmp/custom-intake.toml")));
        std::env::remove_var("WFP_TEST_CONFIG");
    }
}
