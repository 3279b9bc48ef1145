//! Configuration for the condition engine

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use typoscript_runtime::context::{
    DEFAULT_APPLICATION_CONTEXT, DEFAULT_COMPAT_VERSION, DEFAULT_DEV_IP_MASK,
};

/// Matcher configuration
///
/// ```yaml
/// application_context: Development/Local
/// dev_ip_mask: 127.0.0.1,::1,192.168.*
/// compat_version: "6.2"
/// allowed_user_functions:
///   - isWeekend
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Force every expression to this result
    pub simulate_match_result: Option<bool>,

    /// Only these exact expressions match
    pub simulate_match_conditions: Vec<String>,

    /// Addresses matched by `[IP = devIP]`
    pub dev_ip_mask: String,

    /// Application context, e.g. `Production/Staging`
    pub application_context: String,

    /// Compatibility version compared by `[compatVersion = ...]`
    pub compat_version: String,

    /// User functions `[userFunc = ...]` may call
    pub allowed_user_functions: Vec<String>,
}

impl MatcherConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            simulate_match_result: None,
            simulate_match_conditions: Vec::new(),
            dev_ip_mask: DEFAULT_DEV_IP_MASK.to_string(),
            application_context: DEFAULT_APPLICATION_CONTEXT.to_string(),
            compat_version: DEFAULT_COMPAT_VERSION.to_string(),
            allowed_user_functions: Vec::new(),
        }
    }

    /// Load configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded matcher configuration from {}", path.as_ref().display());
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_simulate_match_result(mut self, result: Option<bool>) -> Self {
        self.simulate_match_result = result;
        self
    }

    pub fn with_simulate_match_condition(mut self, condition: impl Into<String>) -> Self {
        self.simulate_match_conditions.push(condition.into());
        self
    }

    pub fn with_dev_ip_mask(mut self, mask: impl Into<String>) -> Self {
        self.dev_ip_mask = mask.into();
        self
    }

    pub fn with_application_context(mut self, context: impl Into<String>) -> Self {
        self.application_context = context.into();
        self
    }

    pub fn with_compat_version(mut self, version: impl Into<String>) -> Self {
        self.compat_version = version.into();
        self
    }

    pub fn with_allowed_user_function(mut self, name: impl Into<String>) -> Self {
        self.allowed_user_functions.push(name.into());
        self
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.application_context, "Production");
        assert_eq!(config.dev_ip_mask, "127.0.0.1,::1");
        assert_eq!(config.simulate_match_result, None);
        assert!(config.allowed_user_functions.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = MatcherConfig::from_yaml_str(
            "application_context: Development\nallowed_user_functions: [isWeekend]\n",
        )
        .unwrap();
        assert_eq!(config.application_context, "Development");
        assert_eq!(config.allowed_user_functions, vec!["isWeekend"]);
        assert_eq!(config.compat_version, "6.2");
    }

    #[test]
    fn test_simulation_yaml() {
        let config = MatcherConfig::from_yaml_str(
            "simulate_match_result: true\nsimulate_match_conditions:\n  - \"[browser = msie]\"\n",
        )
        .unwrap();
        assert_eq!(config.simulate_match_result, Some(true));
        assert_eq!(config.simulate_match_conditions, vec!["[browser = msie]"]);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(MatcherConfig::from_yaml_str("dev_ip_mask: [unclosed").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = MatcherConfig::new()
            .with_application_context("Testing")
            .with_allowed_user_function("isWeekend");
        let yaml = config.to_yaml().unwrap();
        assert_eq!(MatcherConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
