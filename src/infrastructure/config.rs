//! Configuration management

use serde::{Deserialize, Serialize};

use crate::variables::LoadOptions;

/// Environment variable overriding the log level
pub const LOG_LEVEL_VAR: &str = "TASKLIB_LOG_LEVEL";

/// Environment variable overriding the declaration key prefix
pub const DECLARATION_PREFIX_VAR: &str = "TASKLIB_DECLARATION_PREFIX";

/// Task context configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Prefix of the declaration list keys, e.g. `VSTS` for `VSTS_PUBLIC_VARIABLES`
    pub declaration_prefix: String,
    /// Prefix marking secret variables
    pub secret_prefix: String,
    /// Variables consulted, in order, for the default path root
    pub default_root_variables: Vec<String>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            declaration_prefix: "VSTS".to_string(),
            secret_prefix: "SECRET_".to_string(),
            default_root_variables: vec![
                "Build.SourcesDirectory".to_string(),
                "System.DefaultWorkingDirectory".to_string(),
            ],
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default configuration with overrides from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(LOG_LEVEL_VAR) {
            config.log_level = level;
        }
        if let Ok(prefix) = std::env::var(DECLARATION_PREFIX_VAR) {
            config.declaration_prefix = prefix;
        }
        config
    }

    /// Decodes a JSON configuration document; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns the decode error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Key holding the list of declared public variables
    #[must_use]
    pub fn public_declaration_key(&self) -> String {
        format!("{}_PUBLIC_VARIABLES", self.declaration_prefix)
    }

    /// Key holding the list of declared secret variables
    #[must_use]
    pub fn secret_declaration_key(&self) -> String {
        format!("{}_SECRET_VARIABLES", self.declaration_prefix)
    }

    /// Store decoding rules derived from this configuration
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            secret_prefix: self.secret_prefix.clone(),
            public_declaration_key: self.public_declaration_key(),
            secret_declaration_key: self.secret_declaration_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.public_declaration_key(), "VSTS_PUBLIC_VARIABLES");
        assert_eq!(config.secret_declaration_key(), "VSTS_SECRET_VARIABLES");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.load_options(), LoadOptions::default());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = Config::from_json(r#"{"declarationPrefix": "AGENT", "logLevel": "debug"}"#)
            .unwrap();
        assert_eq!(config.public_declaration_key(), "AGENT_PUBLIC_VARIABLES");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.secret_prefix, "SECRET_");
    }

    #[test]
    fn test_config_from_json_invalid() {
        assert!(Config::from_json(r#"{"logLevel": 5}"#).is_err());
    }
}
