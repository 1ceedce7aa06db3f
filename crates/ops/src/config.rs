//! Configuration for the operations layer.

use std::path::Path;

use serde::Deserialize;

use crate::OpsError;

/// Top-level configuration, loaded from a TOML file.
///
/// ```toml
/// [rules]
/// directory = "rules/"
///
/// [engine]
/// strict = false
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpsConfig {
    /// Rule loading configuration.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Classification behaviour.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where rules come from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// Optional path to a directory containing YAML rule files. The built-in
    /// corpus is used when unset.
    pub directory: Option<String>,
}

/// Classification behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Reject incomplete or out-of-range records instead of classifying them.
    #[serde(default)]
    pub strict: bool,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}

impl OpsConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, OpsError> {
        toml::from_str(contents).map_err(|e| OpsError::Configuration(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, OpsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OpsError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, OpsError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Override the rules directory.
    #[must_use]
    pub fn with_rules_directory(mut self, directory: impl Into<String>) -> Self {
        self.rules.directory = Some(directory.into());
        self
    }

    /// Override strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.engine.strict = strict;
        self
    }
}
