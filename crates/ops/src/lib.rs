//! Common operations layer for the Cardio CLI.
//!
//! Builds a [`RuleEngine`] from configuration and applies the configured
//! classification policy. The CLI is a thin shell over this crate.

mod config;
mod error;
pub mod test_rules;

pub use config::{EngineConfig, LoggingConfig, OpsConfig, RulesConfig};
pub use error::OpsError;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use cardio_core::{Diagnosis, PatientRecord};
use cardio_rules::{RuleEngine, RuleEvaluationTrace, RuleFrontend, builtin_engine};
use cardio_rules_yaml::YamlFrontend;

/// Re-export core and rule types for consumers.
pub use cardio_core;
pub use cardio_rules;

/// Build the rule engine described by the configuration.
///
/// Uses the built-in corpus unless `rules.directory` is set, in which case
/// every YAML file in that directory is loaded instead.
pub fn load_engine(config: &OpsConfig) -> Result<RuleEngine, OpsError> {
    let Some(ref dir) = config.rules.directory else {
        let engine = builtin_engine();
        info!(rules = engine.rules().len(), "using built-in rule corpus");
        return Ok(engine.clone());
    };

    let path = Path::new(dir);
    if !path.is_dir() {
        warn!(directory = %dir, "rules directory does not exist");
        return Err(OpsError::Configuration(format!(
            "rules directory {dir} does not exist"
        )));
    }

    let yaml_frontend = YamlFrontend;
    let frontends: Vec<&dyn RuleFrontend> = vec![&yaml_frontend];
    let engine = RuleEngine::load_directory(path, &frontends)?;
    info!(count = engine.rules().len(), directory = %dir, "loaded rules from directory");
    Ok(engine)
}

/// A configured classifier.
///
/// Wraps the engine with the strictness policy from [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct Classifier {
    engine: Arc<RuleEngine>,
    strict: bool,
}

impl Classifier {
    /// Create a classifier from configuration.
    pub fn from_config(config: &OpsConfig) -> Result<Self, OpsError> {
        Ok(Self::new(load_engine(config)?, config.engine.strict))
    }

    /// Wrap an existing engine.
    pub fn new(engine: RuleEngine, strict: bool) -> Self {
        Self {
            engine: Arc::new(engine),
            strict,
        }
    }

    /// Access the underlying engine directly.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Whether records are validated before classification.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Classify a record, validating it first when strict.
    pub fn diagnose(&self, record: &PatientRecord) -> Result<Diagnosis, OpsError> {
        if self.strict {
            Ok(self.engine.diagnose_strict(record)?)
        } else {
            Ok(self.engine.diagnose(record))
        }
    }

    /// Classify a record and return the full evaluation trace.
    pub fn trace(&self, record: &PatientRecord) -> Result<RuleEvaluationTrace, OpsError> {
        if self.strict {
            self.engine.validate_strict(record)?;
        }
        Ok(self.engine.evaluate_with_trace(record))
    }
}
