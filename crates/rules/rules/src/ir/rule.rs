use serde::{Deserialize, Serialize};

use cardio_core::{PatientRecord, Verdict};

use super::expr::Expr;
use crate::error::RuleError;

/// Where a rule was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSource {
    /// Part of the built-in corpus compiled into the crate.
    Builtin,
    /// Loaded from a YAML file.
    Yaml {
        /// The file path, if available.
        file: Option<String>,
    },
    /// Defined inline in code.
    Inline,
}

impl RuleSource {
    /// Short label for listings and traces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "Builtin",
            Self::Yaml { .. } => "Yaml",
            Self::Inline => "Inline",
        }
    }
}

/// A single rule combining a condition expression with the verdict it yields.
///
/// Rules are grouped into tiers by verdict. The engine evaluates the High tier
/// first, then Moderate, then Low, and within a tier in declaration order.
/// The first rule whose condition evaluates to `true` determines the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// A unique name for the rule.
    pub name: String,
    /// Optional description of what this rule encodes.
    #[serde(default)]
    pub description: Option<String>,
    /// The condition expression that must evaluate to `true` for the rule to fire.
    pub condition: Expr,
    /// The verdict returned when the condition matches.
    pub verdict: Verdict,
    /// Where this rule was loaded from.
    pub source: RuleSource,
}

impl Rule {
    /// Create a new rule with the given name, condition, and verdict.
    ///
    /// Defaults to `Inline` source and no description.
    pub fn new(name: impl Into<String>, condition: Expr, verdict: Verdict) -> Self {
        Self {
            name: name.into(),
            description: None,
            condition,
            verdict,
            source: RuleSource::Inline,
        }
    }

    /// Set the description of this rule.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the source of this rule.
    #[must_use]
    pub fn with_source(mut self, source: RuleSource) -> Self {
        self.source = source;
        self
    }

    /// Whether the rule's condition holds for `record`.
    pub fn matches(&self, record: &PatientRecord) -> bool {
        self.condition.matches(record)
    }

    /// Reject conditions that compare against values outside an attribute's
    /// enumeration.
    pub fn validate(&self) -> Result<(), RuleError> {
        match self.condition.unknown_value() {
            Some((attribute, value)) => Err(RuleError::UnknownValue {
                rule: self.name.clone(),
                attribute,
                value: value.to_owned(),
            }),
            None => Ok(()),
        }
    }
}
