use serde::{Deserialize, Serialize};

use cardio_core::{Attribute, Verdict};

use crate::ir::rule::Rule;

/// Result of evaluating a single rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleTraceResult {
    /// The rule's condition evaluated to `true`.
    Matched,
    /// The rule's condition evaluated to `false`.
    NotMatched,
    /// The rule was not evaluated because a prior rule already matched.
    Skipped,
}

impl RuleTraceResult {
    /// Return the `snake_case` string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NotMatched => "not_matched",
            Self::Skipped => "skipped",
        }
    }
}

/// Trace entry for a single rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTraceEntry {
    /// Name of the rule.
    pub rule_name: String,
    /// The verdict this rule yields when it matches.
    pub verdict: Verdict,
    /// Human-readable representation of the condition expression.
    pub condition_display: String,
    /// Result of evaluating this rule.
    pub result: RuleTraceResult,
    /// Time spent evaluating this rule in microseconds.
    pub evaluation_duration_us: u64,
    /// Where the rule was loaded from (e.g. `"Builtin"`, `"Yaml"`).
    pub source: String,
    /// Optional rule description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reason the rule was skipped, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

impl RuleTraceEntry {
    pub(crate) fn new(
        rule: &Rule,
        result: RuleTraceResult,
        evaluation_duration_us: u64,
        skip_reason: Option<String>,
    ) -> Self {
        Self {
            rule_name: rule.name.clone(),
            verdict: rule.verdict,
            condition_display: rule.condition.to_source(),
            result,
            evaluation_duration_us,
            source: rule.source.as_str().to_owned(),
            description: rule.description.clone(),
            skip_reason,
        }
    }
}

/// Complete trace of a rule evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEvaluationTrace {
    /// The final verdict.
    pub verdict: Verdict,
    /// Advisory text for the final verdict.
    pub advice: String,
    /// Name of the first rule that matched, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,
    /// `true` when no rule matched and the default verdict was applied.
    pub default_applied: bool,
    /// Number of rules whose conditions were actually evaluated.
    pub total_rules_evaluated: usize,
    /// Number of rules that were skipped.
    pub total_rules_skipped: usize,
    /// Total wall-clock time for the entire evaluation in microseconds.
    pub evaluation_duration_us: u64,
    /// Attributes that were missing or held a value outside their
    /// enumeration. Every comparison against them evaluated to `false`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_attributes: Vec<Attribute>,
    /// Per-rule trace entries in evaluation order.
    pub trace: Vec<RuleTraceEntry>,
}
