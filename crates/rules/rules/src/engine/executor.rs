use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use tracing::{debug, info, instrument};

use cardio_core::{Attribute, Diagnosis, PatientRecord, Verdict};

use crate::engine::trace::{RuleEvaluationTrace, RuleTraceEntry, RuleTraceResult};
use crate::error::RuleError;
use crate::frontend::RuleFrontend;
use crate::ir::rule::Rule;

/// Verdict returned when no rule matches.
///
/// Uncertain cases escalate to a checkup rather than being reported as low
/// risk.
pub const DEFAULT_VERDICT: Verdict = Verdict::Moderate;

/// The outcome of a single evaluation pass.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    /// The verdict of the first matching rule, or [`DEFAULT_VERDICT`].
    pub verdict: Verdict,
    /// The first matching rule. `None` when the default was applied.
    pub matched: Option<&'a Rule>,
}

impl Evaluation<'_> {
    /// Name of the matched rule, if any.
    pub fn matched_rule(&self) -> Option<&str> {
        self.matched.map(|r| r.name.as_str())
    }
}

/// The rule engine evaluates an ordered rule set against patient records.
///
/// Rules are evaluated tier by tier (High, then Moderate, then Low) and in
/// declaration order within a tier. The first matching rule determines the
/// verdict. If no rule matches, the verdict is [`DEFAULT_VERDICT`].
///
/// The engine holds no per-call state and can be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Create a new rule engine with the given rules.
    ///
    /// Rules are stably sorted by tier, so declaration order is preserved
    /// within each tier. Fails if a rule compares against a value outside an
    /// attribute's enumeration or if two rules share a name.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        {
            let mut seen = HashSet::with_capacity(rules.len());
            for rule in &rules {
                rule.validate()?;
                if !seen.insert(rule.name.as_str()) {
                    return Err(RuleError::DuplicateRule(rule.name.clone()));
                }
            }
        }
        Ok(Self::from_validated(rules))
    }

    /// Order already-validated rules into tiers.
    pub(crate) fn from_validated(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| r.verdict.rank());
        Self { rules }
    }

    /// Return a reference to the rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn rule_by_name(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Return a list of all rule names in evaluation order.
    pub fn list_rules(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    /// The rules of one tier, in declaration order.
    pub fn rules_in_tier(&self, verdict: Verdict) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.verdict == verdict)
    }

    /// The verdict returned when no rule matches.
    pub fn default_verdict(&self) -> Verdict {
        DEFAULT_VERDICT
    }

    /// Compute a fingerprint of the current rule set.
    ///
    /// The hash combines each rule's name, verdict, and condition in
    /// evaluation order, so reordering or editing any rule changes it.
    pub fn rules_version(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for rule in &self.rules {
            rule.name.hash(&mut hasher);
            rule.verdict.hash(&mut hasher);
            rule.condition.to_source().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Evaluate the rules against a record.
    ///
    /// Returns the first matching rule's verdict, or [`DEFAULT_VERDICT`]. Never
    /// fails: attributes that are missing or hold unrecognized values simply
    /// match nothing.
    #[instrument(level = "debug", skip_all, fields(rules_count = self.rules.len()))]
    pub fn evaluate<'a>(&'a self, record: &PatientRecord) -> Evaluation<'a> {
        if let Some(rule) = self.rules.iter().find(|r| r.matches(record)) {
            debug!(rule = %rule.name, verdict = %rule.verdict, "rule matched");
            return Evaluation {
                verdict: rule.verdict,
                matched: Some(rule),
            };
        }

        debug!(verdict = %DEFAULT_VERDICT, "no rules matched, returning default");
        Evaluation {
            verdict: DEFAULT_VERDICT,
            matched: None,
        }
    }

    /// Classify a record into a risk tier.
    pub fn classify(&self, record: &PatientRecord) -> Verdict {
        self.evaluate(record).verdict
    }

    /// Classify a record and attach the advisory text and matched rule.
    pub fn diagnose(&self, record: &PatientRecord) -> Diagnosis {
        let evaluation = self.evaluate(record);
        Diagnosis::new(
            evaluation.verdict,
            evaluation.matched_rule().map(str::to_owned),
        )
    }

    /// Evaluate the rules and record the outcome of every rule.
    ///
    /// Rules after the first match are reported as skipped.
    pub fn evaluate_with_trace(&self, record: &PatientRecord) -> RuleEvaluationTrace {
        let start = Instant::now();
        let mut trace = Vec::with_capacity(self.rules.len());
        let mut matched: Option<&Rule> = None;

        for rule in &self.rules {
            if let Some(winner) = matched {
                trace.push(RuleTraceEntry::new(
                    rule,
                    RuleTraceResult::Skipped,
                    0,
                    Some(format!("rule {} already matched", winner.name)),
                ));
                continue;
            }

            let rule_start = Instant::now();
            let hit = rule.matches(record);
            #[allow(clippy::cast_possible_truncation)]
            let duration_us = rule_start.elapsed().as_micros() as u64;

            let result = if hit {
                matched = Some(rule);
                RuleTraceResult::Matched
            } else {
                RuleTraceResult::NotMatched
            };
            trace.push(RuleTraceEntry::new(rule, result, duration_us, None));
        }

        let total_rules_skipped = trace
            .iter()
            .filter(|e| e.result == RuleTraceResult::Skipped)
            .count();
        let unrecognized_attributes: Vec<Attribute> = Attribute::ALL
            .into_iter()
            .filter(|a| record.recognized(*a).is_none())
            .collect();

        #[allow(clippy::cast_possible_truncation)]
        let evaluation_duration_us = start.elapsed().as_micros() as u64;

        let verdict = matched.map_or(DEFAULT_VERDICT, |r| r.verdict);
        RuleEvaluationTrace {
            verdict,
            advice: verdict.advice().to_owned(),
            matched_rule: matched.map(|r| r.name.clone()),
            default_applied: matched.is_none(),
            total_rules_evaluated: trace.len() - total_rules_skipped,
            total_rules_skipped,
            evaluation_duration_us,
            unrecognized_attributes,
            trace,
        }
    }

    /// Build an engine from every rule file in a directory.
    ///
    /// Files are read in file-name order and rules keep their order within
    /// each file, which fixes the declaration order across files. Files whose
    /// extension no frontend claims are ignored.
    pub fn load_directory(
        path: &std::path::Path,
        frontends: &[&dyn RuleFrontend],
    ) -> Result<Self, RuleError> {
        let entries = std::fs::read_dir(path).map_err(|e| {
            RuleError::Parse(format!("cannot read directory {}: {e}", path.display()))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| RuleError::Parse(format!("directory entry error: {e}")))?;
            let file_path = entry.path();
            if file_path.is_file() {
                files.push(file_path);
            }
        }
        files.sort();

        let mut rules = Vec::new();
        for file_path in &files {
            let extension = file_path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("");

            if let Some(frontend) = frontends
                .iter()
                .find(|fe| fe.extensions().contains(&extension))
            {
                let parsed = frontend.parse_file(file_path)?;
                debug!(file = %file_path.display(), count = parsed.len(), "loaded rule file");
                rules.extend(parsed);
            }
        }

        info!(
            directory = %path.display(),
            rules = rules.len(),
            "loaded rules from directory"
        );
        Self::new(rules)
    }
}
