//! Scenario test-suite runner.
//!
//! Loads YAML test-fixture files and runs each case against a rule engine,
//! comparing expected vs actual verdict/matched-rule.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use cardio_core::{PatientRecord, Verdict};
use cardio_rules::RuleEngine;

use crate::OpsError;

// ---------------------------------------------------------------------------
// Fixture types (deserialized from YAML)
// ---------------------------------------------------------------------------

/// A YAML fixture file containing scenario test cases.
#[derive(Debug, Clone, Deserialize)]
pub struct TestFixtureFile {
    /// The test cases to execute.
    pub tests: Vec<TestCase>,
}

/// A single test case within a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    /// Human-readable test name.
    pub name: String,
    /// The record to classify.
    pub record: PatientRecord,
    /// Expected evaluation result.
    pub expect: TestExpect,
}

/// Expected verdict and optional matched rule name.
#[derive(Debug, Clone, Deserialize)]
pub struct TestExpect {
    /// Expected verdict string (e.g. `"high"`, `"Moderate Risk"`).
    pub verdict: String,
    /// If set, the name of the rule that should have matched.
    #[serde(default)]
    pub matched_rule: Option<String>,
}

// ---------------------------------------------------------------------------
// Result types (returned from the runner)
// ---------------------------------------------------------------------------

/// Result of running an entire test suite.
#[derive(Debug, Clone, Serialize)]
pub struct TestRunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestCaseResult>,
    pub duration_ms: u64,
}

/// Result of a single test case.
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseResult {
    pub name: String,
    pub passed: bool,
    pub expected_verdict: String,
    pub actual_verdict: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_rule: Option<String>,
    pub duration_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Parse a YAML fixture file from a string.
pub fn parse_fixture(yaml: &str) -> Result<TestFixtureFile, OpsError> {
    serde_yaml_ng::from_str(yaml)
        .map_err(|e| OpsError::Configuration(format!("invalid fixture YAML: {e}")))
}

/// Read and parse a YAML fixture file.
pub fn load_fixture(path: &Path) -> Result<TestFixtureFile, OpsError> {
    let contents = std::fs::read_to_string(path)?;
    parse_fixture(&contents)
}

/// Run a full test suite against an engine.
///
/// Records are classified leniently, exactly as `classify` would. An
/// optional `filter` restricts execution to test names containing the given
/// substring. A case whose expected verdict cannot be parsed fails with an
/// error instead of aborting the run.
pub fn run_test_suite(
    engine: &RuleEngine,
    fixtures: &TestFixtureFile,
    filter: Option<&str>,
) -> TestRunSummary {
    let cases: Vec<&TestCase> = fixtures
        .tests
        .iter()
        .filter(|tc| match filter {
            Some(f) => tc.name.contains(f),
            None => true,
        })
        .collect();

    let mut results = Vec::with_capacity(cases.len());
    let suite_start = Instant::now();

    for tc in &cases {
        let case_start = Instant::now();
        let eval = engine.evaluate(&tc.record);

        #[allow(clippy::cast_possible_truncation)]
        let duration_us = case_start.elapsed().as_micros() as u64;

        let actual_rule = eval.matched_rule().map(str::to_owned);
        let result = match tc.expect.verdict.parse::<Verdict>() {
            Ok(expected) => {
                let verdict_match = expected == eval.verdict;

                let rule_match = match &tc.expect.matched_rule {
                    Some(rule) => actual_rule.as_ref().is_some_and(|actual| actual == rule),
                    None => true, // not asserted
                };

                TestCaseResult {
                    name: tc.name.clone(),
                    passed: verdict_match && rule_match,
                    expected_verdict: tc.expect.verdict.clone(),
                    actual_verdict: eval.verdict.to_string(),
                    expected_rule: tc.expect.matched_rule.clone(),
                    actual_rule,
                    duration_us,
                    error: None,
                }
            }
            Err(e) => TestCaseResult {
                name: tc.name.clone(),
                passed: false,
                expected_verdict: tc.expect.verdict.clone(),
                actual_verdict: eval.verdict.to_string(),
                expected_rule: tc.expect.matched_rule.clone(),
                actual_rule,
                duration_us,
                error: Some(e.to_string()),
            },
        };
        debug!(case = %result.name, passed = result.passed, "scenario evaluated");
        results.push(result);
    }

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    #[allow(clippy::cast_possible_truncation)]
    let duration_ms = suite_start.elapsed().as_millis() as u64;

    TestRunSummary {
        total: results.len(),
        passed,
        failed,
        results,
        duration_ms,
    }
}
