use cardio_core::{Attribute, PatientRecord, Verdict};
use cardio_rules::{Expr, Rule, RuleEngine, RuleFrontend, RuleError, builtin_engine, builtin_rules};

/// Build a record from values given in canonical attribute order.
fn record(values: [&str; 12]) -> PatientRecord {
    Attribute::ALL
        .into_iter()
        .zip(values)
        .fold(PatientRecord::new(), |record, (attr, value)| {
            record.with(attr, value)
        })
}

/// Every record that can be built from allowed values.
fn all_records() -> Vec<PatientRecord> {
    let mut records = vec![PatientRecord::new()];
    for attr in Attribute::ALL {
        records = records
            .into_iter()
            .flat_map(|record| {
                attr.allowed_values()
                    .iter()
                    .map(move |value| record.clone().with(attr, *value))
            })
            .collect();
    }
    records
}

#[test]
fn every_valid_record_gets_a_verdict() {
    let engine = builtin_engine();
    let records = all_records();
    assert_eq!(records.len(), 18_432);
    let declared = builtin_rules();

    let mut counts = [0usize; 3];
    for record in &records {
        let eval = engine.evaluate(record);
        counts[usize::from(eval.verdict.rank())] += 1;

        // First match over declaration order gives the same answer.
        let first = declared.iter().find(|r| r.matches(record));
        assert_eq!(
            eval.matched_rule(),
            first.map(|r| r.name.as_str()),
            "record {record:?}"
        );
        if first.is_none() {
            assert_eq!(eval.verdict, Verdict::Moderate);
        }
    }
    assert!(counts.iter().all(|&c| c > 0), "tier counts {counts:?}");
}

/// Records whose first matching rule was derived from the rule text, not from
/// `builtin_rules()`. Values are in canonical attribute order.
const KNOWN_MATCHES: &[(&str, Verdict, [&str; 12])] = &[
    ("R1", Verdict::High, ["Young Adult", "Male", "Severe", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "High", "Yes", "Active"]),
    ("R2", Verdict::High, ["Young Adult", "Male", "Severe", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "Normal", "Yes", "Active"]),
    ("R3", Verdict::High, ["Elderly", "Male", "Severe", "Yes", "Yes", "Yes", "No", "Smoker", "Yes", "Normal", "Yes", "Active"]),
    ("R4", Verdict::High, ["Young Adult", "Male", "Severe", "Yes", "Yes", "Yes", "No", "Smoker", "Yes", "Normal", "Yes", "Active"]),
    ("R5", Verdict::High, ["Elderly", "Male", "Moderate", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "Normal", "Yes", "Active"]),
    ("R6", Verdict::High, ["Young Adult", "Male", "Moderate", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "High", "Yes", "Active"]),
    ("R7", Verdict::High, ["Young Adult", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "High", "Yes", "Active"]),
    ("R8", Verdict::High, ["Elderly", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "High", "No", "Active"]),
    ("R9", Verdict::High, ["Middle-Aged Adult", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "High", "No", "Physically Inactive"]),
    ("R10", Verdict::High, ["Elderly", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "Normal", "Yes", "Physically Inactive"]),
    ("R11", Verdict::High, ["Middle-Aged Adult", "Female", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "Normal", "Yes", "Active"]),
    ("R12", Verdict::High, ["Young Adult", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "Normal", "Yes", "Active"]),
    ("R13", Verdict::High, ["Elderly", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "No", "High", "Yes", "Active"]),
    ("R41", Verdict::Moderate, ["Middle-Aged Adult", "Male", "Mild", "Yes", "Yes", "Yes", "Yes", "Smoker", "No", "Normal", "No", "Active"]),
    ("R42", Verdict::Moderate, ["Young Adult", "Male", "Mild", "Yes", "Yes", "Yes", "Yes", "Smoker", "Yes", "Normal", "No", "Active"]),
    ("R43", Verdict::Moderate, ["Young Adult", "Male", "Moderate", "Yes", "Yes", "Yes", "Yes", "Non-Smoker", "Yes", "Normal", "No", "Active"]),
    ("R44", Verdict::Moderate, ["Young Adult", "Male", "None", "Yes", "Yes", "Yes", "No", "Smoker", "Yes", "Elevated", "Yes", "Active"]),
    ("R45", Verdict::Moderate, ["Young Adult", "Male", "Moderate", "No", "Yes", "Yes", "No", "Non-Smoker", "No", "Normal", "Yes", "Physically Inactive"]),
    ("R46", Verdict::Moderate, ["Middle-Aged Adult", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "No", "Elevated", "No", "Active"]),
    ("R47", Verdict::Moderate, ["Young Adult", "Male", "Moderate", "Yes", "Yes", "Yes", "No", "Non-Smoker", "No", "Normal", "Yes", "Active"]),
    ("R48", Verdict::Moderate, ["Young Adult", "Female", "None", "Yes", "Yes", "Yes", "Yes", "Smoker", "No", "Elevated", "No", "Active"]),
    ("R49", Verdict::Moderate, ["Elderly", "Male", "Mild", "Yes", "Yes", "Yes", "Yes", "Non-Smoker", "No", "Normal", "No", "Active"]),
    ("R50", Verdict::Moderate, ["Young Adult", "Female", "Severe", "Yes", "Yes", "Yes", "No", "Smoker", "No", "Normal", "Yes", "Active"]),
    ("R76", Verdict::Low, ["Young Adult", "Male", "None", "No", "No", "Yes", "Yes", "Non-Smoker", "No", "Normal", "No", "Active"]),
    ("R77", Verdict::Low, ["Young Adult", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Non-Smoker", "No", "Normal", "No", "Active"]),
    ("R78", Verdict::Low, ["Young Adult", "Male", "None", "Yes", "Yes", "Yes", "No", "Non-Smoker", "No", "Elevated", "No", "Active"]),
    ("R79", Verdict::Low, ["Young Adult", "Male", "None", "No", "Yes", "No", "Yes", "Non-Smoker", "No", "Elevated", "No", "Active"]),
    ("R80", Verdict::Low, ["Young Adult", "Male", "None", "Yes", "Yes", "Yes", "Yes", "Non-Smoker", "No", "Elevated", "No", "Active"]),
];

#[test]
fn known_records_hit_their_rule() {
    let engine = builtin_engine();
    for (name, verdict, values) in KNOWN_MATCHES {
        let eval = engine.evaluate(&record(*values));
        assert_eq!(eval.matched_rule(), Some(*name), "values {values:?}");
        assert_eq!(eval.verdict, *verdict, "rule {name}");
    }
}

#[test]
fn severe_pain_with_breathlessness_and_hypertension_is_high() {
    let engine = builtin_engine();
    for record in all_records() {
        let r = record
            .with(Attribute::ChestPain, "Severe")
            .with(Attribute::ShortBreath, "Yes")
            .with(Attribute::BloodPressure, "High");
        let eval = engine.evaluate(&r);
        assert_eq!(eval.verdict, Verdict::High);
        assert_eq!(eval.matched_rule(), Some("R1"));
    }
}

#[test]
fn healthy_young_adult_is_low() {
    let r = record([
        "Young Adult",
        "Male",
        "None",
        "No",
        "No",
        "No",
        "No",
        "Non-Smoker",
        "No",
        "Normal",
        "No",
        "Active",
    ]);
    let diagnosis = builtin_engine().diagnose(&r);
    assert_eq!(diagnosis.verdict, Verdict::Low);
    assert_eq!(diagnosis.matched_rule.as_deref(), Some("R76"));
    assert_eq!(diagnosis.advice, "Maintain healthy habits and regular checkups.");
}

#[test]
fn middle_aged_mild_pain_with_breathlessness_is_moderate() {
    let r = record([
        "Middle-Aged Adult",
        "Female",
        "Mild",
        "Yes",
        "No",
        "No",
        "No",
        "Non-Smoker",
        "No",
        "Normal",
        "No",
        "Active",
    ]);
    let eval = builtin_engine().evaluate(&r);
    assert_eq!(eval.verdict, Verdict::Moderate);
    assert_eq!(eval.matched_rule(), Some("R41"));
}

#[test]
fn unmatched_record_falls_back_to_moderate() {
    let r = record([
        "Elderly",
        "Male",
        "None",
        "No",
        "No",
        "Yes",
        "Yes",
        "Smoker",
        "No",
        "Normal",
        "No",
        "Active",
    ]);
    let trace = builtin_engine().evaluate_with_trace(&r);
    assert!(trace.default_applied);
    assert_eq!(trace.verdict, Verdict::Moderate);
    assert_eq!(trace.total_rules_evaluated, 105);
    assert_eq!(trace.total_rules_skipped, 0);
    assert!(trace.unrecognized_attributes.is_empty());
}

#[test]
fn first_match_in_tier_wins() {
    // Severe pain and elderly only: R1 and R2 need more, R3 fires.
    let r = record([
        "Elderly",
        "Female",
        "Severe",
        "No",
        "No",
        "No",
        "No",
        "Non-Smoker",
        "No",
        "Normal",
        "No",
        "Active",
    ]);
    let eval = builtin_engine().evaluate(&r);
    assert_eq!(eval.verdict, Verdict::High);
    assert_eq!(eval.matched_rule(), Some("R3"));
}

#[test]
fn declaration_order_is_locked() {
    let engine = builtin_engine();
    let names = engine.list_rules();
    let expected: Vec<String> = (1..=105).map(|i| format!("R{i}")).collect();
    assert_eq!(names, expected);

    let verdicts: Vec<Verdict> = engine.rules().iter().map(|r| r.verdict).collect();
    assert!(verdicts[..40].iter().all(|v| *v == Verdict::High));
    assert!(verdicts[40..75].iter().all(|v| *v == Verdict::Moderate));
    assert!(verdicts[75..].iter().all(|v| *v == Verdict::Low));

    let rebuilt = RuleEngine::new(builtin_rules()).unwrap();
    assert_eq!(engine.rules_version(), rebuilt.rules_version());
}

#[test]
fn swapping_rules_within_a_tier_changes_the_match() {
    let r = record([
        "Middle-Aged Adult",
        "Female",
        "Mild",
        "Yes",
        "No",
        "No",
        "No",
        "Smoker",
        "No",
        "Normal",
        "No",
        "Active",
    ]);
    let canonical = RuleEngine::new(builtin_rules()).unwrap();
    assert_eq!(canonical.evaluate(&r).matched_rule(), Some("R41"));

    let mut rules = builtin_rules();
    rules.swap(40, 41);
    let swapped = RuleEngine::new(rules).unwrap();
    let eval = swapped.evaluate(&r);
    assert_eq!(eval.matched_rule(), Some("R42"));
    assert_eq!(eval.verdict, Verdict::Moderate);
    assert_ne!(canonical.rules_version(), swapped.rules_version());
}

#[test]
fn advice_is_fixed_per_verdict() {
    let engine = builtin_engine();
    for record in all_records().iter().step_by(7) {
        let diagnosis = engine.diagnose(record);
        assert_eq!(diagnosis.advice, diagnosis.verdict.advice());
    }
    assert_eq!(
        Verdict::Moderate.advice(),
        "Schedule a medical checkup and improve lifestyle habits."
    );
}

#[test]
fn unrecognized_value_only_suppresses_rules_that_read_it() {
    let engine = builtin_engine();
    for (i, record) in all_records().into_iter().enumerate().step_by(97) {
        let attr = Attribute::ALL[i % Attribute::ALL.len()];
        let damaged = record.clone().with(attr, "Unknown");
        let eval = engine.evaluate(&damaged);
        if let Some(rule) = eval.matched {
            assert!(!rule.condition.attributes().contains(&attr));
            assert!(rule.matches(&record));
        }
    }
}

#[test]
fn concurrent_classification_agrees() {
    let engine = builtin_engine();
    let records = all_records();
    let expected: Vec<Verdict> = records.iter().map(|r| engine.classify(r)).collect();

    std::thread::scope(|s| {
        for chunk in 0..4 {
            let records = &records;
            let expected = &expected;
            s.spawn(move || {
                for (record, verdict) in records.iter().zip(expected).skip(chunk).step_by(4) {
                    assert_eq!(engine.classify(record), *verdict);
                }
            });
        }
    });
}

struct JsonFrontend;

impl RuleFrontend for JsonFrontend {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, content: &str) -> Result<Vec<Rule>, RuleError> {
        serde_json::from_str(content).map_err(|e| RuleError::Parse(e.to_string()))
    }
}

#[test]
fn load_directory_orders_files_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let low = vec![Rule::new(
        "active",
        cardio_rules::ir::expr::eq(Attribute::Inactive, "Active"),
        Verdict::Low,
    )];
    let more_low = vec![Rule::new("catch-all", Expr::Always, Verdict::Low)];
    std::fs::write(
        dir.path().join("20-rest.json"),
        serde_json::to_string(&more_low).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("10-first.json"),
        serde_json::to_string(&low).unwrap(),
    )
    .unwrap();
    std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

    let engine = RuleEngine::load_directory(dir.path(), &[&JsonFrontend]).unwrap();
    assert_eq!(engine.list_rules(), vec!["active", "catch-all"]);

    let r = PatientRecord::new().with(Attribute::Inactive, "Active");
    assert_eq!(engine.evaluate(&r).matched_rule(), Some("active"));
}

#[test]
fn load_directory_rejects_duplicates_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let rules = vec![Rule::new("same", Expr::Always, Verdict::High)];
    for file in ["a.json", "b.json"] {
        std::fs::write(dir.path().join(file), serde_json::to_string(&rules).unwrap()).unwrap();
    }
    let err = RuleEngine::load_directory(dir.path(), &[&JsonFrontend]).unwrap_err();
    assert!(matches!(err, RuleError::DuplicateRule(ref n) if n == "same"));
}

#[test]
fn load_directory_missing_path() {
    let err = RuleEngine::load_directory(
        std::path::Path::new("/nonexistent/cardio/rules"),
        &[&JsonFrontend],
    )
    .unwrap_err();
    assert!(matches!(err, RuleError::Parse(_)));
}
