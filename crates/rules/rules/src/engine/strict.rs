//! Opt-in validation in front of the lenient engine.
//!
//! [`RuleEngine::classify`] never fails: missing or unrecognized attribute
//! values match nothing and can only push a record toward the default verdict.
//! Callers that would rather reject such input use the `*_strict` variants.

use tracing::warn;

use cardio_core::{Diagnosis, PatientRecord, Verdict};

use crate::engine::executor::RuleEngine;
use crate::error::RuleError;

impl RuleEngine {
    /// Check that a record is complete and every value is recognized.
    ///
    /// Rejections are logged at `warn` before the error is returned.
    #[allow(clippy::unused_self)]
    pub fn validate_strict(&self, record: &PatientRecord) -> Result<(), RuleError> {
        record.validate().map_err(|e| {
            warn!(error = %e, "rejecting malformed record");
            RuleError::from(e)
        })
    }

    /// Validate the record, then classify it.
    pub fn classify_strict(&self, record: &PatientRecord) -> Result<Verdict, RuleError> {
        self.validate_strict(record)?;
        Ok(self.classify(record))
    }

    /// Validate the record, then diagnose it.
    pub fn diagnose_strict(&self, record: &PatientRecord) -> Result<Diagnosis, RuleError> {
        self.validate_strict(record)?;
        Ok(self.diagnose(record))
    }
}

#[cfg(test)]
mod tests {
    use cardio_core::{Attribute, CoreError};

    use super::*;
    use crate::ir::expr::eq;
    use crate::ir::rule::Rule;

    fn engine() -> RuleEngine {
        RuleEngine::new(vec![Rule::new(
            "non-smoker",
            eq(Attribute::Smoker, "Non-Smoker"),
            Verdict::Low,
        )])
        .unwrap()
    }

    fn complete() -> PatientRecord {
        Attribute::ALL
            .into_iter()
            .fold(PatientRecord::new(), |record, attr| {
                record.with(attr, attr.allowed_values()[0])
            })
            .with(Attribute::Smoker, "Non-Smoker")
    }

    #[test]
    fn valid_record_is_classified() {
        assert_eq!(engine().classify_strict(&complete()).unwrap(), Verdict::Low);
        let diagnosis = engine().diagnose_strict(&complete()).unwrap();
        assert_eq!(diagnosis.matched_rule.as_deref(), Some("non-smoker"));
    }

    #[test]
    fn missing_attribute_is_rejected() {
        let record = PatientRecord::new().with(Attribute::Smoker, "Non-Smoker");
        let err = engine().classify_strict(&record).unwrap_err();
        assert!(matches!(
            err,
            RuleError::InvalidRecord(CoreError::MissingAttribute(Attribute::AgeGroup))
        ));
        // The lenient path still answers.
        assert_eq!(engine().classify(&record), Verdict::Low);
    }

    #[test]
    fn invalid_value_is_rejected() {
        let record = complete().with(Attribute::Diabetes, "Borderline");
        let err = engine().diagnose_strict(&record).unwrap_err();
        assert!(matches!(
            err,
            RuleError::InvalidRecord(CoreError::InvalidValue {
                attribute: Attribute::Diabetes,
                ..
            })
        ));
    }

    #[test]
    fn validate_strict_matches_classify_strict() {
        let engine = engine();
        assert!(engine.validate_strict(&complete()).is_ok());

        let record = complete().with(Attribute::ChestPain, "Crushing");
        let direct = engine.validate_strict(&record).unwrap_err();
        let via_classify = engine.classify_strict(&record).unwrap_err();
        assert_eq!(direct.to_string(), via_classify.to_string());
        assert!(matches!(
            direct,
            RuleError::InvalidRecord(CoreError::InvalidValue {
                attribute: Attribute::ChestPain,
                ..
            })
        ));
    }
}
