use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::error::CoreError;

/// The twelve categorical inputs describing one patient.
///
/// Values are stored as given. A record may be incomplete or hold values
/// outside an attribute's enumeration; the engine treats such values as
/// matching nothing, and [`validate`](Self::validate) reports them for callers
/// that want strict input.
///
/// Serializes as a flat object keyed by attribute wire name:
///
/// ```json
/// {"age_group": "Elderly", "chest_pain": "Severe"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord {
    values: BTreeMap<Attribute, String>,
}

impl PatientRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of an attribute, replacing any previous value.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: impl Into<String>) -> Self {
        self.values.insert(attribute, value.into());
        self
    }

    /// Build a record from `(field name, value)` pairs.
    ///
    /// Field names must be attribute wire names (`age_group`, `chest_pain`,
    /// ...). Values are not checked.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (name, value) in fields {
            let attribute = name.as_ref().parse::<Attribute>()?;
            values.insert(attribute, value.into());
        }
        Ok(Self { values })
    }

    /// The raw value held for `attribute`, if any.
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.values.get(&attribute).map(String::as_str)
    }

    /// The value held for `attribute`, only if it belongs to the attribute's
    /// enumeration.
    pub fn recognized(&self, attribute: Attribute) -> Option<&str> {
        self.get(attribute).filter(|v| attribute.allows(v))
    }

    /// Iterate over `(attribute, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.values.iter().map(|(a, v)| (*a, v.as_str()))
    }

    /// Number of attributes carrying a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attribute carries a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check that every attribute is present and holds an allowed value.
    ///
    /// Reports the first problem in canonical attribute order.
    pub fn validate(&self) -> Result<(), CoreError> {
        for attribute in Attribute::ALL {
            match self.get(attribute) {
                None => return Err(CoreError::MissingAttribute(attribute)),
                Some(value) if !attribute.allows(value) => {
                    return Err(CoreError::InvalidValue {
                        attribute,
                        value: value.to_owned(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// `(label, value)` pairs for display, in canonical order.
    pub fn labelled_inputs(&self) -> Vec<(&'static str, &str)> {
        self.iter().map(|(a, v)| (a.label(), v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> PatientRecord {
        PatientRecord::new()
            .with(Attribute::AgeGroup, "Young Adult")
            .with(Attribute::Gender, "Male")
            .with(Attribute::ChestPain, "None")
            .with(Attribute::ShortBreath, "No")
            .with(Attribute::Fatigue, "No")
            .with(Attribute::Dizziness, "No")
            .with(Attribute::ColdSweat, "No")
            .with(Attribute::Smoker, "Non-Smoker")
            .with(Attribute::Diabetes, "No")
            .with(Attribute::BloodPressure, "Normal")
            .with(Attribute::FamilyHistory, "No")
            .with(Attribute::Inactive, "Active")
    }

    #[test]
    fn complete_record_validates() {
        let record = healthy();
        assert_eq!(record.len(), 12);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn validate_reports_missing_attribute() {
        let record = PatientRecord::new().with(Attribute::AgeGroup, "Elderly");
        assert_eq!(
            record.validate(),
            Err(CoreError::MissingAttribute(Attribute::Gender))
        );
    }

    #[test]
    fn validate_reports_invalid_value() {
        let record = healthy().with(Attribute::BloodPressure, "Very High");
        assert_eq!(
            record.validate(),
            Err(CoreError::InvalidValue {
                attribute: Attribute::BloodPressure,
                value: "Very High".into(),
            })
        );
    }

    #[test]
    fn recognized_filters_unknown_values() {
        let record = healthy().with(Attribute::Smoker, "Occasionally");
        assert_eq!(record.get(Attribute::Smoker), Some("Occasionally"));
        assert_eq!(record.recognized(Attribute::Smoker), None);
        assert_eq!(record.recognized(Attribute::Gender), Some("Male"));
    }

    #[test]
    fn with_replaces_value() {
        let record = healthy().with(Attribute::ChestPain, "Severe");
        assert_eq!(record.get(Attribute::ChestPain), Some("Severe"));
        assert_eq!(record.len(), 12);
    }

    #[test]
    fn from_fields_parses_wire_names() {
        let record =
            PatientRecord::from_fields([("age_group", "Elderly"), ("chest_pain", "Severe")])
                .unwrap();
        assert_eq!(record.get(Attribute::AgeGroup), Some("Elderly"));
        assert_eq!(record.get(Attribute::ChestPain), Some("Severe"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn from_fields_rejects_unknown_name() {
        let err = PatientRecord::from_fields([("cholesterol", "High")]).unwrap_err();
        assert_eq!(err, CoreError::UnknownAttribute("cholesterol".into()));
    }

    #[test]
    fn serde_flat_object() {
        let record = PatientRecord::new()
            .with(Attribute::ChestPain, "Mild")
            .with(Attribute::AgeGroup, "Elderly");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"age_group": "Elderly", "chest_pain": "Mild"})
        );

        let back: PatientRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn serde_rejects_unknown_field() {
        let result: Result<PatientRecord, _> =
            serde_json::from_value(serde_json::json!({"weight": "Heavy"}));
        assert!(result.is_err());
    }

    #[test]
    fn labelled_inputs_use_display_labels() {
        let record = healthy();
        let inputs = record.labelled_inputs();
        assert_eq!(inputs.len(), 12);
        assert_eq!(inputs[0], ("Age Group", "Young Adult"));
        assert_eq!(inputs[5], ("Dizziness/Nausea", "No"));
        assert_eq!(inputs[11], ("Physical Activity", "Active"));
    }
}
