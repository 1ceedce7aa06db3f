use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the twelve categorical inputs a patient record carries.
///
/// The declaration order is the canonical order used when records are listed
/// or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    AgeGroup,
    Gender,
    ChestPain,
    ShortBreath,
    Fatigue,
    Dizziness,
    ColdSweat,
    Smoker,
    Diabetes,
    BloodPressure,
    FamilyHistory,
    Inactive,
}

const YES_NO: &[&str] = &["Yes", "No"];

impl Attribute {
    /// Every attribute, in canonical order.
    pub const ALL: [Self; 12] = [
        Self::AgeGroup,
        Self::Gender,
        Self::ChestPain,
        Self::ShortBreath,
        Self::Fatigue,
        Self::Dizziness,
        Self::ColdSweat,
        Self::Smoker,
        Self::Diabetes,
        Self::BloodPressure,
        Self::FamilyHistory,
        Self::Inactive,
    ];

    /// The `snake_case` wire name (matches serde serialization).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AgeGroup => "age_group",
            Self::Gender => "gender",
            Self::ChestPain => "chest_pain",
            Self::ShortBreath => "short_breath",
            Self::Fatigue => "fatigue",
            Self::Dizziness => "dizziness",
            Self::ColdSweat => "cold_sweat",
            Self::Smoker => "smoker",
            Self::Diabetes => "diabetes",
            Self::BloodPressure => "blood_pressure",
            Self::FamilyHistory => "family_history",
            Self::Inactive => "inactive",
        }
    }

    /// Human-readable label used when echoing inputs back to a caller.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AgeGroup => "Age Group",
            Self::Gender => "Gender",
            Self::ChestPain => "Chest Pain",
            Self::ShortBreath => "Shortness of Breath",
            Self::Fatigue => "Fatigue",
            Self::Dizziness => "Dizziness/Nausea",
            Self::ColdSweat => "Cold Sweating",
            Self::Smoker => "Smoking",
            Self::Diabetes => "Diabetes",
            Self::BloodPressure => "Blood Pressure",
            Self::FamilyHistory => "Family History",
            Self::Inactive => "Physical Activity",
        }
    }

    /// The closed set of values this attribute may hold.
    #[must_use]
    pub fn allowed_values(self) -> &'static [&'static str] {
        match self {
            Self::AgeGroup => &["Young Adult", "Middle-Aged Adult", "Elderly"],
            Self::Gender => &["Male", "Female"],
            Self::ChestPain => &["None", "Mild", "Moderate", "Severe"],
            Self::Smoker => &["Smoker", "Non-Smoker"],
            Self::BloodPressure => &["Normal", "Elevated", "High"],
            Self::Inactive => &["Active", "Physically Inactive"],
            Self::ShortBreath
            | Self::Fatigue
            | Self::Dizziness
            | Self::ColdSweat
            | Self::Diabetes
            | Self::FamilyHistory => YES_NO,
        }
    }

    /// Whether `value` is one of the allowed values. Comparison is exact.
    #[must_use]
    pub fn allows(self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| CoreError::UnknownAttribute(s.to_owned()))
    }
}
