use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The risk tier assigned to a patient record.
///
/// Variants are declared in tier order: rules producing `High` are evaluated
/// before `Moderate`, which are evaluated before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Verdict {
    High,
    Moderate,
    Low,
}

impl Verdict {
    /// Every verdict, in tier order.
    pub const ALL: [Self; 3] = [Self::High, Self::Moderate, Self::Low];

    /// Display form, e.g. `"High Risk"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High Risk",
            Self::Moderate => "Moderate Risk",
            Self::Low => "Low Risk",
        }
    }

    /// Position of this verdict's tier in evaluation order (0 is first).
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Moderate => 1,
            Self::Low => 2,
        }
    }

    /// The fixed advisory sentence paired with this verdict.
    #[must_use]
    pub fn advice(self) -> &'static str {
        match self {
            Self::High => {
                "Consult a cardiologist immediately. Follow a strict heart-healthy lifestyle."
            }
            Self::Moderate => "Schedule a medical checkup and improve lifestyle habits.",
            Self::Low => "Maintain healthy habits and regular checkups.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = CoreError;

    /// Accepts the display form or the bare tier name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let tier = match trimmed.rsplit_once(' ') {
            Some((tier, suffix)) if suffix.eq_ignore_ascii_case("risk") => tier.trim_end(),
            _ => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|v| {
                v.as_str()
                    .split(' ')
                    .next()
                    .is_some_and(|name| name.eq_ignore_ascii_case(tier))
            })
            .ok_or_else(|| CoreError::UnknownVerdict(s.to_owned()))
    }
}

impl TryFrom<String> for Verdict {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        verdict.as_str().to_owned()
    }
}
