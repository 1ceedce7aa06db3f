use serde::{Deserialize, Serialize};

use crate::verdict::Verdict;

/// What the engine hands back to a caller: the verdict, its advisory text,
/// and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// The assigned risk tier.
    pub verdict: Verdict,
    /// The fixed advisory sentence for the verdict.
    pub advice: String,
    /// Name of the first matching rule. `None` when no rule matched and the
    /// default verdict was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,
}

impl Diagnosis {
    /// Pair a verdict with its advisory text.
    #[must_use]
    pub fn new(verdict: Verdict, matched_rule: Option<String>) -> Self {
        Self {
            verdict,
            advice: verdict.advice().to_owned(),
            matched_rule,
        }
    }

    /// Whether the verdict came from the default fallback.
    pub fn is_default(&self) -> bool {
        self.matched_rule.is_none()
    }
}
