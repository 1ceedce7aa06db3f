use thiserror::Error;

use cardio_core::{Attribute, CoreError};

/// Errors that can occur while loading rules or classifying strictly.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A parse error when loading rules from a frontend.
    #[error("parse error: {0}")]
    Parse(String),

    /// A rule compares an attribute against a value outside its enumeration.
    #[error("rule {rule} compares {attribute} against unknown value {value:?}")]
    UnknownValue {
        /// Name of the offending rule.
        rule: String,
        /// The attribute being compared.
        attribute: Attribute,
        /// The value that is not in the attribute's enumeration.
        value: String,
    },

    /// Two rules share a name.
    #[error("duplicate rule name: {0}")]
    DuplicateRule(String),

    /// A record failed strict validation.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] CoreError),
}
