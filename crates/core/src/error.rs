use thiserror::Error;

use crate::attribute::Attribute;

/// Errors raised while building or validating core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A record does not carry a value for the attribute.
    #[error("missing attribute: {0}")]
    MissingAttribute(Attribute),

    /// A record carries a value outside the attribute's enumeration.
    #[error("invalid value for {attribute}: {value:?}")]
    InvalidValue {
        /// The attribute holding the value.
        attribute: Attribute,
        /// The offending value.
        value: String,
    },

    /// A field name does not correspond to any attribute.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Text that does not name a verdict.
    #[error("unknown verdict: {0}")]
    UnknownVerdict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CoreError::MissingAttribute(Attribute::ChestPain);
        assert_eq!(err.to_string(), "missing attribute: chest_pain");

        let err = CoreError::InvalidValue {
            attribute: Attribute::Smoker,
            value: "Sometimes".into(),
        };
        assert_eq!(err.to_string(), "invalid value for smoker: \"Sometimes\"");

        let err = CoreError::UnknownAttribute("bmi".into());
        assert_eq!(err.to_string(), "unknown attribute: bmi");

        let err = CoreError::UnknownVerdict("Extreme Risk".into());
        assert_eq!(err.to_string(), "unknown verdict: Extreme Risk");
    }
}
