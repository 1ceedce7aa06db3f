use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cardio_core::{Attribute, PatientRecord};

/// The predicate AST for rule conditions.
///
/// Leaves compare one attribute of a [`PatientRecord`] against fixed values;
/// `All` and `Any` combine them. Every leaf evaluates to `false` when the
/// record holds no recognized value for its attribute, and no operator
/// negates a sub-expression, so malformed input can only suppress a match,
/// never produce one.
///
/// The tree is serializable so that rules can be stored and transferred as
/// JSON/YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Always true.
    Always,
    /// The attribute equals the value.
    Eq(Attribute, String),
    /// The attribute holds a recognized value different from this one.
    Ne(Attribute, String),
    /// The attribute equals one of the values.
    In(Attribute, Vec<String>),
    /// All sub-expressions must be true (logical AND over a list).
    All(Vec<Expr>),
    /// Any sub-expression must be true (logical OR over a list).
    Any(Vec<Expr>),
}

/// `attribute == value`
pub fn eq(attribute: Attribute, value: impl Into<String>) -> Expr {
    Expr::Eq(attribute, value.into())
}

/// `attribute != value`
pub fn ne(attribute: Attribute, value: impl Into<String>) -> Expr {
    Expr::Ne(attribute, value.into())
}

/// `attribute in [values]`
pub fn one_of<I, S>(attribute: Attribute, values: I) -> Expr
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Expr::In(attribute, values.into_iter().map(Into::into).collect())
}

/// Conjunction of `exprs`.
pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::All(exprs.into_iter().collect())
}

/// Disjunction of `exprs`.
pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Any(exprs.into_iter().collect())
}

impl Expr {
    /// Evaluate the predicate against a record.
    pub fn matches(&self, record: &PatientRecord) -> bool {
        match self {
            Self::Always => true,
            Self::Eq(attr, value) => record.recognized(*attr) == Some(value.as_str()),
            Self::Ne(attr, value) => record.recognized(*attr).is_some_and(|v| v != value),
            Self::In(attr, values) => record
                .recognized(*attr)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
            Self::All(exprs) => exprs.iter().all(|e| e.matches(record)),
            Self::Any(exprs) => exprs.iter().any(|e| e.matches(record)),
        }
    }

    /// The set of attributes this expression reads.
    pub fn attributes(&self) -> BTreeSet<Attribute> {
        let mut out = BTreeSet::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes(&self, out: &mut BTreeSet<Attribute>) {
        match self {
            Self::Always => {}
            Self::Eq(attr, _) | Self::Ne(attr, _) | Self::In(attr, _) => {
                out.insert(*attr);
            }
            Self::All(exprs) | Self::Any(exprs) => {
                for e in exprs {
                    e.collect_attributes(out);
                }
            }
        }
    }

    /// The first compared value that is not in its attribute's enumeration.
    ///
    /// A leaf comparing against such a value can never match a well-formed
    /// record, so rule loading rejects it.
    pub fn unknown_value(&self) -> Option<(Attribute, &str)> {
        match self {
            Self::Always => None,
            Self::Eq(attr, value) | Self::Ne(attr, value) => {
                (!attr.allows(value)).then_some((*attr, value.as_str()))
            }
            Self::In(attr, values) => values
                .iter()
                .find(|v| !attr.allows(v))
                .map(|v| (*attr, v.as_str())),
            Self::All(exprs) | Self::Any(exprs) => exprs.iter().find_map(Self::unknown_value),
        }
    }

    /// Returns a human-readable pseudo-code representation of the expression.
    pub fn to_source(&self) -> String {
        match self {
            Self::Always => "true".to_owned(),
            Self::Eq(attr, value) => format!("{attr} == {}", quote(value)),
            Self::Ne(attr, value) => format!("{attr} != {}", quote(value)),
            Self::In(attr, values) => {
                let inner = values
                    .iter()
                    .map(String::as_str)
                    .map(quote)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{attr} in [{inner}]")
            }
            Self::All(exprs) => {
                let inner = exprs
                    .iter()
                    .map(Self::to_source)
                    .collect::<Vec<_>>()
                    .join(" && ");
                format!("all({inner})")
            }
            Self::Any(exprs) => {
                let inner = exprs
                    .iter()
                    .map(Self::to_source)
                    .collect::<Vec<_>>()
                    .join(" || ");
                format!("any({inner})")
            }
        }
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}
