use serde::Deserialize;

/// Top-level YAML rule file containing a list of rules.
#[derive(Debug, Deserialize)]
pub struct YamlRuleFile {
    /// The rules defined in this file, in declaration order.
    pub rules: Vec<YamlRule>,
}

/// A single rule as represented in YAML.
#[derive(Debug, Deserialize)]
pub struct YamlRule {
    /// A unique name for the rule.
    pub name: String,
    /// Optional description of what this rule encodes.
    pub description: Option<String>,
    /// The verdict, either short (`high`) or long (`High Risk`).
    pub verdict: String,
    /// The condition that must hold for the rule to fire.
    pub condition: YamlCondition,
}

/// A condition expression that can combine multiple predicates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum YamlCondition {
    /// All sub-predicates must be true (logical AND).
    All {
        /// The list of predicates that must all hold.
        all: Vec<YamlPredicate>,
    },
    /// Any sub-predicate must be true (logical OR).
    Any {
        /// The list of predicates where at least one must hold.
        any: Vec<YamlPredicate>,
    },
    /// A single predicate used directly as a condition.
    Single(Box<YamlPredicate>),
}

/// A single predicate within a condition.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum YamlPredicate {
    /// Compare a record attribute.
    FieldCheck {
        /// Attribute wire name (e.g. `chest_pain`).
        field: String,
        /// The comparison operation to apply.
        #[serde(flatten)]
        op: YamlFieldOp,
    },
    /// A nested condition (allows recursive `all` / `any` grouping).
    Nested(Box<YamlCondition>),
}

/// Describes which comparison operator to apply to an attribute.
///
/// If several fields are set, they are combined with logical AND during
/// compilation.
#[derive(Debug, Deserialize)]
pub struct YamlFieldOp {
    /// Equals comparison.
    pub eq: Option<String>,
    /// Not-equals comparison.
    pub ne: Option<String>,
    /// Membership test against a list of values.
    #[serde(rename = "in")]
    pub in_list: Option<Vec<String>>,
}
