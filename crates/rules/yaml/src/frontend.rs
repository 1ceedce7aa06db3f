use std::path::Path;

use cardio_core::{Attribute, CoreError, Verdict};
use cardio_rules::ir::expr::Expr;
use cardio_rules::ir::rule::{Rule, RuleSource};
use cardio_rules::{RuleError, RuleFrontend};

use crate::parser::{YamlCondition, YamlFieldOp, YamlPredicate, YamlRule, YamlRuleFile};

/// A [`RuleFrontend`] implementation that parses YAML rule files and compiles
/// them into the Cardio predicate IR.
pub struct YamlFrontend;

impl RuleFrontend for YamlFrontend {
    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, content: &str) -> Result<Vec<Rule>, RuleError> {
        let file: YamlRuleFile = serde_yaml_ng::from_str(content)
            .map_err(|e| RuleError::Parse(format!("YAML parse error: {e}")))?;

        file.rules
            .into_iter()
            .map(|yaml_rule| compile_rule(yaml_rule, None))
            .collect()
    }

    fn parse_file(&self, path: &Path) -> Result<Vec<Rule>, RuleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuleError::Parse(format!("cannot read {}: {e}", path.display())))?;

        let file: YamlRuleFile = serde_yaml_ng::from_str(&content).map_err(|e| {
            RuleError::Parse(format!("YAML parse error in {}: {e}", path.display()))
        })?;

        file.rules
            .into_iter()
            .map(|yaml_rule| compile_rule(yaml_rule, Some(path)))
            .collect()
    }
}

/// Compile a single `YamlRule` into the IR `Rule`.
fn compile_rule(yaml: YamlRule, file: Option<&Path>) -> Result<Rule, RuleError> {
    let condition = compile_condition(&yaml.condition)
        .map_err(|e| RuleError::Parse(format!("rule {}: {e}", yaml.name)))?;
    let verdict: Verdict = yaml
        .verdict
        .parse()
        .map_err(|e| RuleError::Parse(format!("rule {}: {e}", yaml.name)))?;
    let source = RuleSource::Yaml {
        file: file.map(|p| p.display().to_string()),
    };

    Ok(Rule {
        name: yaml.name,
        description: yaml.description,
        condition,
        verdict,
        source,
    })
}

/// Compile a `YamlCondition` into an `Expr`.
fn compile_condition(cond: &YamlCondition) -> Result<Expr, String> {
    match cond {
        YamlCondition::All { all } => {
            let exprs: Result<Vec<Expr>, String> = all.iter().map(compile_predicate).collect();
            Ok(Expr::All(exprs?))
        }
        YamlCondition::Any { any } => {
            let exprs: Result<Vec<Expr>, String> = any.iter().map(compile_predicate).collect();
            Ok(Expr::Any(exprs?))
        }
        YamlCondition::Single(pred) => compile_predicate(pred.as_ref()),
    }
}

/// Compile a `YamlPredicate` into an `Expr`.
fn compile_predicate(pred: &YamlPredicate) -> Result<Expr, String> {
    match pred {
        YamlPredicate::FieldCheck { field, op } => {
            let attribute: Attribute = field.parse().map_err(|e: CoreError| e.to_string())?;
            compile_field_op(attribute, op)
        }
        YamlPredicate::Nested(inner) => compile_condition(inner.as_ref()),
    }
}

/// Compile a `YamlFieldOp` into comparisons against `attribute`.
///
/// Multiple operators are combined with logical AND.
fn compile_field_op(attribute: Attribute, op: &YamlFieldOp) -> Result<Expr, String> {
    let mut checks: Vec<Expr> = Vec::new();

    if let Some(ref val) = op.eq {
        checks.push(Expr::Eq(attribute, val.clone()));
    }
    if let Some(ref val) = op.ne {
        checks.push(Expr::Ne(attribute, val.clone()));
    }
    if let Some(ref vals) = op.in_list {
        checks.push(Expr::In(attribute, vals.clone()));
    }

    match checks.len() {
        0 => Err(format!("field {attribute} has no comparison operator")),
        1 => Ok(checks.swap_remove(0)),
        _ => Ok(Expr::All(checks)),
    }
}
