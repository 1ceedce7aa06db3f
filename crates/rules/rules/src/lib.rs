pub mod corpus;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod ir;

pub use corpus::{builtin_engine, builtin_rules};
pub use engine::trace::{RuleEvaluationTrace, RuleTraceEntry, RuleTraceResult};
pub use engine::{DEFAULT_VERDICT, Evaluation, RuleEngine};
pub use error::RuleError;
pub use frontend::RuleFrontend;
pub use ir::expr::Expr;
pub use ir::rule::{Rule, RuleSource};
