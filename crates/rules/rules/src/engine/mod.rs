pub mod executor;
pub mod strict;
pub mod trace;

pub use executor::{DEFAULT_VERDICT, Evaluation, RuleEngine};
