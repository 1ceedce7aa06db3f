use crate::error::RuleError;
use crate::ir::rule::Rule;

/// Trait for rule frontends that parse rules from various formats.
///
/// Implementations provide parsing from specific file formats (YAML, JSON, etc.)
/// into the intermediate rule representation. The order of the returned rules
/// is their declaration order.
pub trait RuleFrontend: Send + Sync {
    /// Return the file extensions this frontend supports (e.g., `["yaml", "yml"]`).
    fn extensions(&self) -> &[&str];

    /// Parse rules from a string content.
    fn parse(&self, content: &str) -> Result<Vec<Rule>, RuleError>;

    /// Parse rules from a file path.
    ///
    /// The default implementation reads the file and delegates to [`parse`](Self::parse).
    fn parse_file(&self, path: &std::path::Path) -> Result<Vec<Rule>, RuleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuleError::Parse(format!("cannot read {}: {e}", path.display())))?;
        self.parse(&content)
    }
}
