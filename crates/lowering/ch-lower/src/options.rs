//! Lowering options

use serde::{Deserialize, Serialize};

/// Knobs that change the shape of the emitted blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowerOptions {
    /// Name of the list that holds stack-allocated locals
    pub stack_list: String,

    /// Prefix of the per-method variable that carries a return value
    pub return_variable_prefix: String,

    /// Fold operators whose operands are literals
    pub fold_constants: bool,

    /// Largest repetition count an inline repeat may unroll
    pub max_inline_repetitions: u32,
}

impl LowerOptions {
    /// Name of the variable a method's return value is written to
    #[must_use]
    pub fn return_variable(&self, method: &str) -> String {
        format!("{}{method}", self.return_variable_prefix)
    }
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            stack_list: "stack".to_string(),
            return_variable_prefix: "return ".to_string(),
            fold_constants: true,
            max_inline_repetitions: 10_000,
        }
    }
}
