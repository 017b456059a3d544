//! Compile-time constant evaluation
//!
//! Folds operators whose operands are literals. Used by expression lowering
//! so that `-5`, `2 * 3` or `"a" . "b"` reach the IR as a single literal.
//! Anything whose runtime result could differ from a naive evaluation (text
//! comparison is case-insensitive at runtime, division by zero yields
//! infinity) is left for the runtime.

mod error;
mod evaluator;

pub use error::ConstError;
pub use evaluator::ConstEvaluator;
