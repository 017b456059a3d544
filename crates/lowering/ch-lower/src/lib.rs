//! Lowering from the program model to blocks
//!
//! Lowering is a single depth-first walk. Every call reads names through a
//! [`TranslationContext`], allocates nested scopes in a [`ScopeTree`], and
//! appends user errors to a [`Diagnostics`](ch_diagnostics::Diagnostics)
//! sink instead of failing. A construct that cannot be lowered produces an
//! empty block sequence or a [`Param::Empty`](ch_blocks::Param::Empty)
//! placeholder and the walk continues.

mod context;
mod expr;
mod globals;
mod lowerer;
mod method;
mod options;
mod scope;
mod stack;
mod stmt;

pub use context::TranslationContext;
pub use globals::{GlobalStorage, lower_global};
pub use lowerer::Lowerer;
pub use method::{lower_method, procedure_spec};
pub use options::LowerOptions;
pub use scope::{ScopeData, ScopeError, ScopeId, ScopeTree};
