//! High-level program model consumed by lowering
//!
//! The front-end hands over a [`ProjectDeclaration`] whose sprites, methods,
//! statements and expressions already carry resolved lexical structure and a
//! [`FileSpan`](ch_span::FileSpan) for diagnostics. Nothing here is mutated
//! during lowering.

mod decl;
mod expr;
mod item;
mod stmt;
mod ty;

pub use decl::{
    ConstDeclaration, Declaration, DeclarationInfo, GlobalArrayDeclaration, GlobalDeclaration,
    GlobalVarDeclaration, ParamDeclaration, ScopedArrayDeclaration, ScopedDeclaration,
    ScopedVarDeclaration,
};
pub use expr::{
    ArrayLookupExpression, CompoundExpression, CompoundOperator, Expression, LookupExpression,
    TerminalExpression, UnaryExpression, UnaryOperator,
};
pub use item::{MethodDeclaration, ProjectDeclaration, SpriteDeclaration};
pub use stmt::{
    AssignOperator, Assignment, CaseBlock, ForeverLoop, IfStmt, RepeatLoop, ReturnStmt,
    ScopeStmt, Statement, SwitchStmt, VarAssignStmt, WhileLoop,
};
pub use ty::{DataType, Literal, format_number};
