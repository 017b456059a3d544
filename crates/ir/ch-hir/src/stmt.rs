//! Statement nodes

use crate::{Expression, ScopedDeclaration};
use ch_span::FileSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A statement inside a method body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Declares a stack-allocated local
    Declare(ScopedDeclaration),
    /// `name op value`
    Assign(VarAssignStmt),
    /// `repeat (n) { ... }`, optionally unrolled
    Repeat(RepeatLoop),
    /// `while (cond) { ... }`
    While(WhileLoop),
    /// `forever { ... }`
    Forever(ForeverLoop),
    /// `if (cond) { ... } else { ... }`
    If(IfStmt),
    /// `switch (subject) { case ...: ... default: ... }`
    Switch(SwitchStmt),
    /// `return;` or `return value;`
    Return(ReturnStmt),
    /// A nested `{ ... }` block
    Scope(ScopeStmt),
}

/// Assignment operators
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum AssignOperator {
    /// `=`
    Equals,
    /// `+=`
    AddEquals,
    /// `-=`
    MinusEquals,
    /// `.=`
    DotEquals,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
}

impl fmt::Display for AssignOperator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Equals => "=",
            Self::AddEquals => "+=",
            Self::MinusEquals => "-=",
            Self::DotEquals => ".=",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
        })
    }
}

/// An assignment operator together with its operand
///
/// Only `++` and `--` have no value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Assignment {
    /// `= value`
    Equals(Expression),
    /// `+= value`
    AddEquals(Expression),
    /// `-= value`
    MinusEquals(Expression),
    /// `.= value`
    DotEquals(Expression),
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
}

impl Assignment {
    /// The operator without its operand
    #[must_use]
    pub const fn operator(&self) -> AssignOperator {
        match self {
            Self::Equals(_) => AssignOperator::Equals,
            Self::AddEquals(_) => AssignOperator::AddEquals,
            Self::MinusEquals(_) => AssignOperator::MinusEquals,
            Self::DotEquals(_) => AssignOperator::DotEquals,
            Self::PlusPlus => AssignOperator::PlusPlus,
            Self::MinusMinus => AssignOperator::MinusMinus,
        }
    }

    /// The operand, if the operator takes one
    #[must_use]
    pub const fn value(&self) -> Option<&Expression> {
        match self {
            Self::Equals(value)
            | Self::AddEquals(value)
            | Self::MinusEquals(value)
            | Self::DotEquals(value) => Some(value),
            Self::PlusPlus | Self::MinusMinus => None,
        }
    }
}

/// Assignment to a named variable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarAssignStmt {
    /// Target name
    pub variable: String,
    /// Operator and operand
    pub assignment: Assignment,
    /// Source location
    pub span: FileSpan,
}

impl VarAssignStmt {
    /// Creates an assignment statement
    #[must_use]
    pub fn new(variable: impl Into<String>, assignment: Assignment, span: FileSpan) -> Self {
        Self {
            variable: variable.into(),
            assignment,
            span,
        }
    }
}

/// Bounded repetition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepeatLoop {
    /// Unroll at compile time instead of emitting a loop
    pub inline: bool,
    /// Number of iterations
    pub iterations: Expression,
    /// Loop body
    pub body: Vec<Statement>,
    /// Source location
    pub span: FileSpan,
}

/// Repetition while a condition holds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhileLoop {
    /// Loop condition, checked before each iteration
    pub condition: Expression,
    /// Loop body
    pub body: Vec<Statement>,
    /// Source location
    pub span: FileSpan,
}

/// Unbounded repetition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForeverLoop {
    /// Loop body
    pub body: Vec<Statement>,
    /// Source location
    pub span: FileSpan,
}

/// Two-way conditional
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    /// Condition
    pub condition: Expression,
    /// Statements run when the condition holds
    pub then_body: Vec<Statement>,
    /// Statements run otherwise; empty means no else branch
    pub else_body: Vec<Statement>,
    /// Source location
    pub span: FileSpan,
}

/// One `case` (or `default`) arm of a switch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseBlock {
    /// Conditions, all of which must hold
    pub conditions: Vec<Expression>,
    /// Arm body
    pub body: Vec<Statement>,
    /// Whether this is the `default` arm
    pub is_default: bool,
    /// Source location
    pub span: FileSpan,
}

/// Multi-way branch
///
/// The front-end has already turned each `case` label into a condition on
/// the subject, so the subject itself is kept only for provenance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    /// The switched-on expression
    pub subject: Expression,
    /// Arms in source order; only the last may be the default
    pub blocks: Vec<CaseBlock>,
    /// Source location
    pub span: FileSpan,
}

/// `return` with an optional value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    /// Returned value
    pub value: Option<Expression>,
    /// Source location
    pub span: FileSpan,
}

/// A nested block with its own scope
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopeStmt {
    /// Block body
    pub body: Vec<Statement>,
    /// Source location
    pub span: FileSpan,
}
