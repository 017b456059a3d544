//! Expression nodes

use crate::{DataType, Literal};
use ch_span::FileSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An expression
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A literal value
    Literal(TerminalExpression),
    /// A name used as a value
    Lookup(LookupExpression),
    /// `name[index]`
    ArrayLookup(ArrayLookupExpression),
    /// A prefix operator applied to one operand
    Unary(UnaryExpression),
    /// A binary operator applied to two operands
    Compound(CompoundExpression),
}

impl Expression {
    /// A number literal
    #[must_use]
    pub const fn number(value: f64, span: FileSpan) -> Self {
        Self::Literal(TerminalExpression {
            value: Literal::Number(value),
            span,
        })
    }

    /// A string literal
    #[must_use]
    pub fn text(value: impl Into<String>, span: FileSpan) -> Self {
        Self::Literal(TerminalExpression {
            value: Literal::Text(value.into()),
            span,
        })
    }

    /// A boolean literal
    #[must_use]
    pub const fn boolean(value: bool, span: FileSpan) -> Self {
        Self::Literal(TerminalExpression {
            value: Literal::Boolean(value),
            span,
        })
    }

    /// A name lookup
    #[must_use]
    pub fn lookup(name: impl Into<String>, span: FileSpan) -> Self {
        Self::Lookup(LookupExpression {
            name: name.into(),
            span,
        })
    }

    /// An element of an array
    #[must_use]
    pub fn array_lookup(array: impl Into<String>, index: Self, span: FileSpan) -> Self {
        Self::ArrayLookup(ArrayLookupExpression {
            array: array.into(),
            index: Box::new(index),
            span,
        })
    }

    /// A unary operation
    #[must_use]
    pub fn unary(operator: UnaryOperator, operand: Self, span: FileSpan) -> Self {
        Self::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
            span,
        })
    }

    /// A binary operation
    #[must_use]
    pub fn compound(operator: CompoundOperator, left: Self, right: Self, span: FileSpan) -> Self {
        Self::Compound(CompoundExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }

    /// Source location of the whole expression
    #[must_use]
    pub const fn span(&self) -> FileSpan {
        match self {
            Self::Literal(TerminalExpression { span, .. })
            | Self::Lookup(LookupExpression { span, .. })
            | Self::ArrayLookup(ArrayLookupExpression { span, .. })
            | Self::Unary(UnaryExpression { span, .. })
            | Self::Compound(CompoundExpression { span, .. }) => *span,
        }
    }

    /// The literal, if this is a terminal expression
    #[must_use]
    pub const fn as_terminal(&self) -> Option<&TerminalExpression> {
        match self {
            Self::Literal(terminal) => Some(terminal),
            _ => None,
        }
    }
}

/// A literal expression
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminalExpression {
    /// The literal value
    pub value: Literal,
    /// Source location
    pub span: FileSpan,
}

impl TerminalExpression {
    /// Static type of the literal
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.value.data_type()
    }
}

/// A name used as a value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupExpression {
    /// Name being looked up
    pub name: String,
    /// Source location
    pub span: FileSpan,
}

/// `array[index]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayLookupExpression {
    /// Name of the array
    pub array: String,
    /// 1-based element index
    pub index: Box<Expression>,
    /// Source location
    pub span: FileSpan,
}

/// Prefix operators
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// `-x`
    Minus,
    /// `!x`
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Minus => "-",
            Self::Not => "!",
        })
    }
}

/// A unary operation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub operand: Box<Expression>,
    /// Source location
    pub span: FileSpan,
}

/// Binary operators
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum CompoundOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `.` (string concatenation)
    Concat,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl CompoundOperator {
    /// Type of the value the operator produces
    #[must_use]
    pub const fn result_type(self) -> DataType {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo => {
                DataType::Number
            }
            Self::Concat => DataType::String,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual
            | Self::And
            | Self::Or => DataType::Boolean,
        }
    }
}

impl fmt::Display for CompoundOperator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Concat => ".",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        })
    }
}

/// A binary operation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompoundExpression {
    /// The operator
    pub operator: CompoundOperator,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
    /// Source location
    pub span: FileSpan,
}
