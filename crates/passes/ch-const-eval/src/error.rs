//! Const evaluation errors

use ch_span::FileSpan;
use thiserror::Error;

/// Reasons an expression could not be folded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstError {
    /// Division or modulo by zero
    #[error("division by zero")]
    DivisionByZero {
        /// Location of the division operation
        span: FileSpan,
    },

    /// Operator not folded for these operand types
    #[error("invalid binary operation: {left_type} {op} {right_type}")]
    InvalidBinaryOp {
        /// Left operand type
        left_type: String,
        /// Operator
        op: String,
        /// Right operand type
        right_type: String,
        /// Location of the operation
        span: FileSpan,
    },

    /// Operator not folded for this operand type
    #[error("invalid unary operation: {op} {operand_type}")]
    InvalidUnaryOp {
        /// Operator
        op: String,
        /// Operand type
        operand_type: String,
        /// Location of the operation
        span: FileSpan,
    },
}
