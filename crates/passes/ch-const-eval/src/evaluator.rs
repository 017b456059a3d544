//! Literal folding

use crate::ConstError;
use ch_hir::{CompoundOperator, Literal, UnaryOperator};
use ch_span::FileSpan;

/// Const expression evaluator
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstEvaluator;

impl ConstEvaluator {
    /// Creates a new const evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates a unary operation
    ///
    /// # Errors
    ///
    /// Returns `ConstError::InvalidUnaryOp` when the operand type does not fit.
    pub fn eval_unary_op(
        &self,
        op: UnaryOperator,
        operand: &Literal,
        span: FileSpan,
    ) -> Result<Literal, ConstError> {
        match (op, operand) {
            (UnaryOperator::Minus, Literal::Number(value)) => Ok(Literal::Number(0.0 - value)),
            (UnaryOperator::Not, Literal::Boolean(value)) => Ok(Literal::Boolean(!value)),
            _ => Err(ConstError::InvalidUnaryOp {
                op: op.to_string(),
                operand_type: operand.data_type().to_string(),
                span,
            }),
        }
    }

    /// Evaluates a binary operation
    ///
    /// # Errors
    ///
    /// Returns `ConstError::DivisionByZero` for `/` or `%` by zero, and
    /// `ConstError::InvalidBinaryOp` when the operand types are not folded.
    pub fn eval_binary_op(
        &self,
        op: CompoundOperator,
        left: &Literal,
        right: &Literal,
        span: FileSpan,
    ) -> Result<Literal, ConstError> {
        use CompoundOperator as Op;

        match (op, left, right) {
            (Op::Concat, _, _) => Ok(Literal::Text(format!("{left}{right}"))),

            (Op::Divide | Op::Modulo, Literal::Number(_), Literal::Number(divisor))
                if *divisor == 0.0 =>
            {
                Err(ConstError::DivisionByZero { span })
            }

            (Op::Add, Literal::Number(lhs), Literal::Number(rhs)) => Ok(Literal::Number(lhs + rhs)),
            (Op::Subtract, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Number(lhs - rhs))
            }
            (Op::Multiply, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Number(lhs * rhs))
            }
            (Op::Divide, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Number(lhs / rhs))
            }
            // Floored: the result takes the sign of the divisor
            (Op::Modulo, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Number(lhs - rhs * (lhs / rhs).floor()))
            }

            (Op::Equal, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Boolean(lhs == rhs))
            }
            (Op::NotEqual, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Boolean(lhs != rhs))
            }
            (Op::Less, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Boolean(lhs < rhs))
            }
            (Op::Greater, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Boolean(lhs > rhs))
            }
            (Op::LessEqual, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Boolean(lhs <= rhs))
            }
            (Op::GreaterEqual, Literal::Number(lhs), Literal::Number(rhs)) => {
                Ok(Literal::Boolean(lhs >= rhs))
            }

            (Op::Equal, Literal::Boolean(lhs), Literal::Boolean(rhs)) => {
                Ok(Literal::Boolean(lhs == rhs))
            }
            (Op::NotEqual, Literal::Boolean(lhs), Literal::Boolean(rhs)) => {
                Ok(Literal::Boolean(lhs != rhs))
            }
            (Op::And, Literal::Boolean(lhs), Literal::Boolean(rhs)) => {
                Ok(Literal::Boolean(*lhs && *rhs))
            }
            (Op::Or, Literal::Boolean(lhs), Literal::Boolean(rhs)) => {
                Ok(Literal::Boolean(*lhs || *rhs))
            }

            _ => Err(ConstError::InvalidBinaryOp {
                left_type: left.data_type().to_string(),
                op: op.to_string(),
                right_type: right.data_type().to_string(),
                span,
            }),
        }
    }
}
