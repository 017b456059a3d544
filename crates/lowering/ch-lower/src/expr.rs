//! Expression lowering

use crate::stack;
use crate::{Lowerer, TranslationContext};
use ch_blocks::{BlockBuilder, Opcode, Param};
use ch_diagnostics::CompilerError;
use ch_hir::{
    ArrayLookupExpression, CompoundExpression, CompoundOperator, DataType, Declaration,
    Expression, LookupExpression, UnaryExpression, UnaryOperator,
};
use ch_span::FileSpan;

#[allow(
    clippy::multiple_inherent_impl,
    reason = "lowering is split by construct across modules"
)]
impl<'decl> Lowerer<'decl, '_> {
    /// Lowers an expression to a block parameter
    ///
    /// Unresolvable or misused names are reported and become
    /// [`Param::Empty`]; lowering never stops at an expression.
    pub fn lower_expression(&mut self, ctx: TranslationContext<'decl>, expr: &Expression) -> Param {
        match expr {
            Expression::Literal(terminal) => Param::Literal(terminal.value.clone()),
            Expression::Lookup(lookup) => self.lower_lookup(ctx, lookup),
            Expression::ArrayLookup(lookup) => self.lower_array_lookup(ctx, lookup),
            Expression::Unary(unary) => self.lower_unary(ctx, unary),
            Expression::Compound(compound) => self.lower_compound(ctx, compound),
        }
    }

    pub(crate) fn lower_lookup(
        &mut self,
        ctx: TranslationContext<'decl>,
        lookup: &LookupExpression,
    ) -> Param {
        let name = lookup.name.as_str();
        let Some(decl) = self.resolve(ctx, name) else {
            self.report_not_defined(ctx, name, lookup.span);
            return Param::Empty;
        };

        match decl {
            Declaration::Constant(constant) => Param::Literal(constant.value.clone()),
            Declaration::GlobalVariable(var) => BlockBuilder::new(Opcode::ReadVariable)
                .text(&var.name)
                .into(),
            Declaration::GlobalArray(array) => BlockBuilder::new(Opcode::ContentsOfList)
                .text(&array.name)
                .into(),
            Declaration::Parameter(param) => {
                let kind = if param.data_type == DataType::Boolean { "b" } else { "r" };
                BlockBuilder::new(Opcode::GetParam)
                    .text(&param.name)
                    .text(kind)
                    .into()
            }
            Declaration::ScopedVariable(var) if var.slots == 1 => {
                let depth = self.stack_depth(ctx, name);
                let stack_list = &self.options.stack_list;
                stack::read(stack::slot_index(depth, stack_list), stack_list)
            }
            Declaration::ScopedVariable(_) | Declaration::ScopedArray(_) | Declaration::Method(_) => {
                self.report(CompilerError::not_a_value(name, lookup.span));
                Param::Empty
            }
        }
    }

    fn lower_array_lookup(
        &mut self,
        ctx: TranslationContext<'decl>,
        lookup: &ArrayLookupExpression,
    ) -> Param {
        let name = lookup.array.as_str();
        let Some(decl) = self.resolve(ctx, name) else {
            self.report_not_defined(ctx, name, lookup.span);
            return Param::Empty;
        };

        match decl {
            Declaration::GlobalArray(array) => {
                let index = self.lower_expression(ctx, &lookup.index);
                BlockBuilder::new(Opcode::ItemOfList)
                    .param(index)
                    .text(&array.name)
                    .into()
            }
            Declaration::ScopedArray(array) => {
                let index = self.lower_expression(ctx, &lookup.index);
                let depth = self.stack_depth(ctx, name);
                let stack_list = &self.options.stack_list;
                let slot = stack::element_index(depth, array.len() as u32, index, stack_list);
                stack::read(slot, stack_list)
            }
            Declaration::Constant(_)
            | Declaration::GlobalVariable(_)
            | Declaration::Parameter(_)
            | Declaration::ScopedVariable(_)
            | Declaration::Method(_) => {
                self.report(CompilerError::not_an_array(name, lookup.span));
                Param::Empty
            }
        }
    }

    fn lower_unary(&mut self, ctx: TranslationContext<'decl>, unary: &UnaryExpression) -> Param {
        let operand = self.lower_expression(ctx, &unary.operand);
        match unary.operator {
            UnaryOperator::Minus => self.negate(operand, unary.span),
            UnaryOperator::Not => self.invert(operand, unary.span),
        }
    }

    fn lower_compound(
        &mut self,
        ctx: TranslationContext<'decl>,
        compound: &CompoundExpression,
    ) -> Param {
        let left = self.lower_expression(ctx, &compound.left);
        let right = self.lower_expression(ctx, &compound.right);
        self.combine(compound.operator, left, right, compound.span)
    }

    /// `0 - operand`, folded when the operand is a literal
    pub(crate) fn negate(&self, operand: Param, span: FileSpan) -> Param {
        if let Some(folded) = self.fold_unary(UnaryOperator::Minus, &operand, span) {
            return folded;
        }
        BlockBuilder::new(Opcode::Subtract)
            .number(0.0)
            .param(operand)
            .into()
    }

    /// `not operand`, folded when the operand is a literal
    pub(crate) fn invert(&self, operand: Param, span: FileSpan) -> Param {
        if let Some(folded) = self.fold_unary(UnaryOperator::Not, &operand, span) {
            return folded;
        }
        BlockBuilder::new(Opcode::Not).param(operand).into()
    }

    /// Applies a binary operator to lowered operands
    ///
    /// Operands stay in source order. `!=`, `<=` and `>=` have no opcode of
    /// their own and become `not` around `=`, `>` and `<`.
    pub(crate) fn combine(
        &self,
        operator: CompoundOperator,
        left: Param,
        right: Param,
        span: FileSpan,
    ) -> Param {
        if let Some(folded) = self.fold_binary(operator, &left, &right, span) {
            return folded;
        }

        let opcode = match operator {
            CompoundOperator::Add => Opcode::Add,
            CompoundOperator::Subtract => Opcode::Subtract,
            CompoundOperator::Multiply => Opcode::Multiply,
            CompoundOperator::Divide => Opcode::Divide,
            CompoundOperator::Modulo => Opcode::Modulo,
            CompoundOperator::Concat => Opcode::Concat,
            CompoundOperator::Equal | CompoundOperator::NotEqual => Opcode::Equal,
            CompoundOperator::Less | CompoundOperator::GreaterEqual => Opcode::LessThan,
            CompoundOperator::Greater | CompoundOperator::LessEqual => Opcode::GreaterThan,
            CompoundOperator::And => Opcode::And,
            CompoundOperator::Or => Opcode::Or,
        };
        let block: Param = BlockBuilder::new(opcode).param(left).param(right).into();

        match operator {
            CompoundOperator::NotEqual
            | CompoundOperator::LessEqual
            | CompoundOperator::GreaterEqual => BlockBuilder::new(Opcode::Not).param(block).into(),
            _ => block,
        }
    }

    fn fold_unary(&self, operator: UnaryOperator, operand: &Param, span: FileSpan) -> Option<Param> {
        if !self.options.fold_constants {
            return None;
        }
        let literal = operand.as_literal()?;
        self.evaluator
            .eval_unary_op(operator, literal, span)
            .ok()
            .map(Param::Literal)
    }

    fn fold_binary(
        &self,
        operator: CompoundOperator,
        left: &Param,
        right: &Param,
        span: FileSpan,
    ) -> Option<Param> {
        if !self.options.fold_constants {
            return None;
        }
        let (lhs, rhs) = (left.as_literal()?, right.as_literal()?);
        self.evaluator
            .eval_binary_op(operator, lhs, rhs, span)
            .ok()
            .map(Param::Literal)
    }

    /// Static type of an expression, without reporting anything
    ///
    /// Names that do not resolve are treated as [`DataType::Object`].
    pub fn infer_type(&self, ctx: TranslationContext<'decl>, expr: &Expression) -> DataType {
        match expr {
            Expression::Literal(terminal) => terminal.data_type(),
            Expression::Lookup(lookup) => match self.resolve(ctx, &lookup.name) {
                Some(Declaration::GlobalArray(_)) => DataType::String,
                Some(decl) => decl.data_type(),
                None => DataType::Object,
            },
            Expression::ArrayLookup(lookup) => self
                .resolve(ctx, &lookup.array)
                .map_or(DataType::Object, Declaration::data_type),
            Expression::Unary(unary) => match unary.operator {
                UnaryOperator::Minus => DataType::Number,
                UnaryOperator::Not => DataType::Boolean,
            },
            Expression::Compound(compound) => compound.operator.result_type(),
        }
    }
}
