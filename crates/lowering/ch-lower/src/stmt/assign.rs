//! Assignment lowering
//!
//! Stack locals and named globals share operator semantics but not opcodes:
//! locals are items of the stack list, globals are addressed by name.

use crate::stack;
use crate::{Lowerer, TranslationContext};
use ch_blocks::{Block, BlockBuilder, Opcode, Param};
use ch_diagnostics::CompilerError;
use ch_hir::{
    AssignOperator, Assignment, CompoundOperator, DataType, Declaration, Expression,
    GlobalVarDeclaration, LookupExpression, ScopedVarDeclaration, VarAssignStmt,
};
use ch_span::FileSpan;

#[allow(
    clippy::multiple_inherent_impl,
    reason = "lowering is split by construct across modules"
)]
impl<'decl> Lowerer<'decl, '_> {
    pub(super) fn lower_assignment(
        &mut self,
        ctx: TranslationContext<'decl>,
        stmt: &VarAssignStmt,
    ) -> Vec<Block> {
        let name = stmt.variable.as_str();
        let Some(target) = self.resolve(ctx, name) else {
            self.report_not_defined(ctx, name, stmt.span);
            return Vec::new();
        };

        match target {
            Declaration::ScopedVariable(var) if var.slots == 1 => {
                self.check_operator(stmt.assignment.operator(), var.data_type, stmt.span);
                self.assign_local(ctx, var, &stmt.assignment, stmt.span)
            }
            Declaration::GlobalVariable(var) => {
                self.check_operator(stmt.assignment.operator(), var.data_type, stmt.span);
                self.assign_global(ctx, var, &stmt.assignment, stmt.span)
            }
            Declaration::Constant(_) | Declaration::Parameter(_) => {
                self.report(CompilerError::readonly(name, stmt.span));
                Vec::new()
            }
            Declaration::ScopedVariable(_)
            | Declaration::ScopedArray(_)
            | Declaration::GlobalArray(_)
            | Declaration::Method(_) => {
                self.report(CompilerError::not_a_variable(name, stmt.span));
                Vec::new()
            }
        }
    }

    /// Reports an operator the target's type does not support
    ///
    /// Code is still generated afterwards.
    fn check_operator(&mut self, operator: AssignOperator, target: DataType, span: FileSpan) {
        let required = match operator {
            AssignOperator::Equals => return,
            AssignOperator::AddEquals
            | AssignOperator::MinusEquals
            | AssignOperator::PlusPlus
            | AssignOperator::MinusMinus => DataType::Number,
            AssignOperator::DotEquals => DataType::String,
        };
        if !required.is_compatible(target) {
            self.report(CompilerError::operator_mismatch(operator, target, span));
        }
    }

    fn assign_local(
        &mut self,
        ctx: TranslationContext<'decl>,
        var: &ScopedVarDeclaration,
        assignment: &Assignment,
        span: FileSpan,
    ) -> Vec<Block> {
        let depth = self.stack_depth(ctx, &var.name);
        let index = stack::slot_index(depth, &self.options.stack_list);

        let value = match assignment {
            Assignment::Equals(value) => self.lower_expression(ctx, value),
            Assignment::DotEquals(value) => self.concat_current(ctx, &var.name, value, span),
            Assignment::AddEquals(_)
            | Assignment::MinusEquals(_)
            | Assignment::PlusPlus
            | Assignment::MinusMinus => {
                let delta = self.lower_delta(ctx, assignment, span);
                let current = stack::read(index.clone(), &self.options.stack_list);
                self.combine(CompoundOperator::Add, current, delta, span)
            }
        };
        vec![stack::write(index, value, &self.options.stack_list)]
    }

    fn assign_global(
        &mut self,
        ctx: TranslationContext<'decl>,
        var: &GlobalVarDeclaration,
        assignment: &Assignment,
        span: FileSpan,
    ) -> Vec<Block> {
        let (opcode, value) = match assignment {
            Assignment::Equals(value) => (Opcode::SetVariable, self.lower_expression(ctx, value)),
            Assignment::DotEquals(value) => (
                Opcode::SetVariable,
                self.concat_current(ctx, &var.name, value, span),
            ),
            Assignment::AddEquals(_)
            | Assignment::MinusEquals(_)
            | Assignment::PlusPlus
            | Assignment::MinusMinus => (
                Opcode::ChangeVariable,
                self.lower_delta(ctx, assignment, span),
            ),
        };
        BlockBuilder::new(opcode)
            .text(&var.name)
            .param(value)
            .build_seq()
    }

    /// `current . value`, reading the target through an ordinary lookup
    fn concat_current(
        &mut self,
        ctx: TranslationContext<'decl>,
        name: &str,
        value: &Expression,
        span: FileSpan,
    ) -> Param {
        let lookup = LookupExpression {
            name: name.to_string(),
            span,
        };
        let current = self.lower_lookup(ctx, &lookup);
        let value = self.lower_expression(ctx, value);
        self.combine(CompoundOperator::Concat, current, value, span)
    }

    fn lower_delta(
        &mut self,
        ctx: TranslationContext<'decl>,
        assignment: &Assignment,
        span: FileSpan,
    ) -> Param {
        match assignment {
            Assignment::AddEquals(value) => self.lower_expression(ctx, value),
            Assignment::MinusEquals(value) => {
                let value = self.lower_expression(ctx, value);
                self.negate(value, span)
            }
            Assignment::PlusPlus => Param::number(1.0),
            Assignment::MinusMinus => Param::number(-1.0),
            Assignment::Equals(_) | Assignment::DotEquals(_) => non_stepping(assignment),
        }
    }
}

#[allow(clippy::panic, reason = "callers only pass stepping operators")]
fn non_stepping(assignment: &Assignment) -> ! {
    panic!("`{}` has no step amount", assignment.operator())
}
