//! Switch lowering into nested conditionals

use crate::{Lowerer, TranslationContext};
use ch_blocks::{Block, BlockBuilder, Opcode, Param};
use ch_hir::{CaseBlock, CompoundOperator, Literal, SwitchStmt};

#[allow(
    clippy::multiple_inherent_impl,
    reason = "lowering is split by construct across modules"
)]
impl<'decl> Lowerer<'decl, '_> {
    /// Lowers `switch` into an if/else chain
    ///
    /// `[A, B, default D]` becomes `if A then .. else (if B then .. else D)`.
    /// Without a trailing default the innermost conditional has no else.
    pub(super) fn lower_switch(
        &mut self,
        ctx: TranslationContext<'decl>,
        switch: &'decl SwitchStmt,
    ) -> Vec<Block> {
        self.lower_cases(ctx, &switch.blocks)
    }

    fn lower_cases(
        &mut self,
        ctx: TranslationContext<'decl>,
        cases: &'decl [CaseBlock],
    ) -> Vec<Block> {
        let Some((case, rest)) = cases.split_first() else {
            return Vec::new();
        };

        if rest.is_empty() && case.is_default {
            return self.lower_nested(ctx, &case.body);
        }

        let condition = self.lower_conditions(ctx, case);
        let body = self.lower_nested(ctx, &case.body);
        if rest.is_empty() {
            return BlockBuilder::new(Opcode::IfThen)
                .param(condition)
                .body(body)
                .build_seq();
        }

        let otherwise = self.lower_cases(ctx, rest);
        BlockBuilder::new(Opcode::IfThenElse)
            .param(condition)
            .body(body)
            .body(otherwise)
            .build_seq()
    }

    /// Right-associative AND of a case's conditions, in listed order
    ///
    /// A case with no conditions always matches.
    fn lower_conditions(&mut self, ctx: TranslationContext<'decl>, case: &CaseBlock) -> Param {
        let conditions: Vec<Param> = case
            .conditions
            .iter()
            .map(|condition| self.lower_expression(ctx, condition))
            .collect();

        conditions
            .into_iter()
            .rev()
            .reduce(|rhs, lhs| self.combine(CompoundOperator::And, lhs, rhs, case.span))
            .unwrap_or(Param::Literal(Literal::Boolean(true)))
    }
}
