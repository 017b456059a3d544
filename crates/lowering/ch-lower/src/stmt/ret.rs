//! Return lowering

use crate::lowerer::{current_scope, outside_method};
use crate::{Lowerer, TranslationContext};
use ch_blocks::{Block, BlockBuilder, Opcode};
use ch_diagnostics::CompilerError;
use ch_hir::ReturnStmt;

#[allow(
    clippy::multiple_inherent_impl,
    reason = "lowering is split by construct across modules"
)]
impl<'decl> Lowerer<'decl, '_> {
    /// Lowers `return`
    ///
    /// Emits, in order: the write of the return value (if any), the release
    /// of every local on the scope chain, and a stop of the running script.
    pub(super) fn lower_return(
        &mut self,
        ctx: TranslationContext<'decl>,
        ret: &ReturnStmt,
    ) -> Vec<Block> {
        let scope = current_scope(ctx);
        let mut blocks = Vec::new();

        if let Some(value) = &ret.value {
            let method = self.scopes.method().unwrap_or_else(|| outside_method());
            match method.return_type {
                Some(expected) => {
                    let found = self.infer_type(ctx, value);
                    if !expected.is_compatible(found) {
                        self.report(CompilerError::type_mismatch(expected, found, value.span()));
                    }
                    let value = self.lower_expression(ctx, value);
                    blocks.push(
                        BlockBuilder::new(Opcode::SetVariable)
                            .text(self.options.return_variable(&method.name))
                            .param(value)
                            .build(),
                    );
                }
                None => self.report(CompilerError::no_return_value(&method.name, value.span())),
            }
        }

        blocks.extend(self.scopes.unwind(scope, &self.options.stack_list));
        blocks.push(
            BlockBuilder::new(Opcode::Stop)
                .text("this script")
                .build(),
        );
        blocks
    }
}
