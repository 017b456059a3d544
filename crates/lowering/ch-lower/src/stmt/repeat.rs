//! Bounded repetition, optionally unrolled

use crate::{Lowerer, TranslationContext};
use ch_blocks::{Block, BlockBuilder, Opcode};
use ch_diagnostics::CompilerError;
use ch_hir::{Literal, RepeatLoop};

#[allow(
    clippy::multiple_inherent_impl,
    reason = "lowering is split by construct across modules"
)]
impl<'decl> Lowerer<'decl, '_> {
    /// Lowers `repeat`
    ///
    /// The body is lowered once, in its own scope. An inline repeat needs a
    /// number literal as its count; the body is then copied `floor(count)`
    /// times instead of being wrapped in a loop.
    pub(super) fn lower_repeat(
        &mut self,
        ctx: TranslationContext<'decl>,
        repeat: &'decl RepeatLoop,
    ) -> Vec<Block> {
        let body = self.lower_nested(ctx, &repeat.body);

        if !repeat.inline {
            let count = self.lower_expression(ctx, &repeat.iterations);
            return BlockBuilder::new(Opcode::Repeat)
                .param(count)
                .body(body)
                .build_seq();
        }

        let count = match repeat.iterations.as_terminal().map(|terminal| &terminal.value) {
            Some(Literal::Number(count)) => count.floor(),
            _ => {
                self.report(CompilerError::invalid_argument(
                    "Loop cannot be inlined",
                    repeat.iterations.span(),
                ));
                return Vec::new();
            }
        };

        if count.is_nan() || count <= 0.0 {
            return Vec::new();
        }
        let limit = self.options.max_inline_repetitions;
        if count > f64::from(limit) {
            self.report(CompilerError::invalid_argument(
                format!("Loop cannot be inlined more than {limit} times"),
                repeat.iterations.span(),
            ));
            return Vec::new();
        }

        let times = count as usize;
        log::trace!("unrolling inline repeat {times} times");
        let mut unrolled = Vec::with_capacity(body.len() * times);
        for _ in 0..times {
            unrolled.extend(body.iter().cloned());
        }
        unrolled
    }
}
