//! Statement lowering
//!
//! Each statement lowers to an ordered block sequence. Statements that fail
//! to lower report why and produce an empty sequence.

mod assign;
mod repeat;
mod ret;
mod switch;

use crate::lowerer::current_scope;
use crate::stack;
use crate::{Lowerer, ScopeError, TranslationContext};
use ch_blocks::{Block, BlockBuilder, Opcode, Param};
use ch_diagnostics::CompilerError;
use ch_hir::{
    DataType, DeclarationInfo as _, Expression, ForeverLoop, IfStmt, ScopedArrayDeclaration,
    ScopedDeclaration, ScopedVarDeclaration, Statement, WhileLoop,
};

#[allow(
    clippy::multiple_inherent_impl,
    reason = "lowering is split by construct across modules"
)]
impl<'decl> Lowerer<'decl, '_> {
    /// Lowers one statement
    pub fn lower_statement(
        &mut self,
        ctx: TranslationContext<'decl>,
        statement: &'decl Statement,
    ) -> Vec<Block> {
        match statement {
            Statement::Declare(decl) => self.lower_declaration(ctx, decl),
            Statement::Assign(assign) => self.lower_assignment(ctx, assign),
            Statement::Repeat(repeat) => self.lower_repeat(ctx, repeat),
            Statement::While(while_loop) => self.lower_while(ctx, while_loop),
            Statement::Forever(forever) => self.lower_forever(ctx, forever),
            Statement::If(if_stmt) => self.lower_if(ctx, if_stmt),
            Statement::Switch(switch) => self.lower_switch(ctx, switch),
            Statement::Return(ret) => self.lower_return(ctx, ret),
            Statement::Scope(scope) => self.lower_nested(ctx, &scope.body),
        }
    }

    /// Allocates a local on the stack and registers it in the current scope
    ///
    /// Initializers are lowered before the name is registered, so they see
    /// any outer binding of the same name.
    fn lower_declaration(
        &mut self,
        ctx: TranslationContext<'decl>,
        decl: &'decl ScopedDeclaration,
    ) -> Vec<Block> {
        let blocks = match decl {
            ScopedDeclaration::Variable(var) => self.allocate_variable(ctx, var),
            ScopedDeclaration::Array(array) => self.allocate_array(ctx, array),
        };
        self.pending_slots = 0;

        match self.scopes.declare(current_scope(ctx), decl) {
            Ok(()) => blocks,
            Err(ScopeError::DuplicateDeclaration { first, .. }) => {
                self.report(
                    CompilerError::duplicate_declaration(decl.name(), decl.span())
                        .with_previous(first),
                );
                Vec::new()
            }
        }
    }

    fn allocate_variable(
        &mut self,
        ctx: TranslationContext<'decl>,
        var: &ScopedVarDeclaration,
    ) -> Vec<Block> {
        if let Some(value) = &var.value {
            self.check_initializer(ctx, var.data_type, value);
        }

        // Stack reads shift with each pushed slot, so the initializer is
        // lowered per slot and reported only once
        let mut blocks = Vec::with_capacity(var.slots as usize);
        for slot in 0..var.slots {
            self.pending_slots = slot;
            self.muted = slot > 0;
            let value = match &var.value {
                Some(value) => self.lower_expression(ctx, value),
                None => Param::Literal(var.data_type.default_value()),
            };
            blocks.push(stack::push(value, &self.options.stack_list));
        }
        self.muted = false;
        blocks
    }

    fn allocate_array(
        &mut self,
        ctx: TranslationContext<'decl>,
        array: &ScopedArrayDeclaration,
    ) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(array.len());
        for (slot, item) in array.items().iter().enumerate() {
            self.check_initializer(ctx, array.data_type(), item);
            self.pending_slots = slot as u32;
            let value = self.lower_expression(ctx, item);
            blocks.push(stack::push(value, &self.options.stack_list));
        }
        blocks
    }

    fn check_initializer(
        &mut self,
        ctx: TranslationContext<'decl>,
        expected: DataType,
        value: &Expression,
    ) {
        let found = self.infer_type(ctx, value);
        if !expected.is_compatible(found) {
            self.report(CompilerError::type_mismatch(expected, found, value.span()));
        }
    }

    fn lower_if(&mut self, ctx: TranslationContext<'decl>, if_stmt: &'decl IfStmt) -> Vec<Block> {
        let condition = self.lower_expression(ctx, &if_stmt.condition);
        let then_body = self.lower_nested(ctx, &if_stmt.then_body);
        if if_stmt.else_body.is_empty() {
            return BlockBuilder::new(Opcode::IfThen)
                .param(condition)
                .body(then_body)
                .build_seq();
        }

        let else_body = self.lower_nested(ctx, &if_stmt.else_body);
        BlockBuilder::new(Opcode::IfThenElse)
            .param(condition)
            .body(then_body)
            .body(else_body)
            .build_seq()
    }

    /// `while (c)` runs until `not c`
    fn lower_while(
        &mut self,
        ctx: TranslationContext<'decl>,
        while_loop: &'decl WhileLoop,
    ) -> Vec<Block> {
        let condition = self.lower_expression(ctx, &while_loop.condition);
        let until = self.invert(condition, while_loop.condition.span());
        let body = self.lower_nested(ctx, &while_loop.body);
        BlockBuilder::new(Opcode::RepeatUntil)
            .param(until)
            .body(body)
            .build_seq()
    }

    fn lower_forever(
        &mut self,
        ctx: TranslationContext<'decl>,
        forever: &'decl ForeverLoop,
    ) -> Vec<Block> {
        let body = self.lower_nested(ctx, &forever.body);
        BlockBuilder::new(Opcode::Forever).body(body).build_seq()
    }
}
