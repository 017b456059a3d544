//! The lowering session

use crate::{LowerOptions, ScopeId, ScopeTree, TranslationContext};
use ch_blocks::Block;
use ch_const_eval::ConstEvaluator;
use ch_diagnostics::{CompilerError, Diagnostics, suggest};
use ch_hir::{Declaration, Statement};
use ch_span::FileSpan;

/// State shared by every lowering call for one method
///
/// Owns the method's [`ScopeTree`] and borrows the diagnostics sink, which
/// is passed in explicitly so callers decide how sinks are merged.
#[derive(Debug)]
pub struct Lowerer<'decl, 'sink> {
    pub(crate) scopes: ScopeTree<'decl>,
    diagnostics: &'sink mut Diagnostics,
    pub(crate) options: &'sink LowerOptions,
    pub(crate) evaluator: ConstEvaluator,
    /// Slots appended by the declaration currently being lowered
    pub(crate) pending_slots: u32,
    /// Drops reports while an expression is lowered again
    pub(crate) muted: bool,
}

impl<'decl, 'sink> Lowerer<'decl, 'sink> {
    /// Creates a session over `scopes`
    pub fn new(
        scopes: ScopeTree<'decl>,
        diagnostics: &'sink mut Diagnostics,
        options: &'sink LowerOptions,
    ) -> Self {
        Self {
            scopes,
            diagnostics,
            options,
            evaluator: ConstEvaluator::new(),
            pending_slots: 0,
            muted: false,
        }
    }

    /// The scope tree
    #[must_use]
    pub const fn scopes(&self) -> &ScopeTree<'decl> {
        &self.scopes
    }

    /// The scope tree, for creating scopes before lowering into them
    pub fn scopes_mut(&mut self) -> &mut ScopeTree<'decl> {
        &mut self.scopes
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &LowerOptions {
        self.options
    }

    /// Resolves `name` in `ctx`
    #[must_use]
    pub fn resolve(&self, ctx: TranslationContext<'decl>, name: &str) -> Option<Declaration<'decl>> {
        ctx.resolve(name, &self.scopes)
    }

    /// Lowers statements in order into one sequence
    pub fn lower_statements(
        &mut self,
        ctx: TranslationContext<'decl>,
        statements: &'decl [Statement],
    ) -> Vec<Block> {
        statements
            .iter()
            .flat_map(|statement| self.lower_statement(ctx, statement))
            .collect()
    }

    /// Lowers statements in a fresh child scope, then releases its locals
    pub fn lower_nested(
        &mut self,
        ctx: TranslationContext<'decl>,
        statements: &'decl [Statement],
    ) -> Vec<Block> {
        let parent = current_scope(ctx);
        let child = self.scopes.create_child(parent);
        let mut blocks = self.lower_statements(ctx.with_scope(child), statements);
        blocks.extend(self.scopes.cleanup(child, &self.options.stack_list));
        blocks
    }

    pub(crate) fn report(&mut self, error: CompilerError) {
        if self.muted {
            return;
        }
        log::trace!("{}: {}", error.kind, error.message);
        self.diagnostics.push(error);
    }

    pub(crate) fn report_not_defined(
        &mut self,
        ctx: TranslationContext<'decl>,
        name: &str,
        span: FileSpan,
    ) {
        let suggestions = suggest(name, ctx.visible_names(&self.scopes));
        self.report(CompilerError::not_defined(name, span, suggestions));
    }

    /// Slots between the end of the stack and the last slot of `name`
    pub(crate) fn stack_depth(&self, ctx: TranslationContext<'decl>, name: &str) -> u32 {
        let depth = self
            .scopes
            .stack_depth(current_scope(ctx), name)
            .unwrap_or_else(|| unresolved_local(name));
        depth + self.pending_slots
    }
}

/// Innermost scope of a context inside a method body
pub(crate) fn current_scope(ctx: TranslationContext<'_>) -> ScopeId<'_> {
    ctx.scope().unwrap_or_else(|| outside_method())
}

#[allow(clippy::panic, reason = "statements only exist inside method bodies")]
pub(crate) fn outside_method() -> ! {
    panic!("statement lowered without an enclosing method scope")
}

#[allow(clippy::panic, reason = "callers resolve the name through the same scope chain first")]
fn unresolved_local(name: &str) -> ! {
    panic!("stack local `{name}` resolved but has no stack slot")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch_diagnostics::ErrorKind;
    use ch_hir::{
        DataType, Expression, MethodDeclaration, ProjectDeclaration, ScopedArrayDeclaration,
        ScopedDeclaration, ScopedVarDeclaration,
    };
    use ch_span::{FileId, Span};
    use expect_test::expect;

    fn span() -> FileSpan {
        FileSpan::new(FileId::new(0), Span::new(0, 1))
    }

    fn body() -> Vec<Statement> {
        vec![
            Statement::Declare(ScopedDeclaration::Array(ScopedArrayDeclaration::new(
                "pair",
                DataType::Number,
                vec![Expression::number(1.0, span()), Expression::number(2.0, span())],
                span(),
            ))),
            Statement::Declare(ScopedDeclaration::Variable(ScopedVarDeclaration::new(
                "flag",
                DataType::Boolean,
                None,
                span(),
            ))),
        ]
    }

    #[test]
    fn test_nested_scope_releases_its_locals() {
        let body = body();
        let method = MethodDeclaration::new("run", Vec::new(), Vec::new(), span());
        let project = ProjectDeclaration::new("Game");
        let options = LowerOptions::default();
        let mut diagnostics = Diagnostics::new();

        let mut scopes = ScopeTree::for_method(&method);
        let root = scopes.create_root();
        let ctx = TranslationContext::new(&project).with_scope(root);
        let mut lowerer = Lowerer::new(scopes, &mut diagnostics, &options);
        let blocks = lowerer.lower_nested(ctx, &body);

        let rendered: String = blocks.iter().map(|block| format!("{block}\n")).collect();
        expect![[r#"
            append:toList:(1, "stack")
            append:toList:(2, "stack")
            append:toList:(false, "stack")
            deleteLine:ofList:("last", "stack")
            doRepeat(2, { deleteLine:ofList:("last", "stack") })
        "#]]
        .assert_eq(&rendered);
        assert!(lowerer.scopes().get(root).declarations().is_empty());
    }

    #[test]
    fn test_unknown_name_suggests_locals() {
        let body = body();
        let method = MethodDeclaration::new("run", Vec::new(), Vec::new(), span());
        let project = ProjectDeclaration::new("Game");
        let options = LowerOptions::default();
        let mut diagnostics = Diagnostics::new();

        let mut scopes = ScopeTree::for_method(&method);
        let root = scopes.create_root();
        let ctx = TranslationContext::new(&project).with_scope(root);
        let mut lowerer = Lowerer::new(scopes, &mut diagnostics, &options);
        let blocks = lowerer.lower_statements(ctx, &body);
        assert_eq!(blocks.len(), 3);
        lowerer.report_not_defined(ctx, "flga", span());

        assert_eq!(diagnostics.kinds(), vec![ErrorKind::NotDefined]);
        assert_eq!(diagnostics.as_slice()[0].suggestions, vec!["flag".to_string()]);
    }
}
