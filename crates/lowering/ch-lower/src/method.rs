//! Method lowering

use crate::{LowerOptions, Lowerer, ScopeTree, TranslationContext};
use ch_blocks::ProcedureDefinition;
use ch_diagnostics::Diagnostics;
use ch_hir::{DataType, MethodDeclaration};

/// Lowers a method into a custom block definition
///
/// The body runs in a fresh root scope whose locals are released at the end
/// of normal flow. `ctx` supplies the project and sprite; its scope, if any,
/// is replaced.
pub fn lower_method<'decl>(
    ctx: TranslationContext<'decl>,
    method: &'decl MethodDeclaration,
    options: &LowerOptions,
    diagnostics: &mut Diagnostics,
) -> ProcedureDefinition {
    log::debug!("lowering method `{}`", method.name);

    let mut scopes = ScopeTree::for_method(method);
    let root = scopes.create_root();
    let ctx = ctx.with_scope(root);

    let mut lowerer = Lowerer::new(scopes, diagnostics, options);
    let mut body = lowerer.lower_statements(ctx, &method.body);
    body.extend(lowerer.scopes().cleanup(root, &options.stack_list));

    ProcedureDefinition {
        name: method.name.clone(),
        spec: procedure_spec(method),
        params: method.params.iter().map(|param| param.name.clone()).collect(),
        defaults: method
            .params
            .iter()
            .map(|param| param.data_type.default_value())
            .collect(),
        atomic: method.atomic,
        body,
    }
}

/// Block spec of a method: its name followed by one input per parameter
#[must_use]
pub fn procedure_spec(method: &MethodDeclaration) -> String {
    let mut spec = method.name.clone();
    for param in &method.params {
        spec.push_str(match param.data_type {
            DataType::Number => " %n",
            DataType::Boolean => " %b",
            DataType::String | DataType::Object => " %s",
        });
    }
    spec
}
