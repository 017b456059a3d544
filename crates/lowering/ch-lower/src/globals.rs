//! Storage for project and sprite globals

use ch_blocks::{List, Variable};
use ch_diagnostics::{CompilerError, Diagnostics};
use ch_hir::{DataType, GlobalDeclaration, Literal};
use ch_span::FileSpan;

/// Named storage a global declaration needs
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalStorage {
    /// A variable
    Variable(Variable),
    /// A list
    List(List),
}

/// Lowers a project or sprite declaration to its storage
///
/// Constants need no storage and return `None`. A variable without an
/// initializer starts at its type's default. An initializer of the wrong
/// type is reported but still used.
pub fn lower_global(decl: &GlobalDeclaration, diagnostics: &mut Diagnostics) -> Option<GlobalStorage> {
    match decl {
        GlobalDeclaration::Constant(constant) => {
            check_literal(constant.data_type, &constant.value, constant.span, diagnostics);
            None
        }
        GlobalDeclaration::Variable(var) => {
            let value = match &var.value {
                Some(value) => {
                    check_literal(var.data_type, value, var.span, diagnostics);
                    value.clone()
                }
                None => var.data_type.default_value(),
            };
            Some(GlobalStorage::Variable(Variable::new(&var.name, value)))
        }
        GlobalDeclaration::Array(array) => {
            for item in &array.items {
                check_literal(array.data_type, item, array.span, diagnostics);
            }
            Some(GlobalStorage::List(List::new(&array.name, array.items.clone())))
        }
    }
}

fn check_literal(
    expected: DataType,
    value: &Literal,
    span: FileSpan,
    diagnostics: &mut Diagnostics,
) {
    let found = value.data_type();
    if !expected.is_compatible(found) {
        diagnostics.push(CompilerError::type_mismatch(expected, found, span));
    }
}
