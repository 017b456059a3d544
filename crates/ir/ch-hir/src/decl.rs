//! Declarations of named bindings
//!
//! Owned declarations live in the tier that introduced them: the project,
//! a sprite, a method's parameter list, or a [`Statement::Declare`](crate::Statement)
//! inside a method body. Lowering works on the borrowed [`Declaration`] view,
//! which is matched exhaustively by storage class.

use crate::{DataType, Expression, Literal, MethodDeclaration};
use ch_span::FileSpan;
use serde::{Deserialize, Serialize};

/// Capabilities shared by every declaration kind
pub trait DeclarationInfo {
    /// Declared name
    fn name(&self) -> &str;
    /// Static type
    fn data_type(&self) -> DataType;
    /// Where the declaration was written
    fn span(&self) -> FileSpan;
}

/// A compile-time constant; its value is always a literal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstDeclaration {
    /// Constant name
    pub name: String,
    /// Declared type
    pub data_type: DataType,
    /// The literal value
    pub value: Literal,
    /// Source location
    pub span: FileSpan,
}

/// A named global variable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalVarDeclaration {
    /// Variable name
    pub name: String,
    /// Declared type
    pub data_type: DataType,
    /// Optional initial value
    pub value: Option<Literal>,
    /// Source location
    pub span: FileSpan,
}

/// A named global list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalArrayDeclaration {
    /// List name
    pub name: String,
    /// Element type
    pub data_type: DataType,
    /// Initial contents
    pub items: Vec<Literal>,
    /// Source location
    pub span: FileSpan,
}

/// A method parameter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDeclaration {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub data_type: DataType,
    /// Source location
    pub span: FileSpan,
}

/// A stack-allocated local variable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopedVarDeclaration {
    /// Variable name
    pub name: String,
    /// Declared type
    pub data_type: DataType,
    /// Optional initializer
    pub value: Option<Expression>,
    /// Number of stack slots; single-slot variables are the common case
    pub slots: u32,
    /// Source location
    pub span: FileSpan,
}

impl ScopedVarDeclaration {
    /// A single-slot local variable
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        value: Option<Expression>,
        span: FileSpan,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            value,
            slots: 1,
            span,
        }
    }
}

/// A stack-allocated local array
///
/// The length is the number of initializers and never changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopedArrayDeclaration {
    name: String,
    data_type: DataType,
    items: Vec<Expression>,
    span: FileSpan,
}

impl ScopedArrayDeclaration {
    /// Creates an array whose length is `items.len()`
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        items: Vec<Expression>,
        span: FileSpan,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            items,
            span,
        }
    }

    /// Initial element expressions
    #[must_use]
    pub fn items(&self) -> &[Expression] {
        &self.items
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

macro_rules! impl_declaration_info {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeclarationInfo for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn data_type(&self) -> DataType {
                    self.data_type
                }

                fn span(&self) -> FileSpan {
                    self.span
                }
            }
        )*
    };
}

impl_declaration_info!(
    ConstDeclaration,
    GlobalVarDeclaration,
    GlobalArrayDeclaration,
    ParamDeclaration,
    ScopedVarDeclaration,
    ScopedArrayDeclaration,
);

impl DeclarationInfo for MethodDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> DataType {
        self.return_type.unwrap_or(DataType::Object)
    }

    fn span(&self) -> FileSpan {
        self.span
    }
}

/// A declaration owned by the project or a sprite
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GlobalDeclaration {
    /// `const`
    Constant(ConstDeclaration),
    /// Global variable
    Variable(GlobalVarDeclaration),
    /// Global list
    Array(GlobalArrayDeclaration),
}

impl GlobalDeclaration {
    /// Declared name
    #[must_use]
    pub fn name(&self) -> &str {
        self.as_declaration().name()
    }

    /// Borrowed view for resolution
    #[must_use]
    pub const fn as_declaration(&self) -> Declaration<'_> {
        match self {
            Self::Constant(decl) => Declaration::Constant(decl),
            Self::Variable(decl) => Declaration::GlobalVariable(decl),
            Self::Array(decl) => Declaration::GlobalArray(decl),
        }
    }
}

/// A declaration introduced by a statement inside a method body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScopedDeclaration {
    /// Local variable
    Variable(ScopedVarDeclaration),
    /// Local array
    Array(ScopedArrayDeclaration),
}

impl ScopedDeclaration {
    /// Declared name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(decl) => &decl.name,
            Self::Array(decl) => &decl.name,
        }
    }

    /// Number of stack slots the declaration occupies
    #[must_use]
    pub fn slots(&self) -> u32 {
        match self {
            Self::Variable(decl) => decl.slots,
            Self::Array(decl) => decl.len() as u32,
        }
    }

    /// Source location
    #[must_use]
    pub const fn span(&self) -> FileSpan {
        match self {
            Self::Variable(decl) => decl.span,
            Self::Array(decl) => decl.span,
        }
    }

    /// Borrowed view for resolution
    #[must_use]
    pub const fn as_declaration(&self) -> Declaration<'_> {
        match self {
            Self::Variable(decl) => Declaration::ScopedVariable(decl),
            Self::Array(decl) => Declaration::ScopedArray(decl),
        }
    }
}

/// A resolved name, tagged by storage class
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Declaration<'decl> {
    /// Folded to its literal wherever it is read
    Constant(&'decl ConstDeclaration),
    /// Named variable addressed by name
    GlobalVariable(&'decl GlobalVarDeclaration),
    /// Named list addressed by name
    GlobalArray(&'decl GlobalArrayDeclaration),
    /// Read-only method parameter
    Parameter(&'decl ParamDeclaration),
    /// Stack-allocated local
    ScopedVariable(&'decl ScopedVarDeclaration),
    /// Stack-allocated local array
    ScopedArray(&'decl ScopedArrayDeclaration),
    /// A method name
    Method(&'decl MethodDeclaration),
}

impl<'decl> Declaration<'decl> {
    fn info(self) -> &'decl dyn DeclarationInfo {
        match self {
            Self::Constant(decl) => decl,
            Self::GlobalVariable(decl) => decl,
            Self::GlobalArray(decl) => decl,
            Self::Parameter(decl) => decl,
            Self::ScopedVariable(decl) => decl,
            Self::ScopedArray(decl) => decl,
            Self::Method(decl) => decl,
        }
    }

    /// Declared name
    #[must_use]
    pub fn name(self) -> &'decl str {
        self.info().name()
    }

    /// Static type; a method reports its return type
    #[must_use]
    pub fn data_type(self) -> DataType {
        self.info().data_type()
    }

    /// Where the declaration was written
    #[must_use]
    pub fn span(self) -> FileSpan {
        self.info().span()
    }

    /// Whether assignment is always rejected
    #[must_use]
    pub const fn is_readonly(self) -> bool {
        matches!(self, Self::Constant(_) | Self::Parameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch_span::{FileId, Span};

    fn span() -> FileSpan {
        FileSpan::new(FileId::new(0), Span::new(0, 1))
    }

    #[test]
    fn test_array_length_follows_items() {
        let array = ScopedArrayDeclaration::new(
            "xs",
            DataType::Number,
            vec![Expression::number(1.0, span()), Expression::number(2.0, span())],
            span(),
        );
        assert_eq!(array.len(), 2);
        assert_eq!(ScopedDeclaration::Array(array).slots(), 2);
    }

    #[test]
    fn test_view_reports_info() {
        let param = ParamDeclaration {
            name: "speed".to_string(),
            data_type: DataType::Number,
            span: span(),
        };
        let view = Declaration::Parameter(&param);
        assert_eq!(view.name(), "speed");
        assert_eq!(view.data_type(), DataType::Number);
        assert!(view.is_readonly());
    }

    #[test]
    fn test_global_variable_is_writable() {
        let var = GlobalDeclaration::Variable(GlobalVarDeclaration {
            name: "score".to_string(),
            data_type: DataType::Number,
            value: None,
            span: span(),
        });
        assert_eq!(var.name(), "score");
        assert!(!var.as_declaration().is_readonly());
    }
}
