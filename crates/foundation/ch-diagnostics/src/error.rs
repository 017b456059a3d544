//! Error kinds and the compiler error type

use ch_span::FileSpan;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::fmt;

/// Category of a user-facing compiler error
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum ErrorKind {
    /// A name does not resolve to any declaration
    NotDefined,
    /// Assignment target is a parameter or constant
    ValueIsReadonly,
    /// A name resolves to something that cannot be used in this position
    ImproperUsage,
    /// Operator/type or declared/initializer type incompatibility
    TypeMismatch,
    /// A construct needs a compile-time constant argument it did not get
    InvalidArgument,
    /// A name is declared twice in the same scope
    DuplicateDeclaration,
}

impl ErrorKind {
    /// Stable code used when rendering the error
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotDefined => "not-defined",
            Self::ValueIsReadonly => "value-is-readonly",
            Self::ImproperUsage => "improper-usage",
            Self::TypeMismatch => "type-mismatch",
            Self::InvalidArgument => "invalid-argument",
            Self::DuplicateDeclaration => "duplicate-declaration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// A single user-facing compiler error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompilerError {
    /// Error category
    pub kind: ErrorKind,
    /// Human readable message
    pub message: String,
    /// Where the error was found
    pub span: FileSpan,
    /// Similar names, for "did you mean" notes
    pub suggestions: Vec<String>,
    /// Earlier declaration this error conflicts with
    pub previous: Option<FileSpan>,
}

impl CompilerError {
    /// Creates an error without suggestions
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: FileSpan) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            suggestions: Vec::new(),
            previous: None,
        }
    }

    /// A name that does not resolve
    #[must_use]
    pub fn not_defined(name: &str, span: FileSpan, suggestions: Vec<String>) -> Self {
        Self {
            suggestions,
            ..Self::new(ErrorKind::NotDefined, format!("'{name}' is not defined"), span)
        }
    }

    /// Assignment to a parameter or constant
    #[must_use]
    pub fn readonly(name: &str, span: FileSpan) -> Self {
        Self::new(
            ErrorKind::ValueIsReadonly,
            format!("Value '{name}' is read-only"),
            span,
        )
    }

    /// Assignment to something that is not a variable
    #[must_use]
    pub fn not_a_variable(name: &str, span: FileSpan) -> Self {
        Self::new(
            ErrorKind::ImproperUsage,
            format!("'{name}' is not a variable"),
            span,
        )
    }

    /// Indexing something that is not an array
    #[must_use]
    pub fn not_an_array(name: &str, span: FileSpan) -> Self {
        Self::new(
            ErrorKind::ImproperUsage,
            format!("'{name}' is not an array"),
            span,
        )
    }

    /// Reading something that has no single value
    #[must_use]
    pub fn not_a_value(name: &str, span: FileSpan) -> Self {
        Self::new(
            ErrorKind::ImproperUsage,
            format!("'{name}' cannot be used as a value"),
            span,
        )
    }

    /// An assignment operator applied to an incompatible target type
    #[must_use]
    pub fn operator_mismatch(
        operator: impl fmt::Display,
        found: impl fmt::Display,
        span: FileSpan,
    ) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("Cannot use operator '{operator}' on a value of type '{found}'"),
            span,
        )
    }

    /// A value whose type does not match the declared type
    #[must_use]
    pub fn type_mismatch(
        expected: impl fmt::Display,
        found: impl fmt::Display,
        span: FileSpan,
    ) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!(
                "Expected value of type '{expected}' but instead found value of type '{found}'"
            ),
            span,
        )
    }

    /// A construct that needed a constant argument
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>, span: FileSpan) -> Self {
        Self::new(ErrorKind::InvalidArgument, message, span)
    }

    /// A name declared twice in one scope
    #[must_use]
    pub fn duplicate_declaration(name: &str, span: FileSpan) -> Self {
        Self::new(
            ErrorKind::DuplicateDeclaration,
            format!("'{name}' is already declared in this scope"),
            span,
        )
    }

    /// A value returned from a method that has no return type
    #[must_use]
    pub fn no_return_value(method: &str, span: FileSpan) -> Self {
        Self::new(
            ErrorKind::ImproperUsage,
            format!("Method '{method}' does not return a value"),
            span,
        )
    }

    /// Points at the declaration this one conflicts with
    #[must_use]
    pub fn with_previous(mut self, previous: FileSpan) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Converts to a codespan diagnostic
    ///
    /// The file id of the label is `span.file.index()`, matching the ids
    /// produced by [`simple_files`](crate::simple_files).
    #[must_use]
    pub fn to_codespan_diagnostic(&self) -> Diagnostic<usize> {
        let notes = self
            .suggestions
            .iter()
            .map(|name| format!("did you mean '{name}'?"))
            .collect();

        let mut labels = vec![Label::primary(self.span.file.index(), self.span.range())];
        if let Some(previous) = self.previous {
            labels.push(
                Label::secondary(previous.file.index(), previous.range())
                    .with_message("first declared here"),
            );
        }

        Diagnostic::error()
            .with_code(self.kind.code())
            .with_message(&self.message)
            .with_labels(labels)
            .with_notes(notes)
    }
}
