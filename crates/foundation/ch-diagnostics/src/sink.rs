//! The append-only diagnostics sink

use crate::{CompilerError, ErrorKind};
use ch_span::SourceMap;
use codespan_reporting::files::SimpleFiles;

/// Ordered, append-only collection of compiler errors
///
/// Errors are never removed or reordered. Independent sinks (one per sprite,
/// for example) are combined with [`Diagnostics::extend_from`] in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<CompilerError>,
}

impl Diagnostics {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one error
    pub fn push(&mut self, error: CompilerError) {
        self.errors.push(error);
    }

    /// Appends every error of `other` after the errors already collected
    pub fn extend_from(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// Iterates in the order errors were reported
    pub fn iter(&self) -> std::slice::Iter<'_, CompilerError> {
        self.errors.iter()
    }

    /// Number of collected errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of errors of one kind
    #[must_use]
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|error| error.kind == kind).count()
    }

    /// Error kinds in report order
    #[must_use]
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(|error| error.kind).collect()
    }

    /// Collected errors as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[CompilerError] {
        &self.errors
    }

    /// Consumes the sink
    #[must_use]
    pub fn into_vec(self) -> Vec<CompilerError> {
        self.errors
    }
}

impl<'sink> IntoIterator for &'sink Diagnostics {
    type Item = &'sink CompilerError;
    type IntoIter = std::slice::Iter<'sink, CompilerError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = CompilerError;
    type IntoIter = std::vec::IntoIter<CompilerError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Builds codespan files whose ids line up with [`ch_span::FileId`] indices
#[must_use]
pub fn simple_files(map: &SourceMap) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    for (_, name, text) in map.iter() {
        files.add(name.to_string(), text.to_string());
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch_span::{FileId, FileSpan, Span};
    use codespan_reporting::files::Files;

    fn at(start: u32) -> FileSpan {
        FileSpan::new(FileId::new(0), Span::new(start, start + 1))
    }

    #[test]
    fn test_push_keeps_order() {
        let mut sink = Diagnostics::new();
        sink.push(CompilerError::readonly("a", at(0)));
        sink.push(CompilerError::not_a_variable("b", at(1)));

        assert_eq!(
            sink.kinds(),
            vec![ErrorKind::ValueIsReadonly, ErrorKind::ImproperUsage]
        );
        assert_eq!(sink.count(ErrorKind::ValueIsReadonly), 1);
    }

    #[test]
    fn test_extend_from_appends_after() {
        let mut first = Diagnostics::new();
        first.push(CompilerError::readonly("a", at(0)));
        let mut second = Diagnostics::new();
        second.push(CompilerError::invalid_argument("Loop cannot be inlined", at(5)));

        first.extend_from(second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.as_slice()[1].kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_simple_files_ids_match() {
        let mut map = SourceMap::new();
        map.add("stage.choop", "const x = 1;");
        let sprite = map.add("cat.choop", "var y;");

        let files = simple_files(&map);
        assert_eq!(files.name(sprite.index()).ok(), Some("cat.choop".to_string()));
    }
}
