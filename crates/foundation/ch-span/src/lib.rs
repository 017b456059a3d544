//! Source files, byte spans, and line/column lookup
//!
//! Every declaration, statement and expression handed to the lowering core
//! carries a [`FileSpan`]. The [`SourceMap`] owns the file names and texts so
//! diagnostics can be reported against the file they came from.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::iter;
use std::ops::Range;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl FileId {
    /// Creates a file id from its raw index
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index of this file inside its [`SourceMap`]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A byte offset span in a source file
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset
    pub start: u32,
    /// Exclusive end offset
    pub end: u32,
}

impl Span {
    /// Creates a span covering `start..end`
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Byte range of this span
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A span with associated file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileSpan {
    /// File the span points into
    pub file: FileId,
    /// Byte range inside that file
    pub span: Span,
}

impl FileSpan {
    /// Creates a new file span
    #[must_use]
    pub const fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }

    /// Byte range of the inner span
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.span.range()
    }
}

/// A 1-based line and column position
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
#[display("{line}:{column}")]
pub struct LineCol {
    /// Line number, starting at 1
    pub line: u32,
    /// Column number in characters, starting at 1
    pub column: u32,
}

#[derive(Debug, Clone)]
struct SourceFile {
    name: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(name: String, text: String) -> Self {
        let line_starts = iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            name,
            text,
            line_starts,
        }
    }
}

/// Owns every source file known to a compilation
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty source map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns its id
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile::new(name.into(), text.into()));
        id
    }

    /// Name of a file, if the id is known
    #[must_use]
    pub fn name(&self, file: FileId) -> Option<&str> {
        self.files.get(file.index()).map(|source| source.name.as_str())
    }

    /// Full text of a file, if the id is known
    #[must_use]
    pub fn text(&self, file: FileId) -> Option<&str> {
        self.files.get(file.index()).map(|source| source.text.as_str())
    }

    /// Resolves the start of a span to a line and column
    ///
    /// Offsets past the end of the file clamp to the final position.
    #[must_use]
    pub fn line_col(&self, span: FileSpan) -> Option<LineCol> {
        let source = self.files.get(span.file.index())?;
        let offset = (span.span.start as usize).min(source.text.len());
        let line = match source.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = source.line_starts[line];
        let column = source
            .text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Some(LineCol {
            line: line as u32 + 1,
            column: column as u32 + 1,
        })
    }

    /// Iterates over `(id, name, text)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &str, &str)> {
        self.files.iter().enumerate().map(|(idx, source)| {
            (
                FileId(idx as u32),
                source.name.as_str(),
                source.text.as_str(),
            )
        })
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(4, 10);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert_eq!(span.range(), 4..10);
    }

    #[test]
    fn test_line_col_lookup() {
        let mut map = SourceMap::new();
        let file = map.add("main.choop", "var x = 1;\nx += 2;\n");

        let first = map.line_col(FileSpan::new(file, Span::new(4, 5)));
        assert_eq!(first, Some(LineCol { line: 1, column: 5 }));

        let second = map.line_col(FileSpan::new(file, Span::new(11, 12)));
        assert_eq!(second, Some(LineCol { line: 2, column: 1 }));
        assert_eq!(second.map(|pos| pos.to_string()), Some("2:1".to_string()));
    }

    #[test]
    fn test_unknown_file() {
        let map = SourceMap::new();
        assert_eq!(map.name(FileId::new(3)), None);
        assert_eq!(map.line_col(FileSpan::new(FileId::new(3), Span::default())), None);
    }

    #[test]
    fn test_iter_preserves_order() {
        let mut map = SourceMap::new();
        map.add("a.choop", "");
        map.add("b.choop", "");
        let names: Vec<_> = map.iter().map(|(_, name, _)| name).collect();
        assert_eq!(names, ["a.choop", "b.choop"]);
    }
}
