//! Source location spans.

use std::fmt;

/// Identifier of a source file inside one compilation snapshot.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct FileId(pub u32);

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

/// Byte-offset span inside a single file.
///
/// Layout: 8 bytes, `start`/`end` as byte offsets from file start
/// (`end` exclusive).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized locations.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A span paired with the file it belongs to.
///
/// Diagnostic locations are always `SourceSpan`s; ordering is by file first
/// so a sorted diagnostic list groups per file.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Debug)]
pub struct SourceSpan {
    pub file: FileId,
    pub span: Span,
}

impl SourceSpan {
    /// Dummy location for synthesized records.
    pub const DUMMY: SourceSpan = SourceSpan {
        file: FileId(0),
        span: Span::DUMMY,
    };

    /// Create a new source span.
    #[inline]
    pub const fn new(file: FileId, start: u32, end: u32) -> Self {
        SourceSpan {
            file,
            span: Span::new(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileId, SourceSpan, Span};
    use pretty_assertions::assert_eq;

    #[test]
    fn span_len_and_empty() {
        assert_eq!(Span::new(3, 10).len(), 7);
        assert!(Span::DUMMY.is_empty());
        assert!(!Span::new(0, 1).is_empty());
    }

    #[test]
    fn source_spans_order_by_file_then_offset() {
        let a = SourceSpan::new(FileId(0), 50, 60);
        let b = SourceSpan::new(FileId(1), 0, 5);
        let c = SourceSpan::new(FileId(1), 10, 12);
        assert!(a < b);
        assert!(b < c);
    }
}
