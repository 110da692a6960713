// src/location/span.rs
use std::fmt;

/// A contiguous byte range `[start, end)` into a single source string.
///
/// Every token, AST node and `CompileError` carries one of these so that
/// diagnostics can point back at the offending source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `pos`, used for synthesized nodes that have no
    /// direct source counterpart (e.g. the implicit `Start` node).
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Expands this span to also cover `other`.
    #[must_use]
    pub fn merge(self, other: Span) -> Self {
        Self { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    /// Recovers the 1-based `(line, column)` of `self.start` within `source`.
    ///
    /// Computed on demand by scanning `source` up to the offset; this core
    /// never holds more than one source string at a time, so there is no
    /// benefit to maintaining an incremental line index.
    #[must_use]
    pub fn line_col(self, source: &str) -> (usize, usize) {
        let mut line = 1usize;
        let mut col = 1usize;
        for (i, ch) in source.char_indices() {
            if i >= self.start {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// The source line containing `self.start`, without its trailing newline.
    #[must_use]
    pub fn source_line(self, source: &str) -> &str {
        let before = &source[..self.start.min(source.len())];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[self.start.min(source.len())..]
            .find('\n')
            .map_or(source.len(), |i| self.start + i);
        &source[line_start..line_end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_expands_to_cover_both() {
        let a = Span::new(3, 5);
        let b = Span::new(1, 4);
        assert_eq!(a.merge(b), Span::new(1, 5));
    }

    #[test]
    fn line_col_counts_newlines() {
        let src = "int a=1;\nint b=2;\nreturn a+b;";
        let span = Span::at(src.find("b=2").unwrap());
        assert_eq!(span.line_col(src), (2, 5));
    }

    #[test]
    fn source_line_extracts_without_newline() {
        let src = "line one\nline two\nline three";
        let span = Span::at(src.find("two").unwrap());
        assert_eq!(span.source_line(src), "line two");
    }
}
