//! Source positions
//!
//! The language is line-oriented (statements end at newlines and runtime
//! diagnostics quote whole lines), so a span is just the 1-indexed
//! line/column range a node covers. Byte offsets never leave the lexer;
//! [`LineMap`] converts them at token boundaries.

use serde::{Deserialize, Serialize};

/// The line/column range a token or AST node covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Line of the first character (1-indexed)
    pub line: usize,
    /// Column of the first character (1-indexed, in bytes)
    pub column: usize,
    /// Line just past the last character
    pub end_line: usize,
    /// Column just past the last character
    pub end_column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// The smallest span covering both `self` and `other`
    pub fn merge(&self, other: &Span) -> Span {
        let (line, column) =
            std::cmp::min((self.line, self.column), (other.line, other.column));
        let (end_line, end_column) = std::cmp::max(
            (self.end_line, self.end_column),
            (other.end_line, other.end_column),
        );
        Span {
            line,
            column,
            end_line,
            end_column,
        }
    }
}

/// Byte-offset to line/column conversion for one source text
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset at which each line begins; index 0 is always 0
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// The 1-indexed (line, column) of a byte offset
    pub fn position(&self, offset: usize) -> (usize, usize) {
        // Offsets at or past a line start belong to that line, so the
        // partition point is already the 1-indexed line number
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        (line, column)
    }

    /// The span of a byte range
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (line, column) = self.position(start);
        let (end_line, end_column) = self.position(end);
        Span {
            line,
            column,
            end_line,
            end_column,
        }
    }
}
