//! Parse error types

use crate::span::Span;
use thiserror::Error;

/// Parse error type
///
/// Display output carries the message only; the location lives in the span
/// so callers can render it in their own diagnostic format.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    /// Unexpected token
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    /// Unexpected end of input
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    /// Invalid escape sequence
    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String, span: Span },

    /// Invalid number literal
    #[error("invalid number literal '{literal}'")]
    InvalidNumber { literal: String, span: Span },

    /// Invalid character literal
    #[error("invalid character literal")]
    InvalidCharacter { span: Span },

    /// Unterminated string
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    /// Invalid syntax
    #[error("{message}")]
    InvalidSyntax { message: String, span: Span },

    /// Lexer error
    #[error("unrecognized token")]
    LexerError { span: Span },
}

impl ParseError {
    /// Get the span of the error
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => span,
            ParseError::UnexpectedEof { span, .. } => span,
            ParseError::InvalidEscape { span, .. } => span,
            ParseError::InvalidNumber { span, .. } => span,
            ParseError::InvalidCharacter { span } => span,
            ParseError::UnterminatedString { span } => span,
            ParseError::InvalidSyntax { span, .. } => span,
            ParseError::LexerError { span } => span,
        }
    }

    /// Create an unexpected token error
    pub fn unexpected_token(
        found: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    /// Create an unexpected EOF error
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    /// Create an invalid syntax error
    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidSyntax {
            message: message.into(),
            span,
        }
    }

    /// Format error with source context
    ///
    /// Returns a string showing the source line with an error marker.
    pub fn format_with_context(&self, source: &str) -> String {
        let span = self.span();

        let lines: Vec<&str> = source.lines().collect();
        let line_idx = span.line.saturating_sub(1);

        if line_idx >= lines.len() {
            return String::new();
        }

        let line = lines[line_idx];
        let col = span.column.saturating_sub(1);
        let len = if span.line == span.end_line {
            span.end_column.saturating_sub(span.column).max(1)
        } else {
            1
        };

        // Build the error marker
        let spaces = " ".repeat(col.min(line.len()));
        let marker = "^".repeat(len.min(line.len().saturating_sub(col)).max(1));

        format!(
            "  {} | {}\n  {} | {}{}",
            span.line,
            line,
            " ".repeat(span.line.to_string().len()),
            spaces,
            marker
        )
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
