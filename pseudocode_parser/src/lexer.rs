//! Lexer for pseudocode source
//!
//! Wraps the logos-generated lexer, attaching line/column spans to every
//! token through a [`LineMap`].

use logos::Logos;

use crate::error::{ParseError, ParseResult};
use crate::span::{LineMap, Span};
use crate::token::Token;

/// A token with its span
#[derive(Debug, Clone)]
pub struct SpannedToken<'a> {
    pub token: Token,
    pub span: Span,
    pub text: &'a str,
}

impl<'a> SpannedToken<'a> {
    pub fn new(token: Token, span: Span, text: &'a str) -> Self {
        Self { token, span, text }
    }
}

/// Pseudocode lexer
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, Token>,
    line_map: LineMap,
    /// Peeked token (for lookahead)
    peeked: Option<Result<SpannedToken<'a>, ParseError>>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("source_len", &self.source.len())
            .field("peeked", &self.peeked)
            .finish_non_exhaustive()
    }
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        let line_map = LineMap::new(source);
        Self {
            source,
            inner: Token::lexer(source),
            line_map,
            peeked: None,
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> Option<&Result<SpannedToken<'a>, ParseError>> {
        if self.peeked.is_none() {
            self.peeked = self.next_token_internal();
        }
        self.peeked.as_ref()
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Option<Result<SpannedToken<'a>, ParseError>> {
        if let Some(peeked) = self.peeked.take() {
            return Some(peeked);
        }
        self.next_token_internal()
    }

    fn next_token_internal(&mut self) -> Option<Result<SpannedToken<'a>, ParseError>> {
        let result = self.inner.next()?;
        let range = self.inner.span();
        let span = self.line_map.span(range.start, range.end);
        let text = &self.source[range.start..range.end];

        match result {
            Ok(token) => Some(Ok(SpannedToken::new(token, span, text))),
            // A stray quote means the literal never closed on its line
            Err(()) if text.starts_with('"') => {
                Some(Err(ParseError::UnterminatedString { span }))
            }
            Err(()) => Some(Err(ParseError::LexerError { span })),
        }
    }

    /// Collect all tokens (for debugging)
    pub fn collect_all(mut self) -> Vec<ParseResult<SpannedToken<'a>>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = ParseResult<SpannedToken<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize source code into a vector of spanned tokens
pub fn tokenize(source: &str) -> Vec<ParseResult<SpannedToken<'_>>> {
    Lexer::new(source).collect_all()
}
