//! Recursive descent parser for pseudocode
//!
//! Converts the token stream from the lexer into the AST consumed by the
//! evaluator. Statements are newline-separated; block constructs scan to
//! their closing keyword.

mod expressions;
mod literals;
mod statements;

use crate::ast::{Program, Stmt};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::{LineMap, Span};
use crate::token::Token;

/// Pseudocode parser
#[derive(Debug)]
pub struct Parser<'a> {
    /// Source code
    pub(crate) source: &'a str,
    /// Lexer
    pub(crate) lexer: Lexer<'a>,
    /// Line/column conversion for end-of-input spans
    pub(crate) line_map: LineMap,
    /// Current token (one-token lookahead)
    pub(crate) current: Option<SpannedToken<'a>>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code
    pub fn new(source: &'a str) -> Self {
        let line_map = LineMap::new(source);
        let lexer = Lexer::new(source);
        Self {
            source,
            lexer,
            line_map,
            current: None,
        }
    }

    /// Parse the source into a [`Program`]
    pub fn parse(mut self) -> ParseResult<Program> {
        let mut stmts = Vec::new();

        // Prime the parser with the first token
        self.advance()?;

        loop {
            self.skip_newlines()?;
            if self.is_at_end() {
                break;
            }
            stmts.push(self.parse_statement()?);
            self.expect_statement_end(&[])?;
        }

        Ok(Program { stmts })
    }

    // ==================== Token Management ====================

    /// Advance to the next token, returning the previous one
    pub(crate) fn advance(&mut self) -> ParseResult<Option<SpannedToken<'a>>> {
        let prev = self.current.take();
        match self.lexer.next_token() {
            Some(Ok(token)) => self.current = Some(token),
            Some(Err(e)) => return Err(e),
            None => self.current = None,
        }
        Ok(prev)
    }

    /// Check if the current token matches
    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.current
            .as_ref()
            .map(|t| &t.token == expected)
            .unwrap_or(false)
    }

    /// Check if the current token is any of the given tokens
    pub(crate) fn check_any(&self, expected: &[Token]) -> bool {
        self.current
            .as_ref()
            .map(|t| expected.contains(&t.token))
            .unwrap_or(false)
    }

    /// Peek at the token after the current one without consuming anything
    pub(crate) fn peek_next(&mut self) -> Option<Token> {
        match self.lexer.peek() {
            Some(Ok(token)) => Some(token.token),
            _ => None,
        }
    }

    /// Consume the current token if it matches, error otherwise
    pub(crate) fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        if self.check(&expected) {
            Ok(self.advance()?.unwrap())
        } else {
            Err(self.unexpected(expected.description()))
        }
    }

    /// Consume an identifier, returning its text and span
    pub(crate) fn expect_identifier(
        &mut self,
        expected: &str,
    ) -> ParseResult<(String, Span)> {
        if self.check(&Token::Identifier) {
            let token = self.advance()?.unwrap();
            Ok((token.text.to_string(), token.span))
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Span of the current token, or a point span at end of input
    pub(crate) fn current_span(&self) -> Span {
        match &self.current {
            Some(token) => token.span,
            None => self.line_map.span(self.source.len(), self.source.len()),
        }
    }

    /// Build an unexpected-token (or unexpected-EOF) error
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(token) => ParseError::unexpected_token(
                token.token.description(),
                expected,
                token.span,
            ),
            None => ParseError::unexpected_eof(expected.to_string(), self.current_span()),
        }
    }

    /// Check if we're at end of input
    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Skip any run of newlines
    pub(crate) fn skip_newlines(&mut self) -> ParseResult<()> {
        while self.check(&Token::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    /// Require the end of a statement: a newline, end of input, or one of
    /// the enclosing block's terminator keywords (left unconsumed)
    pub(crate) fn expect_statement_end(&mut self, terminators: &[Token]) -> ParseResult<()> {
        if self.check(&Token::Newline) {
            self.skip_newlines()?;
            Ok(())
        } else if self.is_at_end() || self.check_any(terminators) {
            Ok(())
        } else {
            Err(self.unexpected("newline"))
        }
    }

    /// Parse statements until one of the terminator keywords is current.
    /// The terminator itself is not consumed.
    pub(crate) fn parse_block_until(&mut self, terminators: &[Token]) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check_any(terminators) {
                return Ok(stmts);
            }
            if self.is_at_end() {
                let expected = terminators
                    .iter()
                    .map(Token::description)
                    .collect::<Vec<_>>()
                    .join(" or ");
                return Err(ParseError::unexpected_eof(expected, self.current_span()));
            }
            stmts.push(self.parse_statement()?);
            self.expect_statement_end(terminators)?;
        }
    }
}

/// Parse pseudocode source into a program
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(source).parse()
}
