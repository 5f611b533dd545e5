//! Literal token decoding (numbers, strings, characters)

use crate::ast::{Expr, ExprKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::SpannedToken;
use crate::span::Span;
use crate::token::Token;

use super::Parser;

/// Decode the escapes of a quoted literal body.
///
/// Supported escapes: `\\ \" \' \n \t \r \0`.
fn unescape(body: &str, span: Span) -> ParseResult<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            other => {
                let sequence = match other {
                    Some(c) => format!("\\{}", c),
                    None => "\\".to_string(),
                };
                return Err(ParseError::InvalidEscape { sequence, span });
            }
        }
    }
    Ok(out)
}

impl<'a> Parser<'a> {
    /// Decode the current literal token into an expression node.
    ///
    /// Callers have already checked the token kind; this consumes it.
    pub(crate) fn parse_literal(&mut self) -> ParseResult<Expr> {
        let token = self.advance()?.unwrap();
        let kind = match token.token {
            Token::IntLiteral => ExprKind::Int(decode_int(&token)?),
            Token::RealLiteral => ExprKind::Real(decode_real(&token)?),
            Token::StringLiteral => {
                // Strip the surrounding quotes
                let body = &token.text[1..token.text.len() - 1];
                ExprKind::Str(unescape(body, token.span)?)
            }
            Token::CharLiteral => {
                let body = &token.text[1..token.text.len() - 1];
                let decoded = unescape(body, token.span)?;
                let mut chars = decoded.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => ExprKind::Char(c),
                    _ => return Err(ParseError::InvalidCharacter { span: token.span }),
                }
            }
            Token::True => ExprKind::Bool(true),
            Token::False => ExprKind::Bool(false),
            _ => return Err(ParseError::unexpected_token(
                token.token.description(),
                "a literal",
                token.span,
            )),
        };
        Ok(Expr::new(kind, token.span))
    }

    /// True when the current token begins a literal (used by CASE labels)
    pub(crate) fn at_literal(&self) -> bool {
        self.check_any(&[
            Token::IntLiteral,
            Token::RealLiteral,
            Token::StringLiteral,
            Token::CharLiteral,
            Token::True,
            Token::False,
        ])
    }
}

fn decode_int(token: &SpannedToken<'_>) -> ParseResult<i64> {
    token.text.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
        literal: token.text.to_string(),
        span: token.span,
    })
}

fn decode_real(token: &SpannedToken<'_>) -> ParseResult<f64> {
    token.text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        literal: token.text.to_string(),
        span: token.span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_plain() {
        let span = Span::default();
        assert_eq!(unescape("hello", span).unwrap(), "hello");
    }

    #[test]
    fn test_unescape_sequences() {
        let span = Span::default();
        assert_eq!(unescape(r"a\nb\tc", span).unwrap(), "a\nb\tc");
        assert_eq!(unescape(r#"\"quoted\""#, span).unwrap(), "\"quoted\"");
        assert_eq!(unescape(r"\\", span).unwrap(), "\\");
        assert_eq!(unescape(r"\0", span).unwrap(), "\0");
    }

    #[test]
    fn test_unescape_invalid() {
        let span = Span::default();
        assert!(unescape(r"\q", span).is_err());
    }
}
