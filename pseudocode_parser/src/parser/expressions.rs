//! Expression parsing (precedence climbing)

use crate::ast::{BinaryOp, Expr, ExprKind, TypeName};
use crate::error::{ParseError, ParseResult};
use crate::token::{Precedence, Token};

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse an expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expression_with_precedence(Precedence::Or as u8)
    }

    /// Parse an expression with minimum precedence
    fn parse_expression_with_precedence(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.current.as_ref() {
            let Some(prec) = token.token.binary_precedence() else {
                break;
            };
            if (prec as u8) < min_prec {
                break;
            }

            let op = binary_op(&token.token);
            self.advance()?;

            // All operators are left-associative: parse the right side one
            // level tighter
            let right = self.parse_expression_with_precedence(prec.next())?;

            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// Parse a unary expression (`-expr` or postfix)
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.check(&Token::Minus) {
            let minus = self.advance()?.unwrap();
            let operand = self.parse_unary()?;
            let span = minus.span.merge(&operand.span);
            return Ok(Expr::new(ExprKind::Neg(Box::new(operand)), span));
        }
        self.parse_postfix()
    }

    /// Parse a primary expression followed by any number of index suffixes
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        while self.check(&Token::LBracket) {
            self.advance()?;
            let indices = self.parse_index_list()?;
            let close = self.expect(Token::RBracket)?;
            let span = expr.span.merge(&close.span);
            expr = Expr::new(
                ExprKind::Index {
                    target: Box::new(expr),
                    indices,
                },
                span,
            );
        }

        Ok(expr)
    }

    /// Parse one or two comma-separated index expressions
    pub(crate) fn parse_index_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut indices = vec![self.parse_expression()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            indices.push(self.parse_expression()?);
        }
        if indices.len() > 2 {
            return Err(ParseError::invalid_syntax(
                "at most two indices are supported",
                indices[2].span,
            ));
        }
        Ok(indices)
    }

    /// Parse a primary expression
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.current.as_ref() else {
            return Err(ParseError::unexpected_eof("an expression", self.current_span()));
        };

        match token.token {
            Token::IntLiteral
            | Token::RealLiteral
            | Token::StringLiteral
            | Token::CharLiteral
            | Token::True
            | Token::False => self.parse_literal(),

            Token::Identifier => {
                let token = self.advance()?.unwrap();
                let name = token.text.to_string();
                if self.check(&Token::LParen) {
                    self.advance()?;
                    let args = self.parse_argument_list()?;
                    let close = self.expect(Token::RParen)?;
                    let span = token.span.merge(&close.span);
                    Ok(Expr::new(ExprKind::Call { name, args }, span))
                } else {
                    Ok(Expr::new(ExprKind::Var(name), token.span))
                }
            }

            Token::KwLength => {
                let kw = self.advance()?.unwrap();
                self.expect(Token::LParen)?;
                let arg = self.parse_expression()?;
                let close = self.expect(Token::RParen)?;
                let span = kw.span.merge(&close.span);
                Ok(Expr::new(ExprKind::Length(Box::new(arg)), span))
            }

            Token::TyInteger | Token::TyReal | Token::TyString | Token::TyBoolean
            | Token::TyChar => {
                let kw = self.advance()?.unwrap();
                let ty = type_name(&kw.token);
                self.expect(Token::LParen)?;
                let arg = self.parse_expression()?;
                let close = self.expect(Token::RParen)?;
                let span = kw.span.merge(&close.span);
                Ok(Expr::new(ExprKind::Cast { ty, arg: Box::new(arg) }, span))
            }

            Token::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }

            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Parse a possibly-empty comma-separated argument list.
    /// The opening parenthesis has been consumed; the closing one has not.
    pub(crate) fn parse_argument_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&Token::RParen) {
            return Ok(args);
        }
        args.push(self.parse_expression()?);
        while self.check(&Token::Comma) {
            self.advance()?;
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }
}

fn binary_op(token: &Token) -> BinaryOp {
    match token {
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::KwMod => BinaryOp::Mod,
        Token::KwAnd => BinaryOp::And,
        Token::KwOr => BinaryOp::Or,
        Token::Eq => BinaryOp::Eq,
        Token::Neq => BinaryOp::Neq,
        Token::Gt => BinaryOp::Gt,
        Token::Lt => BinaryOp::Lt,
        Token::Gte => BinaryOp::Gte,
        Token::Lte => BinaryOp::Lte,
        _ => unreachable!("binary_op called on a non-operator token"),
    }
}

fn type_name(token: &Token) -> TypeName {
    match token {
        Token::TyInteger => TypeName::Integer,
        Token::TyReal => TypeName::Real,
        Token::TyString => TypeName::String,
        Token::TyBoolean => TypeName::Boolean,
        Token::TyChar => TypeName::Char,
        _ => unreachable!("type_name called on a non-type token"),
    }
}
