//! Statement parsers
//!
//! One parser per construct; block statements scan to their closing
//! keyword (`ENDIF`, `ENDCASE`, `ENDWHILE`, `UNTIL`, `NEXT`,
//! `ENDPROCEDURE`, `ENDFUNCTION`).

use crate::ast::{
    ArrayBounds, CaseBranch, DeclType, IfBranch, Param, ParamType, Stmt, StmtKind, TypeName,
};
use crate::error::{ParseError, ParseResult};
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse a single statement; dispatches on the current token
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let Some(token) = self.current.as_ref() else {
            return Err(ParseError::unexpected_eof("a statement", self.current_span()));
        };

        match token.token {
            Token::KwDeclare => self.parse_declaration(),
            Token::KwConstant => self.parse_constant(),
            Token::KwOutput => self.parse_output(),
            Token::KwInput => self.parse_input(),
            Token::KwIf => self.parse_if(),
            Token::KwCase => self.parse_switch(),
            Token::KwWhile => self.parse_while(),
            Token::KwRepeat => self.parse_repeat(),
            Token::KwFor => self.parse_for(),
            Token::KwProcedure => self.parse_procedure(),
            Token::KwFunction => self.parse_function(),
            Token::KwCall => self.parse_call(),
            Token::KwReturn => self.parse_return(),
            Token::Identifier => self.parse_assignment(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// `DECLARE name : Type`
    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwDeclare)?;
        let (name, _) = self.expect_identifier("a variable name")?;
        self.expect(Token::Colon)?;
        let (ty, end_span) = self.parse_decl_type()?;
        let span = kw.span.merge(&end_span);
        Ok(Stmt::new(StmtKind::Declare { name, ty }, span))
    }

    /// The type after the colon in DECLARE: a scalar name or
    /// `ARRAY[l:u(, l:u)] OF Scalar`
    fn parse_decl_type(&mut self) -> ParseResult<(DeclType, crate::span::Span)> {
        if self.check(&Token::TyArray) {
            self.advance()?;
            self.expect(Token::LBracket)?;
            let mut bounds = vec![self.parse_bound_pair()?];
            while self.check(&Token::Comma) {
                self.advance()?;
                bounds.push(self.parse_bound_pair()?);
            }
            if bounds.len() > 2 {
                return Err(ParseError::invalid_syntax(
                    "arrays may have at most two dimensions",
                    bounds[2].lower.span,
                ));
            }
            self.expect(Token::RBracket)?;
            self.expect(Token::KwOf)?;
            let (elem, elem_span) = self.parse_scalar_type()?;
            Ok((DeclType::Array { bounds, elem }, elem_span))
        } else {
            let (ty, span) = self.parse_scalar_type()?;
            Ok((DeclType::Scalar(ty), span))
        }
    }

    /// One `lower:upper` pair inside array declaration brackets
    fn parse_bound_pair(&mut self) -> ParseResult<ArrayBounds> {
        let lower = self.parse_expression()?;
        self.expect(Token::Colon)?;
        let upper = self.parse_expression()?;
        Ok(ArrayBounds { lower, upper })
    }

    /// A scalar type name token
    fn parse_scalar_type(&mut self) -> ParseResult<(TypeName, crate::span::Span)> {
        let Some(token) = self.current.as_ref() else {
            return Err(ParseError::unexpected_eof("a type name", self.current_span()));
        };
        let ty = match token.token {
            Token::TyInteger => TypeName::Integer,
            Token::TyReal => TypeName::Real,
            Token::TyString => TypeName::String,
            Token::TyBoolean => TypeName::Boolean,
            Token::TyChar => TypeName::Char,
            _ => return Err(self.unexpected("a type name")),
        };
        let token = self.advance()?.unwrap();
        Ok((ty, token.span))
    }

    /// `CONSTANT name = expr`
    fn parse_constant(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwConstant)?;
        let (name, _) = self.expect_identifier("a constant name")?;
        self.expect(Token::Eq)?;
        let value = self.parse_expression()?;
        let span = kw.span.merge(&value.span);
        Ok(Stmt::new(StmtKind::Constant { name, value }, span))
    }

    /// `name ← expr`, `name[i] ← expr`, or `name[i, j] ← expr`
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let (name, name_span) = self.expect_identifier("a variable name")?;

        if self.check(&Token::LBracket) {
            self.advance()?;
            let indices = self.parse_index_list()?;
            self.expect(Token::RBracket)?;
            self.expect(Token::Arrow)?;
            let value = self.parse_expression()?;
            let span = name_span.merge(&value.span);
            return Ok(Stmt::new(StmtKind::IndexAssign { name, indices, value }, span));
        }

        self.expect(Token::Arrow)?;
        let value = self.parse_expression()?;
        let span = name_span.merge(&value.span);
        Ok(Stmt::new(StmtKind::Assign { name, value }, span))
    }

    /// `OUTPUT e1, e2, …`
    fn parse_output(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwOutput)?;
        let mut values = vec![self.parse_expression()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            values.push(self.parse_expression()?);
        }
        let span = kw.span.merge(&values.last().unwrap().span);
        Ok(Stmt::new(StmtKind::Output { values }, span))
    }

    /// `INPUT name`
    fn parse_input(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwInput)?;
        let (name, name_span) = self.expect_identifier("a variable name")?;
        let span = kw.span.merge(&name_span);
        Ok(Stmt::new(StmtKind::Input { name }, span))
    }

    /// `IF cond THEN … [ELSE IF cond THEN …]* [ELSE …] ENDIF`
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwIf)?;
        let cond = self.parse_expression()?;
        self.expect(Token::KwThen)?;
        let body = self.parse_block_until(&[Token::KwElse, Token::KwEndif])?;

        let mut branches = vec![IfBranch { cond, body }];
        let mut else_body = None;

        while self.check(&Token::KwElse) {
            self.advance()?;
            if self.check(&Token::KwIf) {
                self.advance()?;
                let cond = self.parse_expression()?;
                self.expect(Token::KwThen)?;
                let body = self.parse_block_until(&[Token::KwElse, Token::KwEndif])?;
                branches.push(IfBranch { cond, body });
            } else {
                else_body = Some(self.parse_block_until(&[Token::KwEndif])?);
                break;
            }
        }

        let end = self.expect(Token::KwEndif)?;
        let span = kw.span.merge(&end.span);
        Ok(Stmt::new(StmtKind::If { branches, else_body }, span))
    }

    /// `CASE OF name … ENDCASE`
    fn parse_switch(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwCase)?;
        self.expect(Token::KwOf)?;
        let (subject, _) = self.expect_identifier("a variable name")?;

        let mut branches = Vec::new();
        let mut otherwise = None;

        loop {
            self.skip_newlines()?;

            if self.check(&Token::KwEndcase) {
                break;
            }
            if self.check(&Token::KwOtherwise) {
                self.advance()?;
                otherwise = Some(self.parse_block_until(&[Token::KwEndcase])?);
                break;
            }
            if self.is_at_end() {
                return Err(ParseError::unexpected_eof("ENDCASE", self.current_span()));
            }
            if !self.at_literal() {
                return Err(self.unexpected("a literal case label"));
            }

            let label = self.parse_literal()?;
            self.expect(Token::Colon)?;
            let body = self.parse_case_body()?;
            branches.push(CaseBranch { label, body });
        }

        let end = self.expect(Token::KwEndcase)?;
        let span = kw.span.merge(&end.span);
        Ok(Stmt::new(StmtKind::Switch { subject, branches, otherwise }, span))
    }

    /// Statements of one CASE branch: runs until the next label,
    /// OTHERWISE, or ENDCASE
    fn parse_case_body(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.check_any(&[Token::KwOtherwise, Token::KwEndcase]) {
                return Ok(stmts);
            }
            // A literal followed by a colon starts the next branch
            if self.at_literal() && self.peek_next() == Some(Token::Colon) {
                return Ok(stmts);
            }
            if self.is_at_end() {
                return Err(ParseError::unexpected_eof("ENDCASE", self.current_span()));
            }
            stmts.push(self.parse_statement()?);
            self.expect_statement_end(&[Token::KwOtherwise, Token::KwEndcase])?;
        }
    }

    /// `WHILE cond [DO] … ENDWHILE`
    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwWhile)?;
        let cond = self.parse_expression()?;
        if self.check(&Token::KwDo) {
            self.advance()?;
        }
        let body = self.parse_block_until(&[Token::KwEndwhile])?;
        let end = self.expect(Token::KwEndwhile)?;
        let span = kw.span.merge(&end.span);
        Ok(Stmt::new(StmtKind::While { cond, body }, span))
    }

    /// `REPEAT … UNTIL cond`
    fn parse_repeat(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwRepeat)?;
        let body = self.parse_block_until(&[Token::KwUntil])?;
        self.expect(Token::KwUntil)?;
        let cond = self.parse_expression()?;
        let span = kw.span.merge(&cond.span);
        Ok(Stmt::new(StmtKind::RepeatUntil { body, cond }, span))
    }

    /// `FOR i ← start TO end [STEP s] … NEXT [i]`
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwFor)?;
        let (iterator, _) = self.expect_identifier("an iterator name")?;
        self.expect(Token::Arrow)?;
        let start = self.parse_expression()?;
        self.expect(Token::KwTo)?;
        let end = self.parse_expression()?;
        let step = if self.check(&Token::KwStep) {
            self.advance()?;
            Some(self.parse_expression()?)
        } else {
            None
        };

        let body = self.parse_block_until(&[Token::KwNext])?;
        let next_kw = self.expect(Token::KwNext)?;
        let mut last_span = next_kw.span;

        // An identifier after NEXT must name the loop iterator
        if self.check(&Token::Identifier) {
            let token = self.advance()?.unwrap();
            if token.text != iterator {
                return Err(ParseError::invalid_syntax(
                    format!(
                        "NEXT variable \"{}\" does not match FOR iterator \"{}\"",
                        token.text, iterator
                    ),
                    token.span,
                ));
            }
            last_span = token.span;
        }

        let span = kw.span.merge(&last_span);
        Ok(Stmt::new(
            StmtKind::For { iterator, start, end, step, body },
            span,
        ))
    }

    /// `PROCEDURE name[(params)] … ENDPROCEDURE`
    fn parse_procedure(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwProcedure)?;
        let (name, _) = self.expect_identifier("a procedure name")?;
        let params = self.parse_optional_params()?;
        let body = self.parse_block_until(&[Token::KwEndprocedure])?;
        let end = self.expect(Token::KwEndprocedure)?;
        let span = kw.span.merge(&end.span);
        Ok(Stmt::new(StmtKind::Procedure { name, params, body }, span))
    }

    /// `FUNCTION name[(params)] RETURNS Type … ENDFUNCTION`
    fn parse_function(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwFunction)?;
        let (name, _) = self.expect_identifier("a function name")?;
        let params = self.parse_optional_params()?;
        self.expect(Token::KwReturns)?;
        let (returns, _) = self.parse_scalar_type()?;
        let body = self.parse_block_until(&[Token::KwEndfunction])?;
        let end = self.expect(Token::KwEndfunction)?;
        let span = kw.span.merge(&end.span);
        Ok(Stmt::new(
            StmtKind::Function { name, params, returns, body },
            span,
        ))
    }

    /// A parenthesised parameter list, or nothing
    fn parse_optional_params(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        if !self.check(&Token::LParen) {
            return Ok(params);
        }
        self.advance()?;
        if self.check(&Token::RParen) {
            self.advance()?;
            return Ok(params);
        }
        loop {
            params.push(self.parse_param()?);
            if self.check(&Token::Comma) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(Token::RParen)?;
        Ok(params)
    }

    /// One `name : Desc` parameter
    fn parse_param(&mut self) -> ParseResult<Param> {
        let (name, name_span) = self.expect_identifier("a parameter name")?;
        self.expect(Token::Colon)?;
        let (ty, ty_span) = self.parse_param_type()?;
        let span = name_span.merge(&ty_span);
        Ok(Param { name, ty, span })
    }

    /// A parameter type descriptor: scalar, `ARRAY<T>`, or `ARRAY<ARRAY<T>>`
    fn parse_param_type(&mut self) -> ParseResult<(ParamType, crate::span::Span)> {
        if !self.check(&Token::TyArray) {
            let (ty, span) = self.parse_scalar_type()?;
            return Ok((ParamType::Scalar(ty), span));
        }

        let kw = self.advance()?.unwrap();
        self.expect(Token::Lt)?;
        if self.check(&Token::TyArray) {
            self.advance()?;
            self.expect(Token::Lt)?;
            let (elem, _) = self.parse_scalar_type()?;
            self.expect(Token::Gt)?;
            let close = self.expect(Token::Gt)?;
            Ok((ParamType::Array2(elem), kw.span.merge(&close.span)))
        } else {
            let (elem, _) = self.parse_scalar_type()?;
            let close = self.expect(Token::Gt)?;
            Ok((ParamType::Array(elem), kw.span.merge(&close.span)))
        }
    }

    /// `CALL name` or `CALL name(args)`
    fn parse_call(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwCall)?;
        let (name, name_span) = self.expect_identifier("a procedure name")?;
        let mut span = kw.span.merge(&name_span);
        let args = if self.check(&Token::LParen) {
            self.advance()?;
            let args = self.parse_argument_list()?;
            let close = self.expect(Token::RParen)?;
            span = span.merge(&close.span);
            args
        } else {
            Vec::new()
        };
        Ok(Stmt::new(StmtKind::CallProcedure { name, args }, span))
    }

    /// `RETURN expr`
    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let kw = self.expect(Token::KwReturn)?;
        let value = self.parse_expression()?;
        let span = kw.span.merge(&value.span);
        Ok(Stmt::new(StmtKind::Return { value }, span))
    }
}
