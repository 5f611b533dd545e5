//! pseudocode_parser
//!
//! Lexer and recursive-descent parser for the pseudocode teaching language.
//! Produces a span-annotated AST; every runtime diagnostic in the evaluator
//! points back at a node parsed here.
//!
//! # Example
//!
//! ```
//! use pseudocode_parser::parse;
//!
//! let program = parse("DECLARE x : INTEGER\nx <- 3").expect("parse failed");
//! assert_eq!(program.stmts.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

// Re-exports
pub use ast::{
    ArrayBounds, BinaryOp, CaseBranch, DeclType, Expr, ExprKind, IfBranch, Param, ParamType,
    Program, Stmt, StmtKind, TypeName,
};
pub use error::{ParseError, ParseResult};
pub use lexer::{Lexer, SpannedToken};
pub use parser::Parser;
pub use span::{LineMap, Span};
pub use token::{Precedence, Token};

/// Parse pseudocode source into a [`Program`]
///
/// # Example
///
/// ```
/// use pseudocode_parser::parse;
///
/// let program = parse("OUTPUT 1 + 2").unwrap();
/// assert_eq!(program.stmts.len(), 1);
/// ```
pub fn parse(source: &str) -> ParseResult<Program> {
    parser::parse(source)
}

/// Tokenize pseudocode source
///
/// Returns a vector of tokens with their spans.
pub fn tokenize(source: &str) -> Vec<ParseResult<SpannedToken<'_>>> {
    lexer::tokenize(source)
}
