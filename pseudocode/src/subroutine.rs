//! Procedure and function records
//!
//! Definitions clone their body statements out of the program AST; records
//! are immutable after definition and shared behind `Rc`.

use pseudocode_parser::Stmt;

use crate::types::Type;

/// A resolved subroutine parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

/// A procedure: parameters and a body, no return value
#[derive(Debug)]
pub struct Procedure {
    pub params: Vec<Parameter>,
    pub body: Vec<Stmt>,
}

/// A function: parameters, a body, and a declared return type
#[derive(Debug)]
pub struct Function {
    pub params: Vec<Parameter>,
    pub body: Vec<Stmt>,
    pub return_type: Type,
}
