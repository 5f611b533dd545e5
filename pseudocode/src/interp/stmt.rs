//! Statement execution

use std::rc::Rc;

use pseudocode_parser::{
    ArrayBounds, CaseBranch, DeclType, Expr, IfBranch, Param, Stmt, StmtKind,
};

use crate::error::{Fault, RuntimeError};
use crate::scope::Binding;
use crate::subroutine::{Function, Parameter, Procedure};
use crate::types::Type;
use crate::value::{ArrayValue, Value};

use super::{ops, CallKind, Flow, Interpreter};

impl Interpreter<'_> {
    /// Execute a block of statements, stopping early on a RETURN
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, Fault> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Execute a single statement
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, Fault> {
        match &stmt.kind {
            StmtKind::Declare { name, ty } => {
                self.exec_declare(name, ty)?;
                Ok(Flow::Normal)
            }

            StmtKind::Constant { name, value } => {
                let value = self.eval_expr(value)?;
                self.scope.define(name.clone(), Binding::constant(value));
                Ok(Flow::Normal)
            }

            StmtKind::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.scope
                    .assign(name, value)
                    .map_err(|e| e.at(stmt.span))?;
                Ok(Flow::Normal)
            }

            StmtKind::IndexAssign { name, indices, value } => {
                let mut resolved = Vec::with_capacity(indices.len());
                for index_expr in indices {
                    let index = self.eval_expr(index_expr)?;
                    let Value::Int(i) = index else {
                        return Err(RuntimeError::IndexNotInteger {
                            got: index.type_name(),
                        }
                        .at(index_expr.span));
                    };
                    resolved.push(i);
                }
                let value = self.eval_expr(value)?;
                self.scope
                    .assign_index(name, &resolved, value)
                    .map_err(|e| e.at(stmt.span))?;
                Ok(Flow::Normal)
            }

            StmtKind::Output { values } => {
                // Arguments evaluate left to right
                let mut parts = Vec::with_capacity(values.len());
                for value in values {
                    parts.push(self.eval_expr(value)?.display());
                }
                let mut line = parts.join(" ");
                if !self.no_newlines {
                    line.push('\n');
                }
                self.console
                    .write(&line)
                    .map_err(|e| RuntimeError::IoError(e.to_string()).at(stmt.span))?;
                Ok(Flow::Normal)
            }

            StmtKind::Input { name } => {
                let line = self
                    .console
                    .read_line()
                    .map_err(|e| RuntimeError::IoError(e.to_string()).at(stmt.span))?
                    .ok_or_else(|| {
                        RuntimeError::IoError("unexpected end of input".to_string())
                            .at(stmt.span)
                    })?;
                // INPUT always installs a fresh STRING binding in the top
                // frame, even when a differently-typed variable exists
                self.scope.define(
                    name.clone(),
                    Binding::variable(Type::String, Value::Str(line)),
                );
                Ok(Flow::Normal)
            }

            StmtKind::If { branches, else_body } => self.exec_if(branches, else_body.as_deref()),

            StmtKind::Switch { subject, branches, otherwise } => {
                self.exec_switch(stmt, subject, branches, otherwise.as_deref())
            }

            StmtKind::While { cond, body } => self.exec_while(cond, body),

            StmtKind::RepeatUntil { body, cond } => self.exec_repeat(body, cond),

            StmtKind::For { iterator, start, end, step, body } => {
                self.exec_for(iterator, start, end, step.as_ref(), body)
            }

            StmtKind::Procedure { name, params, body } => {
                let params = resolve_params(params)?;
                let record = Procedure {
                    params,
                    body: body.clone(),
                };
                self.scope
                    .define(name.clone(), Binding::constant(Value::Procedure(Rc::new(record))));
                Ok(Flow::Normal)
            }

            StmtKind::Function { name, params, returns, body } => {
                let params = resolve_params(params)?;
                let record = Function {
                    params,
                    body: body.clone(),
                    return_type: Type::from_name(*returns),
                };
                self.scope
                    .define(name.clone(), Binding::constant(Value::Function(Rc::new(record))));
                Ok(Flow::Normal)
            }

            StmtKind::CallProcedure { name, args } => {
                self.call_procedure(name, args, stmt.span)?;
                Ok(Flow::Normal)
            }

            StmtKind::Return { value } => {
                if self.call_stack.last() != Some(&CallKind::Function) {
                    return Err(RuntimeError::ReturnOutsideFunction.at(stmt.span));
                }
                let value = self.eval_expr(value)?;
                Ok(Flow::Return(value))
            }
        }
    }

    /// `DECLARE name : T`: install a binding holding T's default.
    ///
    /// Arrays must be one-indexed with upper ≥ lower; 2-D declarations
    /// materialize `u1` rows of `u2` element defaults.
    fn exec_declare(&mut self, name: &str, ty: &DeclType) -> Result<(), Fault> {
        match ty {
            DeclType::Scalar(scalar) => {
                let ty = Type::from_name(*scalar);
                let value = ty.default_value();
                self.scope.define(name.to_string(), Binding::variable(ty, value));
            }
            DeclType::Array { bounds, elem } => {
                let elem_ty = Type::from_name(*elem);
                let mut lengths = Vec::with_capacity(bounds.len());
                for pair in bounds {
                    lengths.push(self.eval_bounds(pair)?);
                }
                let (declared, value) = match lengths.as_slice() {
                    [len] => {
                        let data = std::iter::repeat_with(|| elem_ty.default_value())
                            .take(*len)
                            .collect();
                        (
                            Type::Array(Box::new(elem_ty.clone())),
                            Value::Array(ArrayValue {
                                elem: elem_ty,
                                data,
                            }),
                        )
                    }
                    [rows, cols] => {
                        let row_ty = Type::Array(Box::new(elem_ty.clone()));
                        let data = std::iter::repeat_with(|| {
                            Value::Array(ArrayValue {
                                elem: elem_ty.clone(),
                                data: std::iter::repeat_with(|| elem_ty.default_value())
                                    .take(*cols)
                                    .collect(),
                            })
                        })
                        .take(*rows)
                        .collect();
                        (
                            Type::Array(Box::new(row_ty.clone())),
                            Value::Array(ArrayValue {
                                elem: row_ty,
                                data,
                            }),
                        )
                    }
                    _ => unreachable!("the parser limits declarations to two dimensions"),
                };
                self.scope
                    .define(name.to_string(), Binding::variable(declared, value));
            }
        }
        Ok(())
    }

    /// Check one `lower:upper` declaration pair, returning the length
    fn eval_bounds(&mut self, pair: &ArrayBounds) -> Result<usize, Fault> {
        let lower = self.eval_int(&pair.lower)?;
        let upper = self.eval_int(&pair.upper)?;
        if lower != 1 {
            return Err(RuntimeError::ArrayNotOneIndexed { lower }.at(pair.lower.span));
        }
        if upper < lower {
            return Err(RuntimeError::ArrayBoundsInvalid { lower, upper }.at(pair.upper.span));
        }
        Ok(upper as usize)
    }

    /// Evaluate an expression that must be an INTEGER
    fn eval_int(&mut self, expr: &Expr) -> Result<i64, Fault> {
        let value = self.eval_expr(expr)?;
        match value {
            Value::Int(n) => Ok(n),
            other => Err(RuntimeError::TypeMismatch {
                expected: "INTEGER".to_string(),
                got: other.type_name(),
            }
            .at(expr.span)),
        }
    }

    /// Evaluate an expression that must be a BOOLEAN (conditions)
    fn eval_condition(&mut self, expr: &Expr) -> Result<bool, Fault> {
        let value = self.eval_expr(expr)?;
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::TypeMismatch {
                expected: "BOOLEAN".to_string(),
                got: other.type_name(),
            }
            .at(expr.span)),
        }
    }

    /// Branches are checked in order; at most one runs, inside its own frame
    fn exec_if(
        &mut self,
        branches: &[IfBranch],
        else_body: Option<&[Stmt]>,
    ) -> Result<Flow, Fault> {
        for branch in branches {
            if self.eval_condition(&branch.cond)? {
                return self.with_frame(|interp| interp.exec_block(&branch.body));
            }
        }
        match else_body {
            Some(body) => self.with_frame(|interp| interp.exec_block(body)),
            None => Ok(Flow::Normal),
        }
    }

    /// `CASE OF`: labels are tested in order against the subject's current
    /// value; a label of a different type simply does not match
    fn exec_switch(
        &mut self,
        stmt: &Stmt,
        subject: &str,
        branches: &[CaseBranch],
        otherwise: Option<&[Stmt]>,
    ) -> Result<Flow, Fault> {
        let current = self.scope.get(subject).map_err(|e| e.at(stmt.span))?.clone();

        for branch in branches {
            let label = self.eval_expr(&branch.label)?;
            if ops::value_eq(&current, &label).unwrap_or(false) {
                return self.with_frame(|interp| interp.exec_block(&branch.body));
            }
        }
        match otherwise {
            Some(body) => self.with_frame(|interp| interp.exec_block(body)),
            None => Ok(Flow::Normal),
        }
    }

    fn exec_while(&mut self, cond: &Expr, body: &[Stmt]) -> Result<Flow, Fault> {
        self.with_frame(|interp| {
            while interp.eval_condition(cond)? {
                if let Flow::Return(value) = interp.exec_block(body)? {
                    return Ok(Flow::Return(value));
                }
            }
            Ok(Flow::Normal)
        })
    }

    /// Execute the body, then test; exit when the condition is TRUE
    fn exec_repeat(&mut self, body: &[Stmt], cond: &Expr) -> Result<Flow, Fault> {
        self.with_frame(|interp| {
            loop {
                if let Flow::Return(value) = interp.exec_block(body)? {
                    return Ok(Flow::Return(value));
                }
                if interp.eval_condition(cond)? {
                    return Ok(Flow::Normal);
                }
            }
        })
    }

    /// `FOR i ← start TO end [STEP s]`
    ///
    /// The iterator lives in a fresh frame and is immutable to the body;
    /// the loop advances it through a scope-internal hook.
    fn exec_for(
        &mut self,
        iterator: &str,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
        body: &[Stmt],
    ) -> Result<Flow, Fault> {
        let start_value = self.eval_int(start)?;
        let end_value = self.eval_int(end)?;
        let step_value = match step {
            Some(expr) => {
                let s = self.eval_int(expr)?;
                if s == 0 {
                    return Err(RuntimeError::StepZero.at(expr.span));
                }
                s
            }
            None => 1,
        };

        self.with_frame(|interp| {
            interp.scope.define(
                iterator.to_string(),
                Binding {
                    declared: Some(Type::Integer),
                    value: Value::Int(start_value),
                    mutable: false,
                },
            );

            let mut i = start_value;
            while (step_value > 0 && i <= end_value) || (step_value < 0 && i >= end_value) {
                interp.scope.set_for_iterator(iterator, i);
                if let Flow::Return(value) = interp.exec_block(body)? {
                    return Ok(Flow::Return(value));
                }
                i = i.wrapping_add(step_value);
            }
            Ok(Flow::Normal)
        })
    }
}

/// Resolve parameter descriptors, rejecting duplicate names
fn resolve_params(params: &[Param]) -> Result<Vec<Parameter>, Fault> {
    let mut resolved: Vec<Parameter> = Vec::with_capacity(params.len());
    for param in params {
        if resolved.iter().any(|p| p.name == param.name) {
            return Err(RuntimeError::DuplicateParameter(param.name.clone()).at(param.span));
        }
        resolved.push(Parameter {
            name: param.name.clone(),
            ty: Type::from_param(param.ty),
        });
    }
    Ok(resolved)
}
