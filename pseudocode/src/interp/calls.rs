//! The subroutine call mechanism
//!
//! Arguments are evaluated eagerly in the caller's scope and copied into a
//! fresh frame. Values own their data, so the copy is deep and the callee
//! cannot mutate the caller's arrays. Parameter types must match the
//! runtime argument types exactly.

use std::rc::Rc;

use pseudocode_parser::{Expr, Span};

use crate::error::{Fault, RuntimeError};
use crate::subroutine::{Function, Parameter, Procedure};
use crate::value::Value;

use super::{CallKind, Flow, Interpreter};

impl Interpreter<'_> {
    /// Evaluate a function call expression `name(args)`
    pub(crate) fn call_function(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, Fault> {
        let callee = self.scope.get(name).map_err(|e| e.at(span))?.clone();
        let function: Rc<Function> = match callee {
            Value::Function(f) => f,
            other => {
                return Err(RuntimeError::WrongSubroutineKind {
                    name: name.to_string(),
                    expected: "Function",
                    got: other.type_name(),
                }
                .at(span))
            }
        };

        let values = self.eval_arguments(&function.params, args, span)?;

        self.call_stack.push(CallKind::Function);
        self.scope.push();
        let outcome = self.bind_and_exec(&function.params, values, &function.body);
        self.scope.pop();
        self.call_stack.pop();

        match outcome? {
            Flow::Return(value) => {
                if !value.matches_type(&function.return_type) {
                    return Err(RuntimeError::ReturnTypeMismatch {
                        expected: function.return_type.to_string(),
                        got: value.type_name(),
                    }
                    .at(span));
                }
                Ok(value)
            }
            // Fell off the end of the body: the call yields the return
            // type's default
            Flow::Normal => Ok(function.return_type.default_value()),
        }
    }

    /// Execute a `CALL name(args)` statement
    pub(crate) fn call_procedure(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<(), Fault> {
        let callee = self.scope.get(name).map_err(|e| e.at(span))?.clone();
        let procedure: Rc<Procedure> = match callee {
            Value::Procedure(p) => p,
            other => {
                return Err(RuntimeError::WrongSubroutineKind {
                    name: name.to_string(),
                    expected: "Procedure",
                    got: other.type_name(),
                }
                .at(span))
            }
        };

        let values = self.eval_arguments(&procedure.params, args, span)?;

        self.call_stack.push(CallKind::Procedure);
        self.scope.push();
        let outcome = self.bind_and_exec(&procedure.params, values, &procedure.body);
        self.scope.pop();
        self.call_stack.pop();

        // RETURN inside a procedure body is rejected at the RETURN site, so
        // only normal completion reaches here
        outcome.map(|_| ())
    }

    /// Evaluate arguments in the caller's scope, checking arity and each
    /// argument's type against its parameter
    fn eval_arguments(
        &mut self,
        params: &[Parameter],
        args: &[Expr],
        span: Span,
    ) -> Result<Vec<Value>, Fault> {
        if args.len() != params.len() {
            return Err(RuntimeError::ArityMismatch {
                expected: params.len(),
                got: args.len(),
            }
            .at(span));
        }

        let mut values = Vec::with_capacity(args.len());
        for (param, arg) in params.iter().zip(args) {
            let value = self.eval_expr(arg)?;
            if !value.matches_type(&param.ty) {
                return Err(RuntimeError::TypeMismatch {
                    expected: param.ty.to_string(),
                    got: value.type_name(),
                }
                .at(arg.span));
            }
            values.push(value);
        }
        Ok(values)
    }

    /// Bind parameter values in the already-pushed frame and run the body
    fn bind_and_exec(
        &mut self,
        params: &[Parameter],
        values: Vec<Value>,
        body: &[pseudocode_parser::Stmt],
    ) -> Result<Flow, Fault> {
        for (param, value) in params.iter().zip(values) {
            self.scope.define(
                param.name.clone(),
                crate::scope::Binding::variable(param.ty.clone(), value),
            );
        }
        self.exec_block(body)
    }
}
