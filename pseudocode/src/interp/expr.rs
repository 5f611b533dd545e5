//! Expression evaluation

use pseudocode_parser::{BinaryOp, Expr, ExprKind};

use crate::error::{Fault, RuntimeError};
use crate::value::{check_index, Value};

use super::{ops, Interpreter};

impl Interpreter<'_> {
    /// Reduce an expression to a value
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, Fault> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Real(x) => Ok(Value::Real(*x)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Char(c) => Ok(Value::Char(*c)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),

            ExprKind::Var(name) => self
                .scope
                .get(name)
                .map(Value::clone)
                .map_err(|e| e.at(expr.span)),

            ExprKind::Neg(operand) => {
                let value = self.eval_expr(operand)?;
                match value {
                    Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
                    Value::Real(x) => Ok(Value::Real(-x)),
                    other => Err(RuntimeError::TypeMismatch {
                        expected: "INTEGER or REAL".to_string(),
                        got: other.type_name(),
                    }
                    .at(operand.span)),
                }
            }

            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::And | BinaryOp::Or => self.eval_logical(*op, left, right),
                _ => {
                    // Left operand first, then right; the operator itself
                    // reports incompatible combinations
                    let l = self.eval_expr(left)?;
                    let r = self.eval_expr(right)?;
                    ops::apply_binary(*op, l, r).map_err(|e| e.at(expr.span))
                }
            },

            ExprKind::Index { target, indices } => self.eval_index(expr, target, indices),

            ExprKind::Call { name, args } => self.call_function(name, args, expr.span),

            ExprKind::Length(arg) => {
                let value = self.eval_expr(arg)?;
                super::builtins::length(&value).map_err(|e| e.at(expr.span))
            }

            ExprKind::Cast { ty, arg } => {
                let value = self.eval_expr(arg)?;
                super::builtins::cast(*ty, value).map_err(|e| e.at(expr.span))
            }
        }
    }

    /// AND/OR with left-to-right short-circuit; both operands must be BOOLEAN
    fn eval_logical(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<Value, Fault> {
        let l = self.eval_expr(left)?;
        let Value::Bool(l) = l else {
            return Err(RuntimeError::TypeMismatch {
                expected: "BOOLEAN".to_string(),
                got: l.type_name(),
            }
            .at(left.span));
        };

        // Short-circuit: the right operand is not evaluated when the left
        // already decides the result
        match (op, l) {
            (BinaryOp::And, false) => return Ok(Value::Bool(false)),
            (BinaryOp::Or, true) => return Ok(Value::Bool(true)),
            _ => {}
        }

        let r = self.eval_expr(right)?;
        let Value::Bool(r) = r else {
            return Err(RuntimeError::TypeMismatch {
                expected: "BOOLEAN".to_string(),
                got: r.type_name(),
            }
            .at(right.span));
        };
        Ok(Value::Bool(r))
    }

    /// `target[i]` / `target[i, j]`: STRING yields CHAR, ARRAY yields the
    /// element; indices are 1-based and bounds-checked
    fn eval_index(
        &mut self,
        expr: &Expr,
        target: &Expr,
        indices: &[Expr],
    ) -> Result<Value, Fault> {
        let value = self.eval_expr(target)?;

        let mut resolved = Vec::with_capacity(indices.len());
        for index_expr in indices {
            let index = self.eval_expr(index_expr)?;
            let Value::Int(i) = index else {
                return Err(RuntimeError::IndexNotInteger {
                    got: index.type_name(),
                }
                .at(index_expr.span));
            };
            resolved.push((i, index_expr.span));
        }

        match value {
            Value::Str(s) => {
                if resolved.len() != 1 {
                    return Err(RuntimeError::DimensionMismatch {
                        dims: 1,
                        indices: resolved.len(),
                    }
                    .at(expr.span));
                }
                let (i, span) = resolved[0];
                let length = s.chars().count();
                let offset = check_index(i, length).map_err(|e| e.at(span))?;
                let c = s.chars().nth(offset).expect("offset is bounds-checked");
                Ok(Value::Char(c))
            }
            Value::Array(arr) => {
                let (i, span) = resolved[0];
                let offset = arr.check_index(i).map_err(|e| e.at(span))?;
                let element = &arr.data[offset];
                match resolved.get(1) {
                    None => Ok(element.clone()),
                    Some(&(j, span)) => {
                        let Value::Array(row) = element else {
                            return Err(RuntimeError::DimensionMismatch {
                                dims: 1,
                                indices: 2,
                            }
                            .at(expr.span));
                        };
                        let inner = row.check_index(j).map_err(|e| e.at(span))?;
                        Ok(row.data[inner].clone())
                    }
                }
            }
            other => Err(RuntimeError::NotIndexable {
                got: other.type_name(),
            }
            .at(target.span)),
        }
    }
}
