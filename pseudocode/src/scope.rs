//! The lexical environment
//!
//! A stack of insertion-ordered frames mapping names to bindings. Lookup and
//! assignment search from the innermost frame outward; `define` always
//! installs in the top frame, so shadowing across frames is permitted and
//! redefinition within a frame overwrites.

use indexmap::IndexMap;

use crate::error::RuntimeError;
use crate::types::Type;
use crate::value::Value;

/// A name's binding: declared type, current value, mutability.
///
/// Constants carry no declared type; their type is the initializer's.
#[derive(Debug)]
pub struct Binding {
    pub declared: Option<Type>,
    pub value: Value,
    pub mutable: bool,
}

impl Binding {
    /// A mutable variable of a declared type
    pub fn variable(ty: Type, value: Value) -> Self {
        Self {
            declared: Some(ty),
            value,
            mutable: true,
        }
    }

    /// An immutable binding whose type is inferred from its value
    pub fn constant(value: Value) -> Self {
        Self {
            declared: None,
            value,
            mutable: false,
        }
    }
}

type Frame = IndexMap<String, Binding>;

/// The scope stack; the outermost frame is the global frame
#[derive(Debug)]
pub struct Scope {
    stack: Vec<Frame>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::new()],
        }
    }

    /// Enter a lexical frame
    pub fn push(&mut self) {
        self.stack.push(Frame::new());
    }

    /// Leave the innermost frame, dropping its bindings.
    ///
    /// The global frame is never popped.
    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "attempted to pop the global frame");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Number of frames currently entered
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Install a binding in the top frame
    pub fn define(&mut self, name: impl Into<String>, binding: Binding) {
        self.stack
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name.into(), binding);
    }

    /// Innermost-first lookup
    pub fn get(&self, name: &str) -> Result<&Value, RuntimeError> {
        for frame in self.stack.iter().rev() {
            if let Some(binding) = frame.get(name) {
                return Ok(&binding.value);
            }
        }
        Err(RuntimeError::VariableUndefined(name.to_string()))
    }

    /// Assign to the innermost binding of `name`.
    ///
    /// Constants and whole-array targets reject the write; otherwise the
    /// value's type must equal the declared type.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        for frame in self.stack.iter_mut().rev() {
            let Some(binding) = frame.get_mut(name) else {
                continue;
            };
            if !binding.mutable {
                return Err(RuntimeError::ConstantAssignment(name.to_string()));
            }
            if let Some(declared) = &binding.declared {
                if declared.is_array() {
                    return Err(RuntimeError::ArrayReassignment(name.to_string()));
                }
                if !value.matches_type(declared) {
                    return Err(RuntimeError::TypeMismatch {
                        expected: declared.to_string(),
                        got: value.type_name(),
                    });
                }
            }
            binding.value = value;
            return Ok(());
        }
        Err(RuntimeError::VariableUndeclared(name.to_string()))
    }

    /// Write one slot of an array binding in place.
    ///
    /// Bounds are checked before any mutation; the value's type must equal
    /// the slot's element type, with no widening.
    pub fn assign_index(
        &mut self,
        name: &str,
        indices: &[i64],
        value: Value,
    ) -> Result<(), RuntimeError> {
        for frame in self.stack.iter_mut().rev() {
            let Some(binding) = frame.get_mut(name) else {
                continue;
            };
            let Value::Array(arr) = &mut binding.value else {
                return Err(RuntimeError::NotAnArray {
                    name: name.to_string(),
                    got: binding.value.type_name(),
                });
            };

            let offset = arr.check_index(indices[0])?;
            match indices {
                [_] => {
                    if !value.matches_type(&arr.elem) {
                        return Err(RuntimeError::TypeMismatch {
                            expected: arr.elem.to_string(),
                            got: value.type_name(),
                        });
                    }
                    arr.data[offset] = value;
                }
                [_, inner_index] => {
                    let Value::Array(row) = &mut arr.data[offset] else {
                        return Err(RuntimeError::DimensionMismatch { dims: 1, indices: 2 });
                    };
                    let inner_offset = row.check_index(*inner_index)?;
                    if !value.matches_type(&row.elem) {
                        return Err(RuntimeError::TypeMismatch {
                            expected: row.elem.to_string(),
                            got: value.type_name(),
                        });
                    }
                    row.data[inner_offset] = value;
                }
                _ => unreachable!("the parser limits indices to two"),
            }
            return Ok(());
        }
        Err(RuntimeError::VariableUndeclared(name.to_string()))
    }

    /// Advance a FOR iterator in place.
    ///
    /// The iterator binding is immutable to user code; only the loop itself
    /// moves it, through this hook.
    pub(crate) fn set_for_iterator(&mut self, name: &str, value: i64) {
        for frame in self.stack.iter_mut().rev() {
            if let Some(binding) = frame.get_mut(name) {
                binding.value = Value::Int(value);
                return;
            }
        }
        debug_assert!(false, "FOR iterator binding disappeared");
    }
}
