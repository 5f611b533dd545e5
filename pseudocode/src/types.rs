//! The runtime type set
//!
//! The language has a fixed set of types: five scalars plus arrays of up to
//! two dimensions. A 2-D array is an array whose element type is itself an
//! array.

use std::fmt;

use pseudocode_parser::{ParamType, TypeName};

use crate::value::{ArrayValue, Value};

/// A runtime type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Integer,
    Real,
    String,
    Boolean,
    Char,
    Array(Box<Type>),
}

impl Type {
    /// Convert a source-level scalar type name
    pub fn from_name(name: TypeName) -> Self {
        match name {
            TypeName::Integer => Type::Integer,
            TypeName::Real => Type::Real,
            TypeName::String => Type::String,
            TypeName::Boolean => Type::Boolean,
            TypeName::Char => Type::Char,
        }
    }

    /// Convert a parameter type descriptor
    pub fn from_param(ty: ParamType) -> Self {
        match ty {
            ParamType::Scalar(name) => Type::from_name(name),
            ParamType::Array(elem) => Type::Array(Box::new(Type::from_name(elem))),
            ParamType::Array2(elem) => Type::Array(Box::new(Type::Array(Box::new(
                Type::from_name(elem),
            )))),
        }
    }

    /// The default value a declaration of this type is initialized to
    pub fn default_value(&self) -> Value {
        match self {
            Type::Integer => Value::Int(0),
            Type::Real => Value::Real(0.0),
            Type::String => Value::Str(String::new()),
            Type::Boolean => Value::Bool(false),
            Type::Char => Value::Char('\0'),
            Type::Array(elem) => Value::Array(ArrayValue {
                elem: (**elem).clone(),
                data: Vec::new(),
            }),
        }
    }

    /// True when this type is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer => write!(f, "INTEGER"),
            Type::Real => write!(f, "REAL"),
            Type::String => write!(f, "STRING"),
            Type::Boolean => write!(f, "BOOLEAN"),
            Type::Char => write!(f, "CHAR"),
            Type::Array(elem) => write!(f, "ARRAY<{}>", elem),
        }
    }
}
