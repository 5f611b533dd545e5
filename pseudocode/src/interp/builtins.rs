//! Builtin functions: LENGTH and the type-name conversions

use pseudocode_parser::TypeName;

use crate::error::RuntimeError;
use crate::types::Type;
use crate::value::{format_real, Value};

/// `LENGTH(x)`: element count of an ARRAY or code-point count of a STRING
pub(crate) fn length(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::Array(arr) => Ok(Value::Int(arr.len() as i64)),
        other => Err(RuntimeError::TypeMismatch {
            expected: "STRING or ARRAY".to_string(),
            got: other.type_name(),
        }),
    }
}

/// `T(x)`: convert a value to the named scalar type.
///
/// Identity casts always succeed; the other legal conversions are
/// INTEGER↔REAL, INTEGER/REAL→STRING, STRING→INTEGER/REAL (parsed),
/// CHAR→STRING, and STRING of length 1→CHAR.
pub(crate) fn cast(ty: TypeName, value: Value) -> Result<Value, RuntimeError> {
    let cast_error = |value: &Value| RuntimeError::CastError {
        from: value.type_name(),
        to: Type::from_name(ty).to_string(),
    };

    match ty {
        TypeName::Integer => match value {
            Value::Int(_) => Ok(value),
            Value::Real(x) => {
                if x.is_finite() {
                    Ok(Value::Int(x.trunc() as i64))
                } else {
                    Err(cast_error(&value))
                }
            }
            Value::Str(ref s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| cast_error(&value)),
            _ => Err(cast_error(&value)),
        },
        TypeName::Real => match value {
            Value::Real(_) => Ok(value),
            Value::Int(n) => Ok(Value::Real(n as f64)),
            Value::Str(ref s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| cast_error(&value)),
            _ => Err(cast_error(&value)),
        },
        TypeName::String => match value {
            Value::Str(_) => Ok(value),
            Value::Int(n) => Ok(Value::Str(n.to_string())),
            Value::Real(x) => Ok(Value::Str(format_real(x))),
            Value::Char(c) => Ok(Value::Str(c.to_string())),
            _ => Err(cast_error(&value)),
        },
        TypeName::Char => match value {
            Value::Char(_) => Ok(value),
            Value::Str(ref s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(cast_error(&value)),
                }
            }
            _ => Err(cast_error(&value)),
        },
        TypeName::Boolean => match value {
            Value::Bool(_) => Ok(value),
            _ => Err(cast_error(&value)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ArrayValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_length() {
        assert!(matches!(
            length(&Value::Str("héllo".into())).unwrap(),
            Value::Int(5)
        ));
        let arr = Value::Array(ArrayValue {
            elem: Type::Integer,
            data: vec![Value::Int(0); 4],
        });
        assert!(matches!(length(&arr).unwrap(), Value::Int(4)));
        assert!(length(&Value::Int(3)).is_err());
    }

    #[test]
    fn test_numeric_casts() {
        assert!(matches!(
            cast(TypeName::Integer, Value::Real(3.9)).unwrap(),
            Value::Int(3)
        ));
        assert!(matches!(
            cast(TypeName::Integer, Value::Real(-3.9)).unwrap(),
            Value::Int(-3)
        ));
        let Value::Real(x) = cast(TypeName::Real, Value::Int(2)).unwrap() else {
            panic!("expected REAL");
        };
        assert_eq!(x, 2.0);
    }

    #[test]
    fn test_string_casts() {
        let Value::Str(s) = cast(TypeName::String, Value::Real(3.0)).unwrap() else {
            panic!("expected STRING");
        };
        assert_eq!(s, "3.0");

        assert!(matches!(
            cast(TypeName::Integer, Value::Str(" 42 ".into())).unwrap(),
            Value::Int(42)
        ));
        assert!(cast(TypeName::Integer, Value::Str("4.2".into())).is_err());

        let Value::Real(x) = cast(TypeName::Real, Value::Str("1.5".into())).unwrap() else {
            panic!("expected REAL");
        };
        assert_eq!(x, 1.5);
    }

    #[test]
    fn test_char_casts() {
        assert!(matches!(
            cast(TypeName::Char, Value::Str("x".into())).unwrap(),
            Value::Char('x')
        ));
        assert!(cast(TypeName::Char, Value::Str("xy".into())).is_err());
        assert!(cast(TypeName::Char, Value::Str("".into())).is_err());

        let Value::Str(s) = cast(TypeName::String, Value::Char('q')).unwrap() else {
            panic!("expected STRING");
        };
        assert_eq!(s, "q");
    }

    #[test]
    fn test_identity_casts() {
        assert!(matches!(
            cast(TypeName::Boolean, Value::Bool(true)).unwrap(),
            Value::Bool(true)
        ));
        assert!(matches!(
            cast(TypeName::String, Value::Str("s".into())).unwrap(),
            Value::Str(_)
        ));
    }

    #[test]
    fn test_illegal_casts() {
        assert_eq!(
            cast(TypeName::Boolean, Value::Int(1)).unwrap_err(),
            RuntimeError::CastError {
                from: "INTEGER".into(),
                to: "BOOLEAN".into()
            }
        );
        assert!(cast(TypeName::Char, Value::Int(65)).is_err());
        assert!(cast(TypeName::Integer, Value::Bool(false)).is_err());
    }
}
