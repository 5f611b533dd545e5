//! Runtime errors and diagnostics
//!
//! Every failure the evaluator can raise, plus the span-carrying `Fault`
//! that ties a failure back to its source line. The function-return control
//! signal is NOT an error and never appears here.

use std::fmt;

use pseudocode_parser::Span;

/// Runtime errors raised during evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Name lookup failed
    VariableUndefined(String),
    /// Assignment target was never declared
    VariableUndeclared(String),
    /// Assignment to an immutable binding
    ConstantAssignment(String),
    /// Whole-array assignment; arrays are mutated through indices only
    ArrayReassignment(String),
    /// Value type differs from the declared/expected type
    TypeMismatch { expected: String, got: String },
    /// Binary operator applied to an unsupported type combination
    OperatorTypeMismatch { left: String, right: String },
    IndexNotInteger { got: String },
    IndexOutOfBounds { index: i64, length: usize },
    /// Upper bound below lower bound in a declaration
    ArrayBoundsInvalid { lower: i64, upper: i64 },
    /// Lower bound other than 1 in a declaration
    ArrayNotOneIndexed { lower: i64 },
    /// Number of indices does not fit the value's rank
    DimensionMismatch { dims: usize, indices: usize },
    /// Index assignment to a non-array
    NotAnArray { name: String, got: String },
    /// Indexing a value that is neither STRING nor ARRAY
    NotIndexable { got: String },
    ArityMismatch { expected: usize, got: usize },
    /// CALL on a function, or a direct call on a procedure
    WrongSubroutineKind {
        name: String,
        expected: &'static str,
        got: String,
    },
    ReturnOutsideFunction,
    ReturnTypeMismatch { expected: String, got: String },
    CastError { from: String, to: String },
    DivisionByZero,
    StepZero,
    DuplicateParameter(String),
    IoError(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VariableUndefined(name) => {
                write!(f, "Variable \"{}\" is not defined", name)
            }
            Self::VariableUndeclared(name) => {
                write!(f, "Variable \"{}\" is not declared", name)
            }
            Self::ConstantAssignment(name) => {
                write!(f, "Cannot assign to constant \"{}\"", name)
            }
            Self::ArrayReassignment(name) => {
                write!(
                    f,
                    "Cannot reassign array \"{}\"; assign to an index instead",
                    name
                )
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch, expected \"{}\", got \"{}\"", expected, got)
            }
            Self::OperatorTypeMismatch { left, right } => {
                write!(
                    f,
                    "Operation not supported between \"{}\" and \"{}\"",
                    left, right
                )
            }
            Self::IndexNotInteger { got } => {
                write!(f, "Index must be an INTEGER, got \"{}\"", got)
            }
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index \"{}\" out of bounds for length {}", index, length)
            }
            Self::ArrayBoundsInvalid { lower, upper } => {
                write!(f, "Invalid array bounds {}:{}", lower, upper)
            }
            Self::ArrayNotOneIndexed { lower } => {
                write!(f, "Array must be 1-indexed, got lower bound {}", lower)
            }
            Self::DimensionMismatch { dims, indices } => {
                write!(
                    f,
                    "Dimension mismatch: {} {} applied to a value with {} {}",
                    indices,
                    plural(*indices, "index", "indices"),
                    dims,
                    plural(*dims, "dimension", "dimensions"),
                )
            }
            Self::NotAnArray { name, got } => {
                write!(
                    f,
                    "Cannot apply index assignment to \"{}\" of type \"{}\"",
                    name, got
                )
            }
            Self::NotIndexable { got } => {
                write!(f, "Cannot apply indexing to \"{}\"", got)
            }
            Self::ArityMismatch { expected, got } => {
                write!(f, "Expected {} arguments, got {}", expected, got)
            }
            Self::WrongSubroutineKind { name, expected, got } => {
                write!(
                    f,
                    "Expected \"{}\" to be a {}, got \"{}\"",
                    name, expected, got
                )
            }
            Self::ReturnOutsideFunction => {
                write!(f, "RETURN statement outside Function block")
            }
            Self::ReturnTypeMismatch { expected, got } => {
                write!(f, "Expected \"{}\" RETURN type, got \"{}\"", expected, got)
            }
            Self::CastError { from, to } => {
                write!(f, "Cannot cast \"{}\" to \"{}\"", from, to)
            }
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::StepZero => write!(f, "Iteration step cannot be 0"),
            Self::DuplicateParameter(name) => {
                write!(f, "Duplicate parameter \"{}\"", name)
            }
            Self::IoError(message) => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for RuntimeError {}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

impl RuntimeError {
    /// Attach the span of the AST node being evaluated
    pub fn at(self, span: Span) -> Fault {
        Fault { error: self, span }
    }
}

/// A runtime error tied to the source location it was raised at
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub error: RuntimeError,
    pub span: Span,
}

impl Fault {
    /// The 1-indexed source line of the failure
    pub fn line(&self) -> usize {
        self.span.line
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for Fault {}

/// Render the standard diagnostic: `file:line: message` followed by the
/// offending source line
pub fn render_diagnostic(
    file: &str,
    source: &str,
    line: usize,
    message: impl fmt::Display,
) -> String {
    let context = source.lines().nth(line.saturating_sub(1)).unwrap_or("");
    format!("{}:{}: {}\n    {}", file, line, message, context)
}
