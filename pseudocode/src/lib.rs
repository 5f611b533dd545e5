//! pseudocode
//!
//! Tree-walking evaluator for the pseudocode teaching language: runtime
//! type system, lexical scope stack, statement and expression evaluation,
//! subroutine calls with pass-by-value arrays, and `file:line` diagnostics.
//!
//! Source text is parsed by the companion `pseudocode_parser` crate; this
//! crate executes the resulting AST directly; there is no bytecode.
//!
//! # Example
//!
//! ```
//! use pseudocode::{run_source, RunOptions, ScriptedConsole};
//!
//! let mut console = ScriptedConsole::new();
//! run_source("OUTPUT 2 + 2", &RunOptions::default(), &mut console).unwrap();
//! assert_eq!(console.output(), "4\n");
//! ```

pub mod console;
pub mod error;
mod interp;
pub mod pipeline;
pub mod scope;
pub mod subroutine;
pub mod types;
pub mod value;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use error::{render_diagnostic, Fault, RuntimeError};
pub use interp::Interpreter;
pub use pipeline::{prepare_source, run, run_source, ProgramError, RunOptions};
pub use scope::{Binding, Scope};
pub use types::Type;
pub use value::{ArrayValue, Value};
