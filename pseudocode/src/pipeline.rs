//! The driver pipeline: strip source lines, parse, execute
//!
//! Both the CLI and tests run programs through here so diagnostics render
//! identically everywhere.

use std::fmt;

use pseudocode_parser::{parse, ParseError};

use crate::console::Console;
use crate::error::{render_diagnostic, Fault};
use crate::interp::Interpreter;

/// Evaluator flags carried from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Suppress the automatic newline after each OUTPUT
    pub no_newlines: bool,
}

/// Any failure a program run can end with
#[derive(Debug)]
pub enum ProgramError {
    Parse(ParseError),
    Runtime(Fault),
}

impl ProgramError {
    /// The 1-indexed source line the failure points at
    pub fn line(&self) -> usize {
        match self {
            ProgramError::Parse(e) => e.span().line,
            ProgramError::Runtime(fault) => fault.line(),
        }
    }

    /// Render the standard diagnostic against the prepared source text
    pub fn render(&self, file: &str, source: &str) -> String {
        render_diagnostic(file, source, self.line(), self)
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Parse(e) => e.fmt(f),
            ProgramError::Runtime(fault) => fault.fmt(f),
        }
    }
}

impl std::error::Error for ProgramError {}

impl From<ParseError> for ProgramError {
    fn from(e: ParseError) -> Self {
        ProgramError::Parse(e)
    }
}

impl From<Fault> for ProgramError {
    fn from(fault: Fault) -> Self {
        ProgramError::Runtime(fault)
    }
}

/// Strip leading/trailing whitespace from every line and join with LF.
///
/// Columns and diagnostic context lines refer to this prepared text.
pub fn prepare_source(source: &str) -> String {
    source
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse and execute prepared source against the given console
pub fn run(
    source: &str,
    options: &RunOptions,
    console: &mut dyn Console,
) -> Result<(), ProgramError> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new(console, options.no_newlines);
    interpreter.run(&program)?;
    Ok(())
}

/// Convenience wrapper: prepare, parse, and execute raw source
pub fn run_source(
    source: &str,
    options: &RunOptions,
    console: &mut dyn Console,
) -> Result<(), ProgramError> {
    run(&prepare_source(source), options, console)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prepare_source_strips_indentation() {
        let raw = "  IF x THEN  \n\tOUTPUT 1\nENDIF";
        assert_eq!(prepare_source(raw), "IF x THEN\nOUTPUT 1\nENDIF");
    }

    #[test]
    fn test_run_simple_program() {
        let mut console = ScriptedConsole::new();
        run_source("OUTPUT 1 + 2", &RunOptions::default(), &mut console).unwrap();
        assert_eq!(console.output(), "3\n");
    }

    #[test]
    fn test_parse_error_line() {
        let mut console = ScriptedConsole::new();
        let err = run_source(
            "OUTPUT 1\nDECLARE : INTEGER",
            &RunOptions::default(),
            &mut console,
        )
        .unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(matches!(err, ProgramError::Parse(_)));
    }

    #[test]
    fn test_render_runtime_diagnostic() {
        let source = "CONSTANT PI = 3.14\nPI <- 1";
        let mut console = ScriptedConsole::new();
        let err = run_source(source, &RunOptions::default(), &mut console).unwrap_err();
        let rendered = err.render("demo.pseudo", &prepare_source(source));
        assert_eq!(
            rendered,
            "demo.pseudo:2: Cannot assign to constant \"PI\"\n    PI <- 1"
        );
    }
}
