//! Shared helpers for integration tests
// Consumed selectively by the test files; not every helper is referenced in
// each test target.
#![allow(dead_code)]

use pseudocode::{prepare_source, run, ProgramError, RunOptions, ScriptedConsole};

/// Run a program and return its captured output. Panics on any failure.
pub fn run_ok(src: &str) -> String {
    run_with_input(src, &[])
}

/// Run a program with scripted INPUT lines and return its captured output
pub fn run_with_input(src: &str, input: &[&str]) -> String {
    let mut console = ScriptedConsole::with_input(input);
    run(&prepare_source(src), &RunOptions::default(), &mut console)
        .unwrap_or_else(|e| panic!("program failed: {}", e));
    console.into_output()
}

/// Run a program with `--no-newlines` behavior
pub fn run_no_newlines(src: &str) -> String {
    let mut console = ScriptedConsole::new();
    let options = RunOptions { no_newlines: true };
    run(&prepare_source(src), &options, &mut console)
        .unwrap_or_else(|e| panic!("program failed: {}", e));
    console.into_output()
}

/// Run a program that must fail, returning the error
pub fn run_err(src: &str) -> ProgramError {
    let mut console = ScriptedConsole::new();
    match run(&prepare_source(src), &RunOptions::default(), &mut console) {
        Ok(()) => panic!("program unexpectedly succeeded; output: {:?}", console.output()),
        Err(e) => e,
    }
}

/// Run a failing program and return the rendered diagnostic, as the CLI
/// would print it for a file named `test.pseudo`
pub fn run_diagnostic(src: &str) -> String {
    let prepared = prepare_source(src);
    let err = run_err(src);
    err.render("test.pseudo", &prepared)
}
