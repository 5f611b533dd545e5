//! The I/O port
//!
//! OUTPUT and INPUT go through the [`Console`] trait so the driver can hand
//! the evaluator real standard streams while tests inject scripted input and
//! capture output deterministically.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Console abstraction for the evaluator's I/O statements
pub trait Console {
    /// Write a chunk of output text (no separator handling; the evaluator
    /// formats complete OUTPUT lines)
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Read one line of input, without its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Console backed by the process standard streams.
///
/// Writes are flushed eagerly so OUTPUT and INPUT interleave correctly when
/// a program prompts before reading.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Console with scripted input lines and captured output, for tests
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    /// A console with no input lines
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that will serve the given lines to INPUT, in order
    pub fn with_input(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| l.to_string()).collect(),
            output: String::new(),
        }
    }

    /// Everything the program has written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the console and return the captured output
    pub fn into_output(self) -> String {
        self.output
    }
}

impl Console for ScriptedConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}
