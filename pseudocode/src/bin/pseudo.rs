//! Pseudocode command-line interface
//!
//! Usage:
//!   pseudo file.pseudo                # Run a program
//!   pseudo file.pseudo --no-newlines  # Suppress newlines after OUTPUT

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;

use pseudocode::{prepare_source, run, RunOptions, StdConsole};

const EXTENSION: &str = ".pseudo";

fn usage() {
    eprintln!("usage: pseudo <file{}> [--no-newlines]", EXTENSION);
}

fn main() -> ExitCode {
    let mut file = None;
    let mut options = RunOptions::default();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--no-newlines" => options.no_newlines = true,
            "--help" | "-h" => {
                usage();
                return ExitCode::SUCCESS;
            }
            flag if flag.starts_with('-') => {
                eprintln!("unknown option: {}", flag);
                usage();
                return ExitCode::FAILURE;
            }
            path => {
                if file.replace(path.to_string()).is_some() {
                    eprintln!("only one source file may be given");
                    usage();
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let Some(path) = file else {
        usage();
        return ExitCode::FAILURE;
    };

    if !path.ends_with(EXTENSION) {
        eprintln!("File must have \"{}\" extension", EXTENSION);
        return ExitCode::FAILURE;
    }

    let raw = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            eprintln!("Could not locate file: \"{}\"", path);
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("Error reading \"{}\": {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    // Diagnostics use the file's base name and the stripped source text
    let display_name = Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());
    let source = prepare_source(&raw);

    match run(&source, &options, &mut StdConsole::new()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.render(&display_name, &source));
            ExitCode::FAILURE
        }
    }
}
