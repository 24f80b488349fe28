//! CLI entrypoint for Compilot.
//!
//! The binary delegates to [`compilot_cli::run`], which loads configuration,
//! runs the requested toolchain and prints the JSON response.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    compilot_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
