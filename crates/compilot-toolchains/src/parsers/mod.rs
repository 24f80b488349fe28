//! Toolchain-specific diagnostic parsers.
//!
//! Every parser is a pure transform from captured [`ProcessOutput`] to a
//! [`ParseResult`]. Parsers emit one [`RawProblem`] per diagnostic they
//! recognise, whatever file it names; deciding which files the caller cares
//! about is the bucketer's job. Unrecognised lines are never discarded: the
//! result message is always the full combined output.
//!
//! Paths are normalised against the working directory so that
//! `./main.go` and `/work/main.go` both become `main.go`.

use std::path::Path;

use crate::problem::{ParseResult, RawProblem};
use crate::process::ProcessOutput;

mod c;
mod cobol;
mod dotnet;
mod elixir;
mod ghc;
mod gnat;
mod go;
mod grammar;
mod javac;
mod nasm;
mod nim;
mod perl;
mod python;
mod rustc;

pub use self::c::CFamilyParser;
pub use self::cobol::CobolParser;
pub use self::dotnet::DotnetParser;
pub use self::elixir::ElixirParser;
pub use self::ghc::GhcParser;
pub use self::gnat::GnatParser;
pub use self::go::GoParser;
pub use self::javac::JavacParser;
pub use self::nasm::NasmParser;
pub use self::nim::NimParser;
pub use self::perl::PerlParser;
pub use self::python::PythonParser;
pub use self::rustc::RustcParser;

/// Converts one toolchain's output into structured diagnostics.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use compilot_toolchains::{DiagnosticParser, ProcessOutput};
/// use compilot_toolchains::parsers::CFamilyParser;
///
/// let output = ProcessOutput::new("", "a.c:5:2: error: expected ';'\n", Some(1));
/// let result = CFamilyParser.parse(&output, Path::new("/work"));
/// assert!(!result.is_ok());
/// assert_eq!(result.problems().len(), 1);
/// ```
pub trait DiagnosticParser: Send + Sync {
    /// Short, stable name used in logs.
    fn name(&self) -> &'static str;

    /// Parses captured output. `working_directory` is the directory the
    /// toolchain ran in.
    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult;
}

/// Builds the result shared by most parsers: success requires a zero exit
/// status and no error-typed problems.
pub(crate) fn conclude(output: &ProcessOutput, problems: Vec<RawProblem>) -> ParseResult {
    let ok = output.succeeded() && !problems.iter().any(RawProblem::is_error);
    ParseResult::new(ok, output.combined(), problems)
}

/// Normalises a reported path against the working directory.
///
/// A leading `./` is removed and absolute paths under the working directory
/// become relative. Anything else is returned verbatim.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use compilot_toolchains::parsers::normalise_path;
///
/// let cwd = Path::new("/work");
/// assert_eq!(normalise_path("./main.go", cwd), "main.go");
/// assert_eq!(normalise_path("/work/src/Main.java", cwd), "src/Main.java");
/// assert_eq!(normalise_path("/usr/include/stdio.h", cwd), "/usr/include/stdio.h");
/// ```
#[must_use]
pub fn normalise_path(reported: &str, working_directory: &Path) -> String {
    let trimmed = reported.trim();
    let path = Path::new(trimmed);
    if path.is_absolute() {
        return path.strip_prefix(working_directory).map_or_else(
            |_| trimmed.to_owned(),
            |relative| relative.to_string_lossy().into_owned(),
        );
    }
    let mut relative = trimmed;
    while let Some(rest) = relative.strip_prefix("./") {
        relative = rest;
    }
    relative.to_owned()
}

#[cfg(test)]
mod tests;
