//! Go toolchain diagnostics.
//!
//! ```text
//! # example.com/hello
//! ./main.go:5:2: undefined: x
//! ```

use std::path::Path;
use std::sync::LazyLock;

use super::grammar::LineGrammar;
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^\s#:][^:]*\.go):(?P<row>\d+)(?::(?P<col>\d+))?: (?P<text>.+)$",
        ERROR,
    )
});

/// Parser for `go build`, `go run`, and `go vet` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParser;

impl DiagnosticParser for GoParser {
    fn name(&self) -> &'static str {
        "go"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let problems = GRAMMAR.scan(&output.combined(), working_directory);
        conclude(output, problems)
    }
}
