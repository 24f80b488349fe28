//! Nim compiler diagnostics: `main.nim(3, 5) Error: undeclared identifier: 'x'`.

use std::path::Path;
use std::sync::LazyLock;

use super::grammar::{LineGrammar, lowercase};
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^(\s][^(]*)\((?P<row>\d+), (?P<col>\d+)\) (?P<kind>Error|Warning|Hint): (?P<text>.*)$",
        ERROR,
    )
    .with_kind_map(lowercase)
});

/// Parser for `nim` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimParser;

impl DiagnosticParser for NimParser {
    fn name(&self) -> &'static str {
        "nim"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let problems = GRAMMAR.scan(&output.combined(), working_directory);
        conclude(output, problems)
    }
}
