//! GCC-style diagnostics: gcc, clang, g++, zig, and v.
//!
//! `main.c:5:2: error: expected ';' before '}' token`

use std::path::Path;
use std::sync::LazyLock;

use super::grammar::LineGrammar;
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^:\s][^:]*):(?P<row>\d+):(?P<col>\d+): (?P<kind>fatal error|error|warning|note): (?P<text>.*)$",
        ERROR,
    )
    .with_kind_map(fold_fatal)
});

fn fold_fatal(kind: &str) -> String {
    if kind == "fatal error" {
        ERROR.to_owned()
    } else {
        kind.to_owned()
    }
}

/// Parser for compilers that follow the GCC diagnostic format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CFamilyParser;

impl DiagnosticParser for CFamilyParser {
    fn name(&self) -> &'static str {
        "c"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let problems = GRAMMAR.scan(&output.combined(), working_directory);
        conclude(output, problems)
    }
}
