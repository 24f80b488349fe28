//! NASM assembler diagnostics: `prog.asm:5: error: parser: instruction expected`.

use std::path::Path;
use std::sync::LazyLock;

use super::grammar::LineGrammar;
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^:\s][^:]*):(?P<row>\d+): (?P<kind>error|warning|fatal|panic): (?P<text>.*)$",
        ERROR,
    )
    .with_kind_map(fold_fatal)
});

fn fold_fatal(kind: &str) -> String {
    match kind {
        "fatal" | "panic" => ERROR.to_owned(),
        other => other.to_owned(),
    }
}

/// Parser for `nasm` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NasmParser;

impl DiagnosticParser for NasmParser {
    fn name(&self) -> &'static str {
        "nasm"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let problems = GRAMMAR.scan(&output.combined(), working_directory);
        conclude(output, problems)
    }
}
