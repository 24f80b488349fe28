//! GnuCOBOL (`cobc`) diagnostics: `prog.cob:5: error: syntax error, unexpected Identifier`.

use std::path::Path;
use std::sync::LazyLock;

use super::grammar::LineGrammar;
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^:\s][^:]*):(?P<row>\d+): (?P<kind>error|warning|note): (?P<text>.*)$",
        ERROR,
    )
});

/// Parser for `cobc` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CobolParser;

impl DiagnosticParser for CobolParser {
    fn name(&self) -> &'static str {
        "cobol"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let problems = GRAMMAR.scan(&output.combined(), working_directory);
        conclude(output, problems)
    }
}
