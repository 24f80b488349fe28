//! GNAT (`gnatmake`) diagnostics.
//!
//! GNAT omits the severity for plain errors and tags style checks either as
//! `style:` or, in older releases, `(style)`:
//!
//! ```text
//! hello.adb:3:04: missing ";"
//! hello.adb:5:07: warning: variable "X" is never read and never assigned
//! hello.adb:1:01: (style) bad casing of "Ada"
//! ```

use std::path::Path;
use std::sync::LazyLock;

use super::grammar::LineGrammar;
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult, WARNING};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^:\s][^:]*\.ad[abcs]):(?P<row>\d+):(?P<col>\d+): (?:\(?(?P<kind>error|warning|style|info)\)?:? )?(?P<text>.*)$",
        ERROR,
    )
    .with_kind_map(fold_style)
});

fn fold_style(kind: &str) -> String {
    if kind == "style" {
        WARNING.to_owned()
    } else {
        kind.to_owned()
    }
}

/// Parser for `gnatmake` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GnatParser;

impl DiagnosticParser for GnatParser {
    fn name(&self) -> &'static str {
        "ada"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let problems = GRAMMAR.scan(&output.combined(), working_directory);
        conclude(output, problems)
    }
}
