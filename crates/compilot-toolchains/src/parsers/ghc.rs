//! GHC diagnostics.
//!
//! GHC prints a location header followed by an indented, bulleted body:
//!
//! ```text
//! Main.hs:3:8: error: [GHC-88464]
//!     • Variable not in scope: foo :: IO ()
//!     • Perhaps you meant 'floor' (imported from Prelude)
//!   |
//! 3 | main = foo
//!   |        ^^^
//! ```
//!
//! Multi-line spans use `Main.hs:(3,1)-(4,9):`. Older releases omit the
//! severity, in which case the diagnostic is an error.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::grammar::compile;
use super::{DiagnosticParser, conclude, normalise_path};
use crate::problem::{ERROR, ParseResult, RawProblem};
use crate::process::ProcessOutput;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?P<file>[^:\s][^:]*\.l?hs):(?:(?P<row>\d+):(?P<col>\d+)(?:-\d+)?|\((?P<span_row>\d+),(?P<span_col>\d+)\)-\(\d+,\d+\)):(?: (?P<kind>error|warning):?)?(?P<inline>.*)$",
    )
});

static TAGS_ONLY: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:\s*\[[^\]]*\])*\s*$"));

static GUTTER: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*\d*\s*\|"));

/// Parser for `ghc` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GhcParser;

impl DiagnosticParser for GhcParser {
    fn name(&self) -> &'static str {
        "haskell"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let combined = output.combined();
        let lines: Vec<&str> = combined.lines().collect();
        let mut problems = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let Some(header) = HEADER.captures(line) else {
                continue;
            };
            let row = header
                .name("row")
                .or_else(|| header.name("span_row"))
                .and_then(|row| row.as_str().parse().ok());
            let col = header
                .name("col")
                .or_else(|| header.name("span_col"))
                .and_then(|col| col.as_str().parse().ok());
            let (Some(row), Some(col)) = (row, col) else {
                continue;
            };
            let file = header.name("file").map_or("", |file| file.as_str());
            let kind = header.name("kind").map_or(ERROR, |kind| kind.as_str());
            let inline = header.name("inline").map_or("", |inline| inline.as_str());
            let text = if TAGS_ONLY.is_match(inline) {
                body_text(lines.get(index + 1..).unwrap_or_default())
            } else {
                inline.trim().to_owned()
            };
            problems.push(RawProblem::new(
                normalise_path(file, working_directory),
                kind,
                row,
                col,
                text,
            ));
        }
        conclude(output, problems)
    }
}

/// Joins the indented body lines that follow a header.
fn body_text(lines: &[&str]) -> String {
    lines
        .iter()
        .take_while(|line| {
            !line.trim().is_empty()
                && line.starts_with(char::is_whitespace)
                && !GUTTER.is_match(line)
        })
        .map(|line| line.trim().trim_start_matches('•').trim())
        .collect::<Vec<_>>()
        .join(" ")
}
