//! `javac` diagnostics.
//!
//! javac prints a header, echoes the offending source line, and marks the
//! column with a caret. Some diagnostics add indented `symbol:` and
//! `location:` details:
//!
//! ```text
//! Main.java:3: error: cannot find symbol
//!         foo();
//!         ^
//!   symbol:   method foo()
//!   location: class Main
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::grammar::{DEFAULT_COLUMN, compile};
use super::{DiagnosticParser, conclude, normalise_path};
use crate::problem::{ParseResult, RawProblem};
use crate::process::ProcessOutput;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<file>[^:\s][^:]*\.java):(?P<row>\d+): (?P<kind>error|warning): (?P<text>.*)$")
});

static DETAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\s+(?P<detail>(?:symbol|location|required|found|reason)\s*:.*)$"));

/// Parser for `javac` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavacParser;

impl DiagnosticParser for JavacParser {
    fn name(&self) -> &'static str {
        "javac"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let combined = output.combined();
        let lines: Vec<&str> = combined.lines().collect();
        let mut problems = Vec::new();
        let mut index = 0;
        while index < lines.len() {
            let Some(header) = lines.get(index).and_then(|line| HEADER.captures(line)) else {
                index += 1;
                continue;
            };
            index += 1;
            let Some(row) = header.name("row").and_then(|row| row.as_str().parse().ok()) else {
                continue;
            };
            let file = header.name("file").map_or("", |file| file.as_str());
            let kind = header.name("kind").map_or("", |kind| kind.as_str());
            let mut text = header
                .name("text")
                .map_or("", |text| text.as_str())
                .trim()
                .to_owned();

            let mut col = DEFAULT_COLUMN;
            // The echoed source line is followed by the caret line.
            if let Some(caret) = lines.get(index + 1).and_then(|line| caret_column(line)) {
                col = caret;
                index += 2;
            }
            while let Some(detail) = lines.get(index).and_then(|line| DETAIL.captures(line)) {
                if let Some(detail) = detail.name("detail") {
                    text.push_str("; ");
                    text.push_str(detail.as_str().trim());
                }
                index += 1;
            }

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

/// Returns the 1-based column of a caret-only line.
fn caret_column(line: &str) -> Option<u32> {
    let trimmed = line.trim_end();
    if trimmed.trim_start() != "^" {
        return None;
    }
    let offset = trimmed.chars().take_while(|c| *c != '^').count();
    u32::try_from(offset).ok().map(|offset| offset + 1)
}
