//! `rustc` diagnostics in the default human-readable format.
//!
//! ```text
//! error[E0425]: cannot find value `x` in this scope
//!  --> main.rs:2:13
//! ```
//!
//! The header carries the severity and message; the first `-->` line after
//! it carries the location. Headers without a location, such as the closing
//! `error: aborting due to 1 previous error`, produce no problem.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::grammar::compile;
use super::{DiagnosticParser, conclude, normalise_path};
use crate::problem::{ParseResult, RawProblem};
use crate::process::ProcessOutput;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<kind>error|warning|note|help)(?:\[(?P<code>[A-Z]\d+)\])?: (?P<text>.+)$")
});

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\s*--> (?P<file>[^:]+):(?P<row>\d+):(?P<col>\d+)"));

/// Parser for `rustc` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustcParser;

struct PendingHeader {
    kind: String,
    text: String,
}

impl DiagnosticParser for RustcParser {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let mut problems = Vec::new();
        let mut pending: Option<PendingHeader> = None;
        for line in output.combined().lines() {
            if let Some(header) = HEADER.captures(line) {
                let kind = header.name("kind").map_or("", |kind| kind.as_str());
                let text = header.name("text").map_or("", |text| text.as_str()).trim();
                let text = match header.name("code") {
                    Some(code) => format!("{}: {text}", code.as_str()),
                    None => text.to_owned(),
                };
                pending = Some(PendingHeader {
                    kind: kind.to_owned(),
                    text,
                });
                continue;
            }
            let Some(location) = LOCATION.captures(line) else {
                continue;
            };
            let Some(header) = pending.take() else {
                continue;
            };
            let row = location.name("row").and_then(|row| row.as_str().parse().ok());
            let col = location.name("col").and_then(|col| col.as_str().parse().ok());
            let file = location.name("file").map(|file| file.as_str());
            if let (Some(file), Some(row), Some(col)) = (file, row, col) {
                problems.push(RawProblem::new(
                    normalise_path(file, working_directory),
                    header.kind,
                    row,
                    col,
                    header.text,
                ));
            }
        }
        conclude(output, problems)
    }
}
