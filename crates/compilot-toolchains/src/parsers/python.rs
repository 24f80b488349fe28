//! Python tracebacks and warnings.
//!
//! An uncaught exception is attributed to the innermost traceback frame:
//!
//! ```text
//! Traceback (most recent call last):
//!   File "/work/main.py", line 7, in <module>
//!     main()
//!   File "/work/main.py", line 4, in main
//!     raise ValueError("bad input")
//! ValueError: bad input
//! ```
//!
//! Tracebacks dedent the echoed source, so the column is always 1.
//! Warnings use the `file:row: Category: text` form.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::grammar::{DEFAULT_COLUMN, LineGrammar, compile};
use super::{DiagnosticParser, conclude, normalise_path};
use crate::problem::{ERROR, ParseResult, RawProblem, WARNING};
use crate::process::ProcessOutput;

static FRAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"^\s+File "(?P<file>[^"]+)", line (?P<row>\d+)"#));

static EXCEPTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<name>[A-Za-z_][\w.]*(?:Error|Exception|Warning|Interrupt|Exit))(?::\s*(?P<text>.*))?$")
});

static WARNING_LINE: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^(?P<file>[^:\s][^:]*\.py):(?P<row>\d+): (?P<text>\w*Warning: .*)$",
        WARNING,
    )
});

/// Parser for `python` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonParser;

impl DiagnosticParser for PythonParser {
    fn name(&self) -> &'static str {
        "python"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let mut problems = Vec::new();
        let mut frame: Option<(String, u32)> = None;
        for line in output.combined().lines() {
            if let Some(warning) = WARNING_LINE.match_line(line, working_directory) {
                problems.push(warning);
                continue;
            }
            if let Some(captures) = FRAME.captures(line) {
                let file = captures.name("file").map(|file| file.as_str());
                let row = captures.name("row").and_then(|row| row.as_str().parse().ok());
                if let (Some(file), Some(row)) = (file, row) {
                    frame = Some((normalise_path(file, working_directory), row));
                }
                continue;
            }
            let Some(exception) = EXCEPTION.captures(line) else {
                continue;
            };
            let Some((file, row)) = frame.take() else {
                continue;
            };
            let name = exception.name("name").map_or("", |name| name.as_str());
            let text = match exception.name("text").map(|text| text.as_str().trim()) {
                Some(detail) if !detail.is_empty() => format!("{name}: {detail}"),
                _ => name.to_owned(),
            };
            problems.push(RawProblem::new(file, ERROR, row, DEFAULT_COLUMN, text));
        }
        conclude(output, problems)
    }
}
