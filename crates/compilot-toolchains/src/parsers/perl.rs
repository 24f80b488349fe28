//! Perl diagnostics: `syntax error at main.pl line 3, near "print"`.
//!
//! Perl does not label severity. Messages are errors when the interpreter
//! failed and warnings otherwise.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::grammar::{DEFAULT_COLUMN, compile};
use super::{DiagnosticParser, conclude, normalise_path};
use crate::problem::{ERROR, ParseResult, RawProblem, WARNING};
use crate::process::ProcessOutput;

static LOCATED: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?P<text>.+?) at (?P<file>\S+) line (?P<row>\d+)(?P<near>, near .*|, <\w+> line \d+)?[.,]?$")
});

/// Parser for `perl` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerlParser;

impl DiagnosticParser for PerlParser {
    fn name(&self) -> &'static str {
        "perl"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let kind = if output.succeeded() { WARNING } else { ERROR };
        let problems = output
            .combined()
            .lines()
            .filter_map(|line| match_line(line, kind, working_directory))
            .collect();
        conclude(output, problems)
    }
}

fn match_line(line: &str, kind: &str, working_directory: &Path) -> Option<RawProblem> {
    let captures = LOCATED.captures(line)?;
    let row = captures.name("row")?.as_str().parse().ok()?;
    let file = captures.name("file")?.as_str();
    let mut text = captures.name("text")?.as_str().to_owned();
    if let Some(near) = captures.name("near") {
        text.push_str(near.as_str());
    }
    Some(RawProblem::new(
        normalise_path(file, working_directory),
        kind,
        row,
        DEFAULT_COLUMN,
        text,
    ))
}
