//! Elixir compiler diagnostics for `elixirc`, `mix`, `iex`, and `elixir`.
//!
//! Recent releases print the message first and the location on a trailing
//! `└─` line. Older ones print the location on the next indented line.
//! Uncaught exceptions print `** (Kind) file:row: text`, or just
//! `** (Kind) text` followed later by a location.
//!
//! ```text
//! warning: variable "y" is unused
//!   │
//! 2 │     y = 1
//!   │     ~
//!   │
//!   └─ lib/a.ex:2:5: A.f/0
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::grammar::{DEFAULT_COLUMN, compile};
use super::{DiagnosticParser, conclude, normalise_path};
use crate::problem::{ERROR, ParseResult, RawProblem};
use crate::process::ProcessOutput;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\s*(?P<kind>error|warning): (?P<text>.*)$"));

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^\s+(?:└─\s+)?(?P<file>[^\s:│][^:\s]*\.exs?):(?P<row>\d+)(?::(?P<col>\d+))?(?::.*)?$")
});

static CRASH: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^\*\* \((?P<name>[\w.]+)\) (?:(?P<file>[^:\s]+\.exs?):(?P<row>\d+)(?::(?P<col>\d+))?: )?(?P<text>.*)$")
});

/// Parser for Elixir toolchain output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElixirParser;

struct Pending {
    kind: String,
    text: String,
}

impl DiagnosticParser for ElixirParser {
    fn name(&self) -> &'static str {
        "elixir"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let mut problems = Vec::new();
        let mut pending: Option<Pending> = None;
        for line in output.combined().lines() {
            if let Some(crash) = CRASH.captures(line) {
                let name = crash.name("name").map_or("", |name| name.as_str());
                let detail = crash.name("text").map_or("", |text| text.as_str()).trim();
                let text = format!("{name}: {detail}");
                match located(&crash, working_directory) {
                    Some((file, row, col)) => {
                        problems.push(RawProblem::new(file, ERROR, row, col, text));
                        pending = None;
                    }
                    None => {
                        pending = Some(Pending {
                            kind: ERROR.to_owned(),
                            text,
                        });
                    }
                }
                continue;
            }
            if let Some(header) = HEADER.captures(line) {
                pending = Some(Pending {
                    kind: header.name("kind").map_or(ERROR, |kind| kind.as_str()).to_owned(),
                    text: header
                        .name("text")
                        .map_or("", |text| text.as_str())
                        .trim()
                        .to_owned(),
                });
                continue;
            }
            let Some(location) = LOCATION.captures(line) else {
                continue;
            };
            let Some((file, row, col)) = located(&location, working_directory) else {
                continue;
            };
            if let Some(diagnostic) = pending.take() {
                problems.push(RawProblem::new(file, diagnostic.kind, row, col, diagnostic.text));
            }
        }
        conclude(output, problems)
    }
}

fn located(captures: &Captures<'_>, working_directory: &Path) -> Option<(String, u32, u32)> {
    let file = captures.name("file")?.as_str();
    let row = captures.name("row")?.as_str().parse().ok()?;
    let col = captures
        .name("col")
        .and_then(|col| col.as_str().parse().ok())
        .unwrap_or(DEFAULT_COLUMN);
    Some((normalise_path(file, working_directory), row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_diagnostics_take_location_from_trailer() {
        let stderr = "\
Compiling 1 file (.ex)
    warning: variable \"y\" is unused (if the variable is not meant to be used, prefix it with an underscore)
    │
  2 │     y = 1
    │     ~
    │
    └─ lib/a.ex:2:5: A.f/0

    error: undefined variable \"x\"
    │
  3 │     x + 1
    │     ^
    │
    └─ lib/a.ex:3:5: A.f/0

== Compilation error in file lib/a.ex ==
** (CompileError) lib/a.ex: cannot compile module A (errors have been logged)
";
        let output = ProcessOutput::new("", stderr, Some(1));
        let result = ElixirParser.parse(&output, Path::new("/work"));
        assert!(!result.is_ok());
        assert_eq!(
            result.problems(),
            &[
                RawProblem::new(
                    "lib/a.ex",
                    "warning",
                    2,
                    5,
                    "variable \"y\" is unused (if the variable is not meant to be used, prefix it with an underscore)"
                ),
                RawProblem::new("lib/a.ex", "error", 3, 5, "undefined variable \"x\""),
            ]
        );
    }

    #[test]
    fn legacy_location_follows_header() {
        let stderr = "\
warning: variable \"y\" is unused
  lib/a.ex:2: A.f/0

";
        let output = ProcessOutput::new("", stderr, Some(0));
        let result = ElixirParser.parse(&output, Path::new("/work"));
        assert!(result.is_ok());
        assert_eq!(
            result.problems(),
            &[RawProblem::new("lib/a.ex", "warning", 2, 1, "variable \"y\" is unused")]
        );
    }

    #[test]
    fn located_crash_is_an_error() {
        let output = ProcessOutput::new(
            "",
            "** (CompileError) lib/a.ex:4: undefined function foo/0\n",
            Some(1),
        );
        let result = ElixirParser.parse(&output, Path::new("/work"));
        assert_eq!(
            result.problems(),
            &[RawProblem::new(
                "lib/a.ex",
                "error",
                4,
                1,
                "CompileError: undefined function foo/0"
            )]
        );
    }

    #[test]
    fn unlocated_crash_uses_first_stack_frame() {
        let stderr = "\
** (RuntimeError) boom
    script.exs:3: (file)
    (elixir 1.15.7) lib/code.ex:1435: Code.require_file/2
";
        let output = ProcessOutput::new("", stderr, Some(1));
        let result = ElixirParser.parse(&output, Path::new("/work"));
        assert_eq!(
            result.problems(),
            &[RawProblem::new("script.exs", "error", 3, 1, "RuntimeError: boom")]
        );
    }
}
