//! C# diagnostics from `dotnet build` (MSBuild) and the Mono `mcs` compiler.
//!
//! ```text
//! Program.cs(5,13): error CS1002: ; expected [/work/app.csproj]
//! ```
//!
//! MSBuild repeats every diagnostic in its closing summary, so identical
//! diagnostics are reported once.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use super::grammar::LineGrammar;
use super::{DiagnosticParser, conclude};
use crate::problem::{ERROR, ParseResult};
use crate::process::ProcessOutput;

static GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(|| {
    LineGrammar::new(
        r"^\s*(?P<file>[^(\s][^(]*)\((?P<row>\d+),(?P<col>\d+)\): (?P<kind>error|warning) (?P<code>[A-Z]+\d+): (?P<text>.*?)(?: \[[^\]]*\])?$",
        ERROR,
    )
});

/// Parser for `dotnet` and `mcs` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotnetParser;

impl DiagnosticParser for DotnetParser {
    fn name(&self) -> &'static str {
        "dotnet"
    }

    fn parse(&self, output: &ProcessOutput, working_directory: &Path) -> ParseResult {
        let mut seen = HashSet::new();
        let problems = GRAMMAR
            .scan(&output.combined(), working_directory)
            .into_iter()
            .filter(|problem| seen.insert(problem.clone()))
            .collect();
        conclude(output, problems)
    }
}
