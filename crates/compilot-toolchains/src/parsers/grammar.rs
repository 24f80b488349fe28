//! Single-line diagnostic grammars.
//!
//! Most toolchains print one diagnostic per line with positional fields. A
//! [`LineGrammar`] wraps a regular expression with the named groups `file`,
//! `row`, and optionally `col`, `kind`, `code`, and `text`.

use std::path::Path;

use regex::Regex;

use super::normalise_path;
use crate::problem::RawProblem;

/// Column reported when a toolchain gives none.
pub(crate) const DEFAULT_COLUMN: u32 = 1;

/// Compiles a built-in diagnostic pattern.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression. Every caller passes
/// a literal covered by unit tests.
#[expect(
    clippy::expect_used,
    reason = "diagnostic patterns are string literals exercised by unit tests"
)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in diagnostic pattern must compile")
}

/// Returns the kind unchanged.
pub(crate) fn verbatim(kind: &str) -> String {
    kind.to_owned()
}

/// Returns the kind in lower case.
pub(crate) fn lowercase(kind: &str) -> String {
    kind.to_ascii_lowercase()
}

/// A one-line-per-diagnostic grammar.
#[derive(Debug)]
pub(crate) struct LineGrammar {
    pattern: Regex,
    default_kind: &'static str,
    map_kind: fn(&str) -> String,
}

impl LineGrammar {
    /// Creates a grammar whose unmatched or absent `kind` group falls back to
    /// `default_kind`.
    pub(crate) fn new(pattern: &str, default_kind: &'static str) -> Self {
        Self {
            pattern: compile(pattern),
            default_kind,
            map_kind: verbatim,
        }
    }

    /// Post-processes captured kinds, for example to fold `fatal error` into
    /// `error`.
    pub(crate) const fn with_kind_map(mut self, map_kind: fn(&str) -> String) -> Self {
        self.map_kind = map_kind;
        self
    }

    /// Matches one line.
    pub(crate) fn match_line(&self, line: &str, working_directory: &Path) -> Option<RawProblem> {
        let captures = self.pattern.captures(line)?;
        let file = captures.name("file")?.as_str();
        let row = captures.name("row")?.as_str().parse().ok()?;
        let col = captures
            .name("col")
            .and_then(|col| col.as_str().parse().ok())
            .unwrap_or(DEFAULT_COLUMN);
        let kind = captures
            .name("kind")
            .map_or_else(|| self.default_kind.to_owned(), |kind| (self.map_kind)(kind.as_str()));
        let text = captures.name("text").map_or("", |text| text.as_str()).trim();
        let text = match captures.name("code") {
            Some(code) => format!("{}: {text}", code.as_str()),
            None => text.to_owned(),
        };
        Some(RawProblem::new(
            normalise_path(file, working_directory),
            kind,
            row,
            col,
            text,
        ))
    }

    /// Matches every line of `output`, preserving order.
    pub(crate) fn scan(&self, output: &str, working_directory: &Path) -> Vec<RawProblem> {
        output
            .lines()
            .filter_map(|line| self.match_line(line, working_directory))
            .collect()
    }
}
