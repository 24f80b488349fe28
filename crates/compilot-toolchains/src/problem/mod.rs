//! Diagnostic data model shared by parsers, the bucketer, and the dispatcher.
//!
//! Parsers emit [`RawProblem`] values tagged with the file name the toolchain
//! reported. The bucketer strips the file name and files each diagnostic
//! under its caller-supplied index as a [`Problem`]. The [`Response`] envelope
//! is the serialised contract returned to callers:
//!
//! ```json
//! {"ok":false,"uid":null,"message":"...","problems":[[{"type":"error","row":5,"col":2,"text":"..."}]]}
//! ```

use serde::{Deserialize, Serialize};

/// Problem type emitted for diagnostics that block a successful build.
pub const ERROR: &str = "error";

/// Problem type emitted for non-fatal diagnostics.
pub const WARNING: &str = "warning";

/// A diagnostic as reported by a toolchain, before bucketing.
///
/// # Example
///
/// ```
/// use compilot_toolchains::RawProblem;
///
/// let problem = RawProblem::new("main.c", "error", 5, 2, "expected ';'");
/// assert_eq!(problem.file(), "main.c");
/// assert!(problem.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawProblem {
    file: String,
    kind: String,
    row: u32,
    col: u32,
    text: String,
}

impl RawProblem {
    /// Creates a raw problem.
    #[must_use]
    pub fn new(
        file: impl Into<String>,
        kind: impl Into<String>,
        row: u32,
        col: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            kind: kind.into(),
            row,
            col,
            text: text.into(),
        }
    }

    /// Returns the file name the toolchain reported.
    #[must_use]
    pub const fn file(&self) -> &str {
        self.file.as_str()
    }

    /// Returns the toolchain-defined problem type.
    #[must_use]
    pub const fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns the 1-based row.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the 1-based column.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Returns the diagnostic message.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns `true` when the problem has type [`ERROR`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ERROR
    }

    /// Moves the problem one row up, stopping at zero.
    pub const fn decrement_row(&mut self) {
        self.row = self.row.saturating_sub(1);
    }
}

/// A bucketed diagnostic; the file is implied by its position in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    kind: String,
    row: u32,
    col: u32,
    text: String,
}

impl Problem {
    /// Creates a problem.
    #[must_use]
    pub fn new(kind: impl Into<String>, row: u32, col: u32, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            row,
            col,
            text: text.into(),
        }
    }

    /// Returns the problem type.
    #[must_use]
    pub const fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns the 1-based row.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the 1-based column.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Returns the diagnostic message.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }
}

impl From<&RawProblem> for Problem {
    fn from(raw: &RawProblem) -> Self {
        Self {
            kind: raw.kind.clone(),
            row: raw.row,
            col: raw.col,
            text: raw.text.clone(),
        }
    }
}

/// Outcome of running one toolchain and parsing its output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    ok: bool,
    message: String,
    problems: Vec<RawProblem>,
}

impl ParseResult {
    /// Creates a parse result.
    #[must_use]
    pub fn new(ok: bool, message: impl Into<String>, problems: Vec<RawProblem>) -> Self {
        Self {
            ok,
            message: message.into(),
            problems,
        }
    }

    /// The canned result of the no-op command.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(true, "", Vec::new())
    }

    /// A failed result carrying only a message, used when the toolchain
    /// could not be run.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message, Vec::new())
    }

    /// Returns whether the toolchain reported success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns the raw output text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the parsed problems.
    #[must_use]
    pub const fn problems(&self) -> &[RawProblem] {
        self.problems.as_slice()
    }

    /// Returns the parsed problems for in-place adjustment.
    pub fn problems_mut(&mut self) -> &mut [RawProblem] {
        &mut self.problems
    }

    /// Consumes the result, returning `(ok, message, problems)`.
    #[must_use]
    pub fn into_parts(self) -> (bool, String, Vec<RawProblem>) {
        (self.ok, self.message, self.problems)
    }
}

/// The envelope returned to callers of the dispatcher.
///
/// `problems` is index-aligned with the file list passed to
/// [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch), or empty
/// when the toolchain reported no problems at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    ok: bool,
    uid: Option<String>,
    message: String,
    problems: Vec<Vec<Problem>>,
}

impl Response {
    /// Creates a response. The `uid` slot is left empty for an outer layer.
    #[must_use]
    pub fn new(ok: bool, message: impl Into<String>, problems: Vec<Vec<Problem>>) -> Self {
        Self {
            ok,
            uid: None,
            message: message.into(),
            problems,
        }
    }

    /// Returns whether the toolchain reported success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns the reserved identifier, which this layer never sets.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Returns the display message.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the per-file problem lists.
    #[must_use]
    pub const fn problems(&self) -> &[Vec<Problem>] {
        self.problems.as_slice()
    }
}
