//! Compiler diagnostic normalisation for Compilot.
//!
//! The `compilot-toolchains` crate runs a compiler, interpreter, or build tool
//! and turns its loosely structured output into diagnostics grouped by the
//! source files the caller asked about.
//!
//! # Architecture
//!
//! A [`Dispatcher`] owns a [`ToolchainRegistry`] and a [`ProcessRunner`]. For
//! each command it:
//!
//! 1. routes the command by its leading token to a [`Route`], the no-op
//!    sentinel `none`, or the generic fallback;
//! 2. runs it through the runner in the caller's working directory;
//! 3. parses the captured output with the route's [`DiagnosticParser`] into
//!    [`RawProblem`]s and applies the route's [`Adjustment`];
//! 4. buckets the problems by file with [`bucket_problems`] and returns a
//!    [`Response`].
//!
//! Compile errors are data, never Rust errors. A toolchain that cannot be
//! started yields a failed [`Response`] carrying the reason in its message.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use compilot_toolchains::Dispatcher;
//!
//! let dispatcher = Dispatcher::with_defaults().with_command_prefix("nice ");
//! let files = vec!["main.c".to_owned(), "util.c".to_owned()];
//! let response = dispatcher.dispatch("gcc -c main.c util.c", Path::new("/srv/project"), &files);
//! for (file, problems) in files.iter().zip(response.problems()) {
//!     for problem in problems {
//!         println!("{file}:{}:{}: {}", problem.row(), problem.col(), problem.text());
//!     }
//! }
//! ```

pub mod bucket;
pub mod dispatch;
pub mod error;
pub mod parsers;
pub mod problem;
pub mod process;
pub mod router;

#[cfg(test)]
mod tests;

pub use self::bucket::bucket_problems;
pub use self::dispatch::Dispatcher;
pub use self::error::{RegistryError, RunError};
pub use self::parsers::DiagnosticParser;
pub use self::problem::{ParseResult, Problem, RawProblem, Response};
pub use self::process::{ProcessOutput, ProcessRunner, ShellRunner};
pub use self::router::{Adjustment, NOOP_COMMAND, Route, Selection, ToolchainRegistry};
