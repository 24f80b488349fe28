//! Dispatch of one toolchain invocation.
//!
//! The [`Dispatcher`] ties the pipeline together: route the command, run it,
//! parse the output, apply the route's adjustment, and bucket the problems
//! by file. Every failure becomes data in the returned [`Response`].

use std::path::Path;

use tracing::{debug, info, warn};

use crate::bucket::bucket_problems;
use crate::problem::{ParseResult, Response};
use crate::process::{ProcessRunner, ShellRunner};
use crate::router::{Route, Selection, ToolchainRegistry};

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes commands to toolchains and assembles the response envelope.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use compilot_toolchains::{Dispatcher, ShellRunner, ToolchainRegistry};
///
/// let dispatcher = Dispatcher::new(ToolchainRegistry::with_default_toolchains(), ShellRunner::new());
/// let response = dispatcher.dispatch("none", Path::new("."), &["main.c".to_owned()]);
/// assert!(response.is_ok());
/// assert!(response.problems().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    registry: ToolchainRegistry,
    runner: R,
    command_prefix: String,
}

impl Dispatcher<ShellRunner> {
    /// Creates a dispatcher over the built-in toolchains that runs commands
    /// through the shell.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ToolchainRegistry::with_default_toolchains(), ShellRunner::new())
    }
}

impl<R> Dispatcher<R> {
    /// Creates a dispatcher with an empty fallback prefix.
    #[must_use]
    pub const fn new(registry: ToolchainRegistry, runner: R) -> Self {
        Self {
            registry,
            runner,
            command_prefix: String::new(),
        }
    }

    /// Sets the prefix prepended verbatim to commands that no route matches.
    #[must_use]
    pub fn with_command_prefix(mut self, command_prefix: impl Into<String>) -> Self {
        self.command_prefix = command_prefix.into();
        self
    }

    /// Returns the route registry.
    #[must_use]
    pub const fn registry(&self) -> &ToolchainRegistry {
        &self.registry
    }

    /// Returns the process runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Returns the fallback command prefix.
    #[must_use]
    pub const fn command_prefix(&self) -> &str {
        self.command_prefix.as_str()
    }
}

impl<R: ProcessRunner> Dispatcher<R> {
    /// Runs `command` in `working_directory` and reports its diagnostics
    /// bucketed against `files`.
    ///
    /// The returned problems are index-aligned with `files`, or empty when
    /// the toolchain reported no problems at all.
    pub fn dispatch(&self, command: &str, working_directory: &Path, files: &[String]) -> Response {
        let result = match self.registry.select(command) {
            Selection::Noop => ParseResult::noop(),
            Selection::Toolchain(route) => self.run_route(route, command, working_directory),
            Selection::Fallback => self.run_fallback(command, working_directory),
        };
        let (ok, message, problems) = result.into_parts();
        let buckets = bucket_problems(files, &problems);
        info!(
            target: DISPATCH_TARGET,
            ok,
            problems = problems.len(),
            files = files.len(),
            "dispatch complete"
        );
        Response::new(ok, message, buckets)
    }

    fn run_route(&self, route: &Route, command: &str, working_directory: &Path) -> ParseResult {
        let output = match self.runner.run(command, working_directory) {
            Ok(output) => output,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, route = route.name(), %error, "toolchain did not run");
                return ParseResult::failure(error.to_string());
            }
        };
        let mut result = route.parser().parse(&output, working_directory);
        route.adjustment().apply(&mut result);
        debug!(
            target: DISPATCH_TARGET,
            route = route.name(),
            status = ?output.status(),
            problems = result.problems().len(),
            "parsed toolchain output"
        );
        result
    }

    fn run_fallback(&self, command: &str, working_directory: &Path) -> ParseResult {
        let full_command = format!("{}{command}", self.command_prefix);
        match self.runner.run(&full_command, working_directory) {
            Ok(output) => {
                debug!(
                    target: DISPATCH_TARGET,
                    command = full_command.as_str(),
                    stderr_bytes = output.stderr().len(),
                    "fallback command finished"
                );
                ParseResult::new(output.stderr().is_empty(), output.combined(), Vec::new())
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "fallback command did not run");
                ParseResult::failure(error.to_string())
            }
        }
    }
}
