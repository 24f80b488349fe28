//! Domain errors raised while executing toolchains and building routes.
//!
//! All errors use `thiserror`-derived enums with structured context so callers
//! can inspect the failure programmatically. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint and keep the errors `Clone`.

use std::sync::Arc;

use thiserror::Error;

/// Errors reported by a [`ProcessRunner`](crate::process::ProcessRunner).
///
/// These describe a toolchain that could not run to completion. They are
/// distinct from compile diagnostics, which are ordinary data carried in a
/// [`ParseResult`](crate::problem::ParseResult).
#[derive(Debug, Clone, Error)]
pub enum RunError {
    /// The process could not be started at all.
    #[error("failed to start '{command}': {source}")]
    SpawnFailed {
        /// Command line that was attempted.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The process did not exit within the configured timeout and was killed.
    #[error("'{command}' timed out after {timeout_secs}s")]
    Timeout {
        /// Command line that was running.
        command: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// An I/O error occurred while waiting for or reading from the process.
    #[error("I/O error while running '{command}': {source}")]
    Io {
        /// Command line that was running.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl RunError {
    /// Returns the command line associated with the failure.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::SpawnFailed { command, .. }
            | Self::Timeout { command, .. }
            | Self::Io { command, .. } => command.as_str(),
        }
    }
}

/// Errors raised while registering toolchain routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Another route already claims the prefix.
    #[error("prefix '{prefix}' is already routed to '{existing}'")]
    DuplicatePrefix {
        /// The contested prefix.
        prefix: String,
        /// Name of the route that already owns it.
        existing: String,
    },

    /// The prefix is not a single leading token followed by one space.
    #[error("prefix '{prefix}' must be a single token followed by a space")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// The route declares no prefixes, so it could never be selected.
    #[error("route '{name}' declares no prefixes")]
    NoPrefixes {
        /// Route name.
        name: String,
    },
}
