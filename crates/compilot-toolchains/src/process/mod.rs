//! Toolchain process execution.
//!
//! The [`ProcessRunner`] trait is the seam between the dispatcher and the
//! operating system. [`ShellRunner`] is the production implementation: it runs
//! the command line through `sh -c` in the requested directory, drains stdout
//! and stderr on helper threads, and optionally enforces a wall-clock timeout.
//! Test code implements the trait directly to inject canned output.

use std::io::Read;
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

#[cfg(unix)]
use nix::sys::signal::{Signal, killpg};
#[cfg(unix)]
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::error::RunError;

/// Tracing target for process operations.
const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Shell used to interpret command lines.
const SHELL: &str = "sh";

/// Exit status the shell reports when the command does not exist.
const COMMAND_NOT_FOUND_STATUS: i32 = 127;

/// Interval between exit polls while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured output of a finished toolchain process.
///
/// # Example
///
/// ```
/// use compilot_toolchains::ProcessOutput;
///
/// let output = ProcessOutput::new("built\n", "warning: x\n", Some(0));
/// assert!(output.succeeded());
/// assert_eq!(output.combined(), "built\nwarning: x\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    stdout: String,
    stderr: String,
    status: Option<i32>,
}

impl ProcessOutput {
    /// Creates captured output. `status` is `None` when the process was
    /// terminated by a signal.
    #[must_use]
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, status: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            status,
        }
    }

    /// Returns the captured standard output.
    #[must_use]
    pub const fn stdout(&self) -> &str {
        self.stdout.as_str()
    }

    /// Returns the captured standard error.
    #[must_use]
    pub const fn stderr(&self) -> &str {
        self.stderr.as_str()
    }

    /// Returns the exit status, if the process exited normally.
    #[must_use]
    pub const fn status(&self) -> Option<i32> {
        self.status
    }

    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, Some(0))
    }

    /// Returns stdout followed by stderr.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text
    }
}

/// Trait abstracting toolchain execution for testability.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use compilot_toolchains::{ProcessOutput, ProcessRunner, RunError};
///
/// struct Canned;
///
/// impl ProcessRunner for Canned {
///     fn run(&self, _command: &str, _cwd: &Path) -> Result<ProcessOutput, RunError> {
///         Ok(ProcessOutput::new("", "", Some(0)))
///     }
/// }
/// ```
pub trait ProcessRunner {
    /// Runs `command` in `cwd` and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] if the process cannot be started, times out, or
    /// its output cannot be collected.
    fn run(&self, command: &str, cwd: &Path) -> Result<ProcessOutput, RunError>;
}

/// Runs command lines through `sh -c`.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use compilot_toolchains::{ProcessRunner, ShellRunner};
///
/// let runner = ShellRunner::new().with_timeout_secs(30);
/// let output = runner.run("gcc -c main.c", Path::new("/tmp/project"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner {
    timeout_secs: Option<u64>,
}

impl ShellRunner {
    /// Creates a runner without a timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout_secs: None }
    }

    /// Kills the process and reports [`RunError::Timeout`] after `secs`.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<ProcessOutput, RunError> {
        debug!(
            target: PROCESS_TARGET,
            command,
            cwd = %cwd.display(),
            "spawning toolchain process"
        );

        let mut shell = Command::new(SHELL);
        shell
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // The shell leads its own process group so a timeout reaches every
        // process the command starts.
        #[cfg(unix)]
        shell.process_group(0);
        let mut child = shell
            .spawn()
            .map_err(|err| RunError::SpawnFailed {
                command: command.to_owned(),
                source: Arc::new(err),
            })?;

        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = match self.timeout_secs {
            Some(timeout_secs) => wait_with_timeout(command, &mut child, timeout_secs)?,
            None => child.wait().map_err(|err| io_error(command, err))?,
        };

        let output = ProcessOutput::new(
            collect(command, stdout)?,
            collect(command, stderr)?,
            status.code(),
        );

        debug!(
            target: PROCESS_TARGET,
            command,
            status = ?output.status(),
            stdout_bytes = output.stdout().len(),
            stderr_bytes = output.stderr().len(),
            "toolchain process exited"
        );

        if is_shell_not_found(&output) {
            return Err(RunError::SpawnFailed {
                command: command.to_owned(),
                source: Arc::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    output.stderr().to_owned(),
                )),
            });
        }

        Ok(output)
    }
}

/// Returns `true` when the shell itself reported that the command does not
/// exist, as opposed to a toolchain that ran and exited with 127.
///
/// dash prints `sh: 1: tool: not found`; bash prints
/// `sh: line 1: tool: command not found`. Any other output means the command
/// ran.
fn is_shell_not_found(output: &ProcessOutput) -> bool {
    if output.status() != Some(COMMAND_NOT_FOUND_STATUS) || !output.stdout().is_empty() {
        return false;
    }
    let mut lines = output.stderr().lines();
    match (lines.next(), lines.next()) {
        (Some(line), None) => {
            line.strip_prefix(SHELL)
                .is_some_and(|rest| rest.starts_with(": "))
                && (line.ends_with(": not found") || line.ends_with(": command not found"))
        }
        _ => false,
    }
}

type Reader = Option<JoinHandle<std::io::Result<String>>>;

/// Drains a pipe on a helper thread so the child never blocks on a full
/// buffer.
fn spawn_reader(handle: Option<impl Read + Send + 'static>) -> Reader {
    handle.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            pipe.read_to_end(&mut buffer)?;
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        })
    })
}

fn collect(command: &str, reader: Reader) -> Result<String, RunError> {
    let Some(handle) = reader else {
        return Ok(String::new());
    };
    handle
        .join()
        .map_err(|_| io_error(command, std::io::Error::other("output reader panicked")))?
        .map_err(|err| io_error(command, err))
}

/// Polls the child for exit, killing it once the timeout elapses.
fn wait_with_timeout(
    command: &str,
    child: &mut Child,
    timeout_secs: u64,
) -> Result<ExitStatus, RunError> {
    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    warn!(
                        target: PROCESS_TARGET,
                        command,
                        timeout_secs,
                        "toolchain timed out, killing process"
                    );
                    terminate(command, child);
                    return Err(RunError::Timeout {
                        command: command.to_owned(),
                        timeout_secs,
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return Err(io_error(command, err)),
        }
    }
}

/// Kills the shell's whole process group, then reaps the shell.
fn terminate(command: &str, child: &mut Child) {
    kill_process_group(command, child);
    drop(child.kill());
    drop(child.wait());
}

#[cfg(unix)]
fn kill_process_group(command: &str, child: &Child) {
    let Ok(raw_pid) = i32::try_from(child.id()) else {
        return;
    };
    if let Err(errno) = killpg(Pid::from_raw(raw_pid), Signal::SIGKILL) {
        debug!(
            target: PROCESS_TARGET,
            command,
            %errno,
            "failed to signal toolchain process group"
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_command: &str, _child: &Child) {}

fn io_error(command: &str, err: std::io::Error) -> RunError {
    RunError::Io {
        command: command.to_owned(),
        source: Arc::new(err),
    }
}
