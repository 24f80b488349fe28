//! Command-line runtime for Compilot.
//!
//! The runtime parses the dispatch request, loads layered configuration,
//! installs telemetry, runs the toolchain through the dispatcher and writes the
//! JSON response to stdout. Configuration loading and IO streams can be
//! substituted so that tests exercise the whole flow in-process.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use compilot_config::Config;
use compilot_toolchains::{Dispatcher, Response, ShellRunner, ToolchainRegistry};
use tracing::debug;

mod cli;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, command_arguments, split_config_arguments};
use errors::AppError;

const CLI_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::run");

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Exits successfully when the toolchain response is ok, with `1` when the
/// toolchain reported a failure, and with `2` for usage or configuration
/// errors.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let cli = match Cli::try_parse_from(command_arguments(&args, &split)) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            let _ = write!(io.stdout, "{}", error.render());
            return ExitCode::SUCCESS;
        }
        Err(error) => return report(io, &AppError::CliUsage(error)),
    };

    let result = loader
        .load(&split.config_arguments)
        .and_then(|config| {
            telemetry::initialise(&config)?;
            Ok(config)
        })
        .and_then(|config| execute(&cli, &config))
        .and_then(|response| write_response(io, &response, cli.pretty).map(|()| response));

    match result {
        Ok(response) if response.is_ok() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => report(io, &error),
    }
}

fn execute(cli: &Cli, config: &Config) -> Result<Response, AppError> {
    let working_directory = resolve_directory(cli.directory.as_deref())?;
    let runner = config
        .timeout_secs()
        .map_or_else(ShellRunner::new, |secs| ShellRunner::new().with_timeout_secs(secs));
    let dispatcher = Dispatcher::new(ToolchainRegistry::with_default_toolchains(), runner)
        .with_command_prefix(config.command_prefix());
    debug!(
        target: CLI_TARGET,
        command = cli.command.as_str(),
        directory = %working_directory.display(),
        files = cli.files.len(),
        "dispatching request"
    );
    Ok(dispatcher.dispatch(&cli.command, &working_directory, &cli.files))
}

fn resolve_directory(directory: Option<&Path>) -> Result<PathBuf, AppError> {
    directory.map_or_else(
        || std::env::current_dir().map_err(AppError::WorkingDirectory),
        |path| Ok(path.to_path_buf()),
    )
}

fn write_response<W: Write, E: Write>(
    io: &mut IoStreams<'_, W, E>,
    response: &Response,
    pretty: bool,
) -> Result<(), AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
    .map_err(AppError::SerialiseResponse)?;
    writeln!(io.stdout, "{rendered}").map_err(AppError::WriteResponse)?;
    io.stdout.flush().map_err(AppError::WriteResponse)
}

fn report<W: Write, E: Write>(io: &mut IoStreams<'_, W, E>, error: &AppError) -> ExitCode {
    let _ = writeln!(io.stderr, "{error}");
    ExitCode::from(error.exit_code())
}
