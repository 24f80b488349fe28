//! CLI argument definitions for Compilot.

use std::path::PathBuf;

use clap::Parser;

/// Runs a compiler and reports its diagnostics as JSON, grouped by file.
#[derive(Parser, Debug)]
#[command(name = "compilot", version)]
pub(crate) struct Cli {
    /// Directory the toolchain runs in. Defaults to the current directory.
    #[arg(long, short = 'C', value_name = "DIR")]
    pub(crate) directory: Option<PathBuf>,
    /// Pretty-prints the JSON response.
    #[arg(long)]
    pub(crate) pretty: bool,
    /// The toolchain command line, for example "gcc -c main.c", or `none`.
    #[arg(value_name = "COMMAND")]
    pub(crate) command: String,
    /// Source files to report diagnostics for, in response order.
    #[arg(value_name = "FILE")]
    pub(crate) files: Vec<String>,
}
