//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Exit status for usage, configuration, and telemetry failures.
pub(crate) const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to resolve the working directory: {0}")]
    WorkingDirectory(io::Error),
    #[error("failed to serialise the response: {0}")]
    SerialiseResponse(serde_json::Error),
    #[error("failed to write the response: {0}")]
    WriteResponse(io::Error),
}

impl AppError {
    /// Maps the error to the process exit status.
    pub(crate) const fn exit_code(&self) -> u8 {
        match self {
            Self::LoadConfiguration(_) | Self::CliUsage(_) | Self::Telemetry(_) => {
                USAGE_EXIT_CODE
            }
            Self::WorkingDirectory(_) | Self::SerialiseResponse(_) | Self::WriteResponse(_) => 1,
        }
    }
}
