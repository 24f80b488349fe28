//! Shared configuration for the Compilot binary.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then a
//! configuration file (discovered automatically or named with
//! `--config-path` / `COMPILOT_CONFIG_PATH`), then `COMPILOT_*` environment
//! variables, then command-line flags. Every field is optional in every layer;
//! the accessors apply the defaults from this crate.
//!
//! ```toml
//! command_prefix = "firejail --quiet "
//! timeout_secs = 60
//! log_filter = "compilot_toolchains=debug"
//! log_format = "compact"
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;

pub use self::defaults::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_LOG_FILTER, default_command_prefix, default_log_filter,
    default_log_format,
};
pub use self::logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for toolchain dispatch and telemetry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "COMPILOT")]
pub struct Config {
    /// Prefix prepended verbatim to commands no toolchain route recognises,
    /// for example a sandbox or environment wrapper.
    #[serde(default)]
    command_prefix: Option<String>,
    /// Wall-clock limit for one toolchain run, in seconds. Unlimited when
    /// unset.
    #[serde(default)]
    timeout_secs: Option<u64>,
    /// `tracing` filter directive for the diagnostic log stream.
    #[serde(default)]
    log_filter: Option<String>,
    /// Output format of the diagnostic log stream.
    #[serde(default)]
    log_format: Option<LogFormat>,
}

impl Config {
    /// Returns the fallback command prefix.
    #[must_use]
    pub fn command_prefix(&self) -> &str {
        self.command_prefix
            .as_deref()
            .unwrap_or(DEFAULT_COMMAND_PREFIX)
    }

    /// Returns the toolchain timeout, if one is configured.
    #[must_use]
    pub const fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }

    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Returns the log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Sets the fallback command prefix.
    #[must_use]
    pub fn with_command_prefix(mut self, command_prefix: impl Into<String>) -> Self {
        self.command_prefix = Some(command_prefix.into());
        self
    }

    /// Sets the toolchain timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Sets the log filter expression.
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = Some(log_filter.into());
        self
    }

    /// Sets the log output format.
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = Some(log_format);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.command_prefix(), "");
        assert_eq!(config.timeout_secs(), None);
        assert_eq!(config.log_filter(), default_log_filter());
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn builders_override_defaults() {
        let config = Config::default()
            .with_command_prefix("nice ")
            .with_timeout_secs(30)
            .with_log_filter("debug")
            .with_log_format(LogFormat::Compact);
        assert_eq!(config.command_prefix(), "nice ");
        assert_eq!(config.timeout_secs(), Some(30));
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.log_format(), LogFormat::Compact);
    }
}
