use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Fallback command prefix applied when none is configured.
pub const DEFAULT_COMMAND_PREFIX: &str = "";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default fallback command prefix.
#[must_use]
pub const fn default_command_prefix() -> &'static str {
    DEFAULT_COMMAND_PREFIX
}
