//! Output formats for the diagnostic log stream on stderr.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How `compilot` renders its own log records.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per record, with event fields flattened.
    #[default]
    Json,
    /// Terse single-line text for interactive use.
    Compact,
}

/// Error returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    #[case("Compact", LogFormat::Compact)]
    fn parses_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_str(text), Ok(expected));
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(LogFormat::from_str("pretty").is_err());
    }

    #[test]
    fn displays_in_snake_case() {
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}
