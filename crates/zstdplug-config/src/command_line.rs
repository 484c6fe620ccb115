//! Process command-line source
//!
//! Options are matched case-insensitively anywhere in the argument string, and a value is
//! the token that directly follows the option text: either a double-quoted string or a run
//! of characters up to the next whitespace or comma.

use crate::{ConfigError, ConfigResult};
use std::fmt;
use std::str::FromStr;

/// Read-only view of a process-scoped argument string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    raw: String,
}

impl CommandLine {
    /// Wrap an argument string
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Join an argument vector, quoting arguments that contain whitespace
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = args
            .into_iter()
            .map(|arg| {
                let arg = arg.as_ref();
                if arg.chars().any(char::is_whitespace) {
                    format!("\"{}\"", arg)
                } else {
                    arg.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self { raw }
    }

    /// Arguments of the current process, excluding the program name
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// The raw argument string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Append more arguments, separated by a space
    pub fn append(&mut self, more: &str) {
        let more = more.trim();
        if more.is_empty() {
            return;
        }
        if !self.raw.is_empty() {
            self.raw.push(' ');
        }
        self.raw.push_str(more);
    }

    /// Whether `option` occurs in the argument string, ignoring ASCII case
    pub fn has_option(&self, option: &str) -> bool {
        self.value_start(option).is_some()
    }

    /// Raw text following `option`, if the option is present
    pub fn value(&self, option: &str) -> Option<&str> {
        let start = self.value_start(option)?;
        let rest = &self.raw[start..];

        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            return Some(&quoted[..end]);
        }

        let end = rest
            .find(|c: char| c.is_whitespace() || c == ',')
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Parse the value following `option`
    ///
    /// Returns `Ok(None)` when the option is absent and [`ConfigError::InvalidValue`] when
    /// it is present but its value does not parse.
    pub fn parse_value<T>(&self, option: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let Some(value) = self.value(option) else {
            return Ok(None);
        };

        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::invalid_value(option, format!("'{}': {}", value, e)))
    }

    /// Byte offset just past the first case-insensitive match of `option`
    fn value_start(&self, option: &str) -> Option<usize> {
        // ASCII lowercasing keeps byte offsets aligned with `raw`.
        let haystack = self.raw.to_ascii_lowercase();
        let needle = option.to_ascii_lowercase();
        haystack.find(&needle).map(|index| index + needle.len())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for CommandLine {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CommandLine {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const OPTION: &str = "-ZstdLevel=";

    #[rstest]
    #[case("-ZstdLevel=19", true)]
    #[case("-zstdlevel=19", true)]
    #[case("-game -ZSTDLEVEL=3 -log", true)]
    #[case("-ZstdLevel", false)]
    #[case("-Level=19", false)]
    #[case("", false)]
    fn test_has_option(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(CommandLine::new(raw).has_option(OPTION), expected);
    }

    #[rstest]
    #[case("-ZstdLevel=19", Some(19))]
    #[case("-game -zstdlevel=22 -log", Some(22))]
    #[case("-ZstdLevel=-3", Some(-3))]
    #[case("-ZstdLevel=7,-log", Some(7))]
    #[case("-ZstdLevel=\"12\"", Some(12))]
    #[case("-game", None)]
    fn test_parse_value(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(CommandLine::new(raw).parse_value::<i32>(OPTION).unwrap(), expected);
    }

    #[rstest]
    #[case("-ZstdLevel=high")]
    #[case("-ZstdLevel=")]
    #[case("-ZstdLevel= 5")]
    #[case("-ZstdLevel=99999999999")]
    fn test_parse_value_invalid(#[case] raw: &str) {
        let error = CommandLine::new(raw).parse_value::<i32>(OPTION).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { .. }));
        assert!(error.to_string().contains(OPTION));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let command_line = CommandLine::new("-ZstdLevel=3 -ZstdLevel=9");
        assert_eq!(command_line.parse_value::<i32>(OPTION).unwrap(), Some(3));
    }

    #[test]
    fn test_from_args_quotes_whitespace() {
        let command_line = CommandLine::from_args(["compress", "my file.bin", "-ZstdLevel=4"]);
        assert_eq!(command_line.as_str(), "compress \"my file.bin\" -ZstdLevel=4");
        assert_eq!(command_line.parse_value::<i32>(OPTION).unwrap(), Some(4));
    }

    #[test]
    fn test_append() {
        let mut command_line = CommandLine::new("-game");
        command_line.append("  ");
        command_line.append("-ZstdLevel=5");
        assert_eq!(command_line.to_string(), "-game -ZstdLevel=5");

        let mut empty = CommandLine::default();
        empty.append("-ZstdLevel=6");
        assert_eq!(empty.as_str(), "-ZstdLevel=6");
    }

    #[test]
    fn test_non_ascii_arguments() {
        let command_line = CommandLine::new("-Pfad=Größe -ZstdLevel=8");
        assert_eq!(command_line.parse_value::<i32>(OPTION).unwrap(), Some(8));
        assert_eq!(command_line.value("-pfad="), Some("Größe"));
    }
}
