// src/logging.rs
// =============================================================================
// Log level selection and tracing-subscriber setup.
//
// Where logs go:
// - `repo-tree tree` and `repo-tree diagram` print their RESULT on stdout,
//   so people can pipe it (`repo-tree tree ... > tree.txt`). Log lines must
//   never end up mixed into that output, so the subscriber writes to stderr.
// - `repo-tree serve` has no stdout output at all; request lines, upstream
//   failures and truncation warnings all land on stderr too, which is where
//   container runtimes and systemd pick them up.
//
// `--log-level silent` still installs the subscriber, just with every level
// filtered out, so `tracing` macros stay cheap no-ops.
// =============================================================================

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Silent,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Silent => LevelFilter::OFF,
        }
    }
}

/// Installs the global fmt subscriber, writing compact lines to stderr
pub fn setup_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(level))
        .with_writer(io::stderr)
        // Colour codes only when a person is watching
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_map_to_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::default()), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Silent), LevelFilter::OFF);
    }

    #[test]
    fn test_levels_parse_from_cli_names() {
        assert_eq!(LogLevel::from_str("warn", true), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("SILENT", true), Ok(LogLevel::Silent));
        assert!(LogLevel::from_str("trace", true).is_err());
    }
}
