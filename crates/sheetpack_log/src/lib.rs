//! `sheetpack_log` v1:
//! Console backend for the `log` facade used by the sheetpack crates.
//!
//! Records are written as `[LEVEL] message`. Errors go to stderr, everything
//! else to stdout, so per-sheet diagnostics such as `no file <path>` appear on
//! standard output.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Verbosity presets exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumLogLevel {
    /// Errors only.
    Quiet,
    /// Warnings and run summary.
    #[default]
    Normal,
    /// Per-sheet progress.
    Verbose,
    /// Internal details.
    Trace,
}

impl EnumLogLevel {
    /// Map `-v` count and `-q` flag to a preset; `quiet` wins.
    pub fn from_verbosity(n_verbose: u8, if_quiet: bool) -> Self {
        if if_quiet {
            return Self::Quiet;
        }
        match n_verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    /// Facade filter for this preset.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Error,
            Self::Normal => LevelFilter::Info,
            Self::Verbose => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

struct LoggerConsole;

static LOGGER: LoggerConsole = LoggerConsole;

impl Log for LoggerConsole {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let c_line = format_record(record.level(), &record.args().to_string());
        // Write failures (closed pipe) are ignored.
        if record.level() == Level::Error {
            let _ = writeln!(std::io::stderr().lock(), "{c_line}");
        } else {
            let _ = writeln!(std::io::stdout().lock(), "{c_line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

/// Render one log line.
pub fn format_record(level: Level, message: &str) -> String {
    format!("[{level}] {message}")
}

/// Install the console logger. Fails if another logger is already installed.
pub fn init_logger(level: EnumLogLevel) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_verbosity_maps_counts() {
        assert_eq!(EnumLogLevel::from_verbosity(0, false), EnumLogLevel::Normal);
        assert_eq!(EnumLogLevel::from_verbosity(1, false), EnumLogLevel::Verbose);
        assert_eq!(EnumLogLevel::from_verbosity(5, false), EnumLogLevel::Trace);
        assert_eq!(EnumLogLevel::from_verbosity(3, true), EnumLogLevel::Quiet);
    }

    #[test]
    fn level_filters_are_ordered() {
        assert_eq!(EnumLogLevel::Quiet.to_level_filter(), LevelFilter::Error);
        assert_eq!(EnumLogLevel::Normal.to_level_filter(), LevelFilter::Info);
        assert!(EnumLogLevel::Verbose.to_level_filter() < EnumLogLevel::Trace.to_level_filter());
    }

    #[test]
    fn format_record_prefixes_level() {
        assert_eq!(format_record(Level::Warn, "no file x"), "[WARN] no file x");
    }

    #[test]
    fn init_logger_only_once() {
        assert!(init_logger(EnumLogLevel::Normal).is_ok());
        assert!(init_logger(EnumLogLevel::Normal).is_err());
    }
}
