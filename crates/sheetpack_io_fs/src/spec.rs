//! Scan options and top-level error types.

use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Pattern matching mode for include/exclude lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumScanPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    #[default]
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Substring match.
    Literal,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `scan_sheet_sources`.
#[derive(Debug, Clone)]
pub struct SpecScanOptions {
    /// Include patterns applied to file basename.
    pub patterns_include_files: Option<Vec<String>>,
    /// Exclude patterns applied to file basename.
    pub patterns_exclude_files: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumScanPatternMode,
    /// Skip entries whose name starts with `.`.
    pub if_skip_hidden: bool,
}

impl Default for SpecScanOptions {
    fn default() -> Self {
        Self {
            patterns_include_files: None,
            patterns_exclude_files: None,
            rule_pattern: EnumScanPatternMode::Glob,
            if_skip_hidden: true,
        }
    }
}

/// "Top-level call failed" errors. Any of these aborts the run before
/// a single sheet is read.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Invalid include/exclude pattern.
    #[error("Invalid pattern in include/exclude: {0}")]
    InvalidPattern(String),
    /// Input path is not a directory.
    #[error("Input is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    /// Input directory could not be listed.
    #[error("Failed to open input directory {}: {source}", path.display())]
    ReadDirFailed {
        /// Directory that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
