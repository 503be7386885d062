//! Run options and top-level error types.

use std::path::PathBuf;

use sheetpack_io_fs::{ScanError, SpecScanOptions};
use sheetpack_io_xlsx::{SpecXlsxWriteOptions, XlsxWriteError};
use thiserror::Error;

/// Options for one `convert_directory` run.
#[derive(Debug, Clone, Default)]
pub struct SpecConvertOptions {
    /// Input directory listing options.
    pub scan_options: SpecScanOptions,
    /// Workbook options.
    pub write_options: SpecXlsxWriteOptions,
    /// Existing workbook whose sheets seed the output.
    pub path_template: Option<PathBuf>,
    /// Derive sheet names from the file stem instead of the full file name.
    pub if_strip_extension: bool,
}

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input directory could not be listed.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// Workbook model or persistence failure.
    #[error(transparent)]
    Xlsx(#[from] XlsxWriteError),
    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputInitFailed {
        /// Directory that failed to initialize.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
