//! Scan result models.

use std::fmt;
use std::path::PathBuf;

/// One input file planned to become a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSource {
    /// Full path of the input file.
    pub path_file: PathBuf,
    /// File name as listed in the directory.
    pub name_file: String,
}

/// Sheet sources found in one input directory, in sheet order.
#[derive(Debug, Default, Clone)]
pub struct ReportScan {
    /// Sources sorted by file name.
    pub sources: Vec<SpecSheetSource>,
    /// Total directory entries seen.
    pub cnt_scanned: u64,
    /// Entries skipped as hidden, filtered, or non-file.
    pub cnt_skipped: u64,
    /// Non-fatal warnings collected while listing.
    pub warnings: Vec<String>,
}

impl ReportScan {
    /// Number of planned sheet sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub(crate) fn add_warning(&mut self, warning: String) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}

impl fmt::Display for ReportScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[SCAN] scanned={} sources={} skipped={} warnings={}",
            self.cnt_scanned,
            self.source_count(),
            self.cnt_skipped,
            self.warnings.len()
        )
    }
}
