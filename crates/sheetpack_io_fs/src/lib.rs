//! `sheetpack_io_fs` v1:
//! Input directory enumeration for sheet dump files.
//!
//! Module layout:
//! - `scan`   : directory listing and sheet source planning
//! - `spec`   : enums/options/errors
//! - `report` : scan result model
//! - `util`   : pattern compilation and matching

pub mod report;
pub mod scan;
pub mod spec;
mod util;

pub use report::{ReportScan, SpecSheetSource};
pub use scan::scan_sheet_sources;
pub use spec::{EnumScanPatternMode, ScanError, SpecScanOptions};
