//! `sheetpack` v1:
//! Directory-to-workbook conversion run and command-line surface.
//!
//! Module layout:
//! - `conf`    : defaults
//! - `spec`    : run options and errors
//! - `report`  : run report model and builder
//! - `convert` : scan → tokenize → map → persist orchestration
//! - `cli`     : clap arguments and process entry point

pub mod cli;
pub mod conf;
pub mod convert;
pub mod report;
pub mod spec;

pub use convert::{convert_directory, derive_sheet_name};
pub use report::{ReportConvert, ReportConvertBuilder};
pub use spec::{ConvertError, SpecConvertOptions};
