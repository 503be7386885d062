//! `sheetpack_io_xlsx` v1:
//! Workbook model, grid mapping and XLSX persistence.
//!
//! Module layout:
//! - `conf`   : Excel limits and default presets
//! - `spec`   : options, summaries and errors
//! - `util`   : pure helper functions
//! - `model`  : in-memory workbook/sheet store
//! - `mapper` : grid-to-sheet mapping
//! - `writer` : workbook context and `rust_xlsxwriter` persistence
pub mod conf;
pub mod mapper;
pub mod model;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use mapper::{write_grid, write_sheet};
pub use model::{SpecSheet, SpecWorkbook};
pub use spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecSheetWriteSummary,
    SpecXlsxWriteOptions, XlsxWriteError,
};
pub use util::{derive_unique_sheet_name, sanitize_sheet_name, validate_sheet_name};
pub use writer::XlsxWriter;
