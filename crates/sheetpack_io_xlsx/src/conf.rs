//! XLSX constants.

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Sheet name reserved by Excel.
pub const C_EXCEL_RESERVED_SHEET_NAME: &str = "History";

/// Excel hard cap on column width.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
