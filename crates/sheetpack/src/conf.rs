//! Run defaults.

/// Output workbook file name when none is given.
pub const C_FILE_NAME_OUT_DEFAULT: &str = "workbook.xlsx";
/// Replacement for characters Excel rejects in sheet names.
pub const C_SHEET_NAME_REPLACE_TO: &str = "_";

/// Exit code for run failures (unreadable input directory, workbook errors).
pub const N_EXIT_CODE_FAILURE: i32 = 1;
