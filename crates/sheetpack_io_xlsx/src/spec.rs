//! Shared XLSX options, summaries and errors.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Keep default column widths.
    #[default]
    None,
    /// Infer width from cell text.
    Body,
}

/// Autofit policy applied when the workbook is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Max rows inspected per sheet.
    pub height_body_inferred_max: Option<usize>,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::None,
            height_body_inferred_max: Some(20_000),
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxWriteOptions {
    /// New sheets start with every row hidden; rows carrying data get unhidden.
    pub if_hide_rows_by_default: bool,
    /// WHATWG label used to decode field bytes; `None` means lossy UTF-8.
    pub encoding_label: Option<String>,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Stored content of one non-blank cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumCellValue {
    /// Raw field bytes, decoded with the writer encoding when persisted.
    Field(Vec<u8>),
    /// Text that is already decoded, such as values copied from a template.
    Text(String),
}

impl EnumCellValue {
    /// Underlying bytes; UTF-8 for text cells.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Field(v) => v,
            Self::Text(s) => s.as_bytes(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Summaries

/// Counters of one grid-to-sheet mapping call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetWriteSummary {
    /// Name of the sheet as stored in the workbook.
    pub sheet_name: String,
    /// Source rows visited.
    pub n_rows: usize,
    /// Non-empty fields written as cells.
    pub n_cells_written: usize,
    /// Empty fields skipped (their column index is still consumed).
    pub n_cells_blank: usize,
    /// Rows marked visible because they carry data.
    pub n_rows_unhidden: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook model and persistence failures. None of these are recovered
/// locally; they end the run.
#[derive(Debug, Error)]
pub enum XlsxWriteError {
    /// Sheet name rejected by Excel naming rules.
    #[error("Invalid sheet name {name:?}: {reason}")]
    InvalidSheetName {
        /// Rejected name.
        name: String,
        /// Rule that was violated.
        reason: String,
    },
    /// Cell or row address outside the Excel grid.
    #[error("Cell ({row}, {col}) is outside the Excel grid in sheet {sheet_name:?}")]
    CellOutOfRange {
        /// Sheet being written.
        sheet_name: String,
        /// 1-based row.
        row: usize,
        /// 1-based column.
        col: usize,
    },
    /// Unknown text encoding label.
    #[error("Unknown encoding label: {0:?}")]
    UnknownEncoding(String),
    /// Invalid autofit policy.
    #[error("Invalid autofit policy: {0}")]
    InvalidAutofitPolicy(String),
    /// Template workbook could not be read.
    #[error("Failed to read template {}: {message}", path.display())]
    TemplateRead {
        /// Template path.
        path: PathBuf,
        /// Reader error text.
        message: String,
    },
    /// Error raised by `rust_xlsxwriter`.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
