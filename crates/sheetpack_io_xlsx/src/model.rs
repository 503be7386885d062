//! In-memory workbook store.
//!
//! This is the cell/row/sheet surface the grid mapper writes against. Cells
//! written from grids keep raw field bytes; text decoding happens only when
//! [`crate::XlsxWriter`] persists the workbook. All addresses are 1-based.

use std::collections::BTreeMap;

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{EnumCellValue, XlsxWriteError};
use crate::util::{derive_sheet_key, validate_sheet_name};

////////////////////////////////////////////////////////////////////////////////
// #region Sheet

/// One named worksheet: sparse cells plus per-row hidden flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheet {
    name: String,
    if_visible: bool,
    if_rows_hidden_default: bool,
    dict_cells: BTreeMap<(usize, usize), EnumCellValue>,
    dict_rows_hidden: BTreeMap<usize, bool>,
    n_row_extent: usize,
}

impl SpecSheet {
    fn new(name: String, if_rows_hidden_default: bool) -> Self {
        Self {
            name,
            if_visible: true,
            if_rows_hidden_default,
            dict_cells: BTreeMap::new(),
            dict_rows_hidden: BTreeMap::new(),
            n_row_extent: 0,
        }
    }

    /// Sheet name as first created.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the sheet tab is shown.
    pub fn is_visible(&self) -> bool {
        self.if_visible
    }

    /// Show or hide the sheet tab.
    pub fn set_visible(&mut self, if_visible: bool) {
        self.if_visible = if_visible;
    }

    /// Stored cell bytes, `None` when blank. Text cells yield their UTF-8 bytes.
    pub fn cell(&self, row: usize, col: usize) -> Option<&[u8]> {
        self.dict_cells.get(&(row, col)).map(EnumCellValue::as_bytes)
    }

    /// Store field bytes at (row, col), replacing any previous value.
    pub fn set_cell(&mut self, row: usize, col: usize, value: &[u8]) -> Result<(), XlsxWriteError> {
        self.insert_cell(row, col, EnumCellValue::Field(value.to_vec()))
    }

    /// Store already decoded text at (row, col), replacing any previous value.
    pub fn set_cell_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<(), XlsxWriteError> {
        self.insert_cell(row, col, EnumCellValue::Text(text.to_string()))
    }

    /// Effective hidden state of `row`: explicit flag, else the sheet default.
    pub fn is_row_hidden(&self, row: usize) -> bool {
        self.row_hidden_flag(row).unwrap_or(self.if_rows_hidden_default)
    }

    /// Explicitly set hidden flag of `row`, `None` when never touched.
    pub fn row_hidden_flag(&self, row: usize) -> Option<bool> {
        self.dict_rows_hidden.get(&row).copied()
    }

    /// Set the hidden flag of `row`.
    pub fn set_row_hidden(&mut self, row: usize, if_hidden: bool) -> Result<(), XlsxWriteError> {
        self.validate_address(row, 1)?;
        self.dict_rows_hidden.insert(row, if_hidden);
        self.n_row_extent = usize::max(self.n_row_extent, row);
        Ok(())
    }

    /// Grow the row extent to cover `n_rows` rows without touching any flag.
    ///
    /// Rows inside the extent are the ones the default hidden state is
    /// applied to when persisting. The extent never exceeds the Excel grid;
    /// only cell and row writes reject addresses outside it.
    pub fn extend_row_extent(&mut self, n_rows: usize) {
        let n_rows = usize::min(n_rows, N_NROWS_EXCEL_MAX);
        self.n_row_extent = usize::max(self.n_row_extent, n_rows);
    }

    /// Highest row touched by a cell, a row flag or an extent update.
    pub fn n_row_extent(&self) -> usize {
        self.n_row_extent
    }

    /// Non-blank cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &EnumCellValue)> {
        self.dict_cells.iter().map(|(addr, value)| (*addr, value))
    }

    /// Number of non-blank cells.
    pub fn n_cells(&self) -> usize {
        self.dict_cells.len()
    }

    fn insert_cell(
        &mut self,
        row: usize,
        col: usize,
        value: EnumCellValue,
    ) -> Result<(), XlsxWriteError> {
        self.validate_address(row, col)?;
        self.dict_cells.insert((row, col), value);
        self.n_row_extent = usize::max(self.n_row_extent, row);
        Ok(())
    }

    fn validate_address(&self, row: usize, col: usize) -> Result<(), XlsxWriteError> {
        if (1..=N_NROWS_EXCEL_MAX).contains(&row) && (1..=N_NCOLS_EXCEL_MAX).contains(&col) {
            return Ok(());
        }
        Err(XlsxWriteError::CellOutOfRange {
            sheet_name: self.name.clone(),
            row,
            col,
        })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workbook

/// Ordered collection of uniquely named sheets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecWorkbook {
    l_sheets: Vec<SpecSheet>,
    dict_idx_by_key: BTreeMap<String, usize>,
    if_rows_hidden_default: bool,
}

impl SpecWorkbook {
    /// Empty workbook; sheets created later inherit `if_rows_hidden_default`.
    pub fn new(if_rows_hidden_default: bool) -> Self {
        Self {
            if_rows_hidden_default,
            ..Self::default()
        }
    }

    /// Sheets in creation order.
    pub fn sheets(&self) -> &[SpecSheet] {
        &self.l_sheets
    }

    /// Sheet names in creation order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.l_sheets.iter().map(SpecSheet::name).collect()
    }

    /// Case-insensitive sheet lookup.
    pub fn sheet(&self, name: &str) -> Option<&SpecSheet> {
        self.dict_idx_by_key
            .get(&derive_sheet_key(name))
            .map(|n_idx| &self.l_sheets[*n_idx])
    }

    /// Return the sheet named `name`, creating it at the end when absent.
    pub fn get_or_create_sheet(&mut self, name: &str) -> Result<&mut SpecSheet, XlsxWriteError> {
        let c_key = derive_sheet_key(name);
        if let Some(n_idx) = self.dict_idx_by_key.get(&c_key) {
            return Ok(&mut self.l_sheets[*n_idx]);
        }

        validate_sheet_name(name)?;
        let n_idx = self.l_sheets.len();
        self.l_sheets
            .push(SpecSheet::new(name.to_string(), self.if_rows_hidden_default));
        self.dict_idx_by_key.insert(c_key, n_idx);
        Ok(&mut self.l_sheets[n_idx])
    }

    /// Create a sheet with an explicit row default, used for template seeding.
    pub(crate) fn create_sheet_with_default(
        &mut self,
        name: &str,
        if_rows_hidden_default: bool,
    ) -> Result<&mut SpecSheet, XlsxWriteError> {
        let sheet = self.get_or_create_sheet(name)?;
        sheet.if_rows_hidden_default = if_rows_hidden_default;
        Ok(sheet)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
