//! Grid-to-sheet mapping.

use sheetpack_io_sep::TypeGrid;

use crate::model::{SpecSheet, SpecWorkbook};
use crate::spec::{SpecSheetWriteSummary, XlsxWriteError};

/// Write `grid` into the sheet named `sheet_name`, creating it if needed.
///
/// The sheet is forced visible. Rows and fields map to consecutive 1-based
/// row/column indices. An empty field still consumes its column index but is
/// never written. Errors from the sheet store are returned unchanged.
pub fn write_sheet(
    sheet_name: &str,
    grid: &TypeGrid,
    workbook: &mut SpecWorkbook,
) -> Result<SpecSheetWriteSummary, XlsxWriteError> {
    let sheet = workbook.get_or_create_sheet(sheet_name)?;
    sheet.set_visible(true);
    write_grid(sheet, grid)
}

/// Write `grid` into an already resolved sheet.
///
/// A row with at least one non-empty field is unhidden after its cells are
/// written. A row of empty fields keeps whatever hidden state it had.
pub fn write_grid(
    sheet: &mut SpecSheet,
    grid: &TypeGrid,
) -> Result<SpecSheetWriteSummary, XlsxWriteError> {
    let mut summary = SpecSheetWriteSummary {
        sheet_name: sheet.name().to_string(),
        n_rows: grid.len(),
        ..Default::default()
    };
    sheet.extend_row_extent(grid.len());

    for (n_idx_row, row) in grid.iter().enumerate() {
        let n_row = n_idx_row + 1;
        let mut if_row_has_value = false;

        for (n_idx_col, field) in row.iter().enumerate() {
            if field.is_empty() {
                summary.n_cells_blank += 1;
                continue;
            }
            sheet.set_cell(n_row, n_idx_col + 1, field)?;
            summary.n_cells_written += 1;
            if_row_has_value = true;
        }

        if if_row_has_value {
            sheet.set_row_hidden(n_row, false)?;
            summary.n_rows_unhidden += 1;
        }
    }

    log::debug!(
        "sheet {:?}: rows={} cells={} blank={}",
        summary.sheet_name,
        summary.n_rows,
        summary.n_cells_written,
        summary.n_cells_blank
    );
    Ok(summary)
}
