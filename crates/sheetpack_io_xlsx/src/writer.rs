//! Workbook context: collects sheets for one run and persists them once.

use std::borrow::Cow;
use std::path::Path;

use calamine::{Data, Reader, SheetVisible, open_workbook_auto};
use encoding_rs::{Encoding, UTF_8};
use rust_xlsxwriter::{Workbook, Worksheet};
use sheetpack_io_sep::TypeGrid;

use crate::mapper::write_sheet;
use crate::model::{SpecSheet, SpecWorkbook};
use crate::spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecSheetWriteSummary, SpecXlsxWriteOptions,
    XlsxWriteError,
};
use crate::util::{
    calculate_column_width, cast_col_num, cast_row_num, estimate_unicode_string_width,
    validate_policy_autofit,
};

/// Stateful workbook writer.
///
/// Owns the in-memory workbook for the whole run. Sheets are added through
/// [`Self::write_sheet`]; [`Self::finalize`] consumes the writer, so the
/// workbook is saved exactly once and cannot be touched afterwards.
#[derive(Debug)]
pub struct XlsxWriter {
    workbook: SpecWorkbook,
    write_options: SpecXlsxWriteOptions,
    encoding: &'static Encoding,
}

impl XlsxWriter {
    /// Create a writer with an empty workbook.
    pub fn new(write_options: SpecXlsxWriteOptions) -> Result<Self, XlsxWriteError> {
        validate_policy_autofit(&write_options.policy_autofit)?;
        let encoding = derive_encoding(write_options.encoding_label.as_deref())?;

        Ok(Self {
            workbook: SpecWorkbook::new(write_options.if_hide_rows_by_default),
            write_options,
            encoding,
        })
    }

    /// Create a writer seeded with the sheets of an existing workbook.
    ///
    /// Every template sheet is copied in order with its visibility. Cell
    /// values are kept as decoded text, so the writer encoding never applies
    /// to them; styles, formulas and macros are not kept.
    pub fn from_template<P: AsRef<Path>>(
        path_template: P,
        write_options: SpecXlsxWriteOptions,
    ) -> Result<Self, XlsxWriteError> {
        let path_template = path_template.as_ref();
        let mut writer = Self::new(write_options)?;

        let template_error = |message: String| XlsxWriteError::TemplateRead {
            path: path_template.to_path_buf(),
            message,
        };

        let mut template =
            open_workbook_auto(path_template).map_err(|e| template_error(e.to_string()))?;
        let l_sheets_meta = template.sheets_metadata().to_vec();

        for sheet_meta in l_sheets_meta {
            let range = template
                .worksheet_range(&sheet_meta.name)
                .map_err(|e| template_error(e.to_string()))?;
            let (n_row_start, n_col_start) = range.start().unwrap_or((0, 0));

            let sheet = writer
                .workbook
                .create_sheet_with_default(&sheet_meta.name, false)?;
            sheet.set_visible(matches!(sheet_meta.visible, SheetVisible::Visible));

            for (n_row, n_col, value) in range.used_cells() {
                let c_text = match value {
                    Data::Empty => continue,
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if c_text.is_empty() {
                    continue;
                }
                sheet.set_cell_text(
                    n_row_start as usize + n_row + 1,
                    n_col_start as usize + n_col + 1,
                    &c_text,
                )?;
            }
            log::debug!(
                "template sheet {:?}: {} cells",
                sheet_meta.name,
                sheet.n_cells()
            );
        }

        Ok(writer)
    }

    /// Map `grid` into the sheet named `sheet_name`.
    pub fn write_sheet(
        &mut self,
        sheet_name: &str,
        grid: &TypeGrid,
    ) -> Result<SpecSheetWriteSummary, XlsxWriteError> {
        write_sheet(sheet_name, grid, &mut self.workbook)
    }

    /// Current in-memory workbook.
    pub fn workbook(&self) -> &SpecWorkbook {
        &self.workbook
    }

    /// Persist the workbook to `path_file_out`.
    pub fn finalize<P: AsRef<Path>>(self, path_file_out: P) -> Result<(), XlsxWriteError> {
        let path_file_out = path_file_out.as_ref();
        let mut workbook = self.build_workbook()?;
        workbook.save(path_file_out)?;
        log::info!(
            "saved {} sheets to {}",
            self.workbook.sheets().len(),
            path_file_out.display()
        );
        Ok(())
    }

    /// Persist the workbook into an in-memory `.xlsx` buffer.
    pub fn finalize_to_buffer(self) -> Result<Vec<u8>, XlsxWriteError> {
        let mut workbook = self.build_workbook()?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build_workbook(&self) -> Result<Workbook, XlsxWriteError> {
        let mut workbook = Workbook::new();
        // A hidden sheet cannot be the active one, and the first sheet is
        // active unless another one is marked.
        let n_idx_active = self
            .workbook
            .sheets()
            .iter()
            .position(SpecSheet::is_visible);

        for (n_idx, sheet) in self.workbook.sheets().iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            if Some(n_idx) == n_idx_active {
                worksheet.set_active(true);
            }
            self.write_worksheet(worksheet, sheet)?;
        }
        Ok(workbook)
    }

    fn write_worksheet(
        &self,
        worksheet: &mut Worksheet,
        sheet: &SpecSheet,
    ) -> Result<(), XlsxWriteError> {
        let policy_autofit = &self.write_options.policy_autofit;
        let if_autofit_columns =
            !matches!(policy_autofit.rule_columns, EnumAutofitColumnsRule::None);
        let n_rows_autofit_max = policy_autofit.height_body_inferred_max.unwrap_or(usize::MAX);

        worksheet.set_name(sheet.name())?;
        if !sheet.is_visible() {
            worksheet.set_hidden(true);
        }

        let mut l_width_by_col: Vec<usize> = Vec::new();
        for ((n_row, n_col), value) in sheet.cells() {
            let c_text = self.decode_field(value);
            let (row_num, col_num) = cast_address(sheet, n_row, n_col)?;
            worksheet.write_string(row_num, col_num, &*c_text)?;

            if if_autofit_columns && n_row <= n_rows_autofit_max {
                if l_width_by_col.len() < n_col {
                    l_width_by_col.resize(n_col, 0);
                }
                l_width_by_col[n_col - 1] = usize::max(
                    l_width_by_col[n_col - 1],
                    estimate_unicode_string_width(&c_text),
                );
            }
        }

        for n_row in 1..=sheet.n_row_extent() {
            if sheet.is_row_hidden(n_row) {
                let (row_num, _) = cast_address(sheet, n_row, 1)?;
                worksheet.set_row_hidden(row_num)?;
            }
        }

        for (n_idx_col, n_width_recorded) in l_width_by_col.into_iter().enumerate() {
            if n_width_recorded == 0 {
                continue;
            }
            let (_, col_num) = cast_address(sheet, 1, n_idx_col + 1)?;
            let n_width_final = calculate_column_width(n_width_recorded, policy_autofit);
            worksheet.set_column_width(col_num, n_width_final as f64)?;
        }

        Ok(())
    }

    fn decode_field<'a>(&self, value: &'a EnumCellValue) -> Cow<'a, str> {
        match value {
            EnumCellValue::Text(s) => Cow::Borrowed(s.as_str()),
            EnumCellValue::Field(v) if self.encoding == UTF_8 => String::from_utf8_lossy(v),
            EnumCellValue::Field(v) => self.encoding.decode_without_bom_handling(v).0,
        }
    }
}

fn derive_encoding(label: Option<&str>) -> Result<&'static Encoding, XlsxWriteError> {
    let Some(label) = label else {
        return Ok(UTF_8);
    };
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| XlsxWriteError::UnknownEncoding(label.to_string()))
}

fn cast_address(sheet: &SpecSheet, row: usize, col: usize) -> Result<(u32, u16), XlsxWriteError> {
    let out_of_range = |_| XlsxWriteError::CellOutOfRange {
        sheet_name: sheet.name().to_string(),
        row,
        col,
    };
    Ok((
        cast_row_num(row).map_err(out_of_range)?,
        cast_col_num(col).map_err(out_of_range)?,
    ))
}
