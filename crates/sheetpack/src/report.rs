//! Run report models and mutable report builder.

use std::fmt;
use std::path::PathBuf;

use sheetpack_io_xlsx::SpecSheetWriteSummary;

/// Aggregate counters and diagnostics for one conversion run.
#[derive(Debug, Default, Clone)]
pub struct ReportConvert {
    /// Sheet sources found in the input directory.
    pub cnt_scanned: u64,
    /// Sheets written into the workbook.
    pub cnt_written: u64,
    /// Sources that could not be opened (written as empty sheets).
    pub cnt_missing: u64,
    /// Source rows mapped.
    pub cnt_rows: u64,
    /// Non-empty cells written.
    pub cnt_cells: u64,
    /// Per-sheet mapping summaries in write order.
    pub sheets: Vec<SpecSheetWriteSummary>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
    /// Workbook path written at the end of the run.
    pub path_file_out: PathBuf,
}

impl ReportConvert {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} written={} missing={} rows={} cells={} warnings={}",
            self.cnt_scanned,
            self.cnt_written,
            self.cnt_missing,
            self.cnt_rows,
            self.cnt_cells,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[CONVERT]"))
    }
}

/// Mutable accumulator for run statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportConvertBuilder {
    report: ReportConvert,
}

impl ReportConvertBuilder {
    /// Record the number of planned sheet sources.
    pub fn add_scanned(&mut self, n_sources: usize) {
        self.report.cnt_scanned += n_sources as u64;
    }

    /// Record one source that could not be opened.
    pub fn add_missing(&mut self) {
        self.report.cnt_missing += 1;
    }

    /// Record one mapped sheet.
    pub fn add_sheet(&mut self, summary: SpecSheetWriteSummary) {
        self.report.cnt_written += 1;
        self.report.cnt_rows += summary.n_rows as u64;
        self.report.cnt_cells += summary.n_cells_written as u64;
        self.report.sheets.push(summary);
    }

    /// Add warning message; it is also logged.
    pub fn add_warning(&mut self, warning: String) {
        log::warn!("{warning}");
        self.report.warnings.push(warning);
    }

    /// Carry over warnings that were already logged elsewhere.
    pub fn extend_warnings(&mut self, warnings: impl IntoIterator<Item = String>) {
        self.report.warnings.extend(warnings);
    }

    /// Finalize builder into immutable report.
    pub fn build(mut self, path_file_out: PathBuf) -> ReportConvert {
        self.report.path_file_out = path_file_out;
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_convert_counts_and_format() {
        let mut builder = ReportConvertBuilder::default();
        builder.add_scanned(3);
        builder.add_missing();
        builder.add_sheet(SpecSheetWriteSummary {
            sheet_name: "A".to_string(),
            n_rows: 4,
            n_cells_written: 7,
            ..Default::default()
        });
        builder.add_sheet(SpecSheetWriteSummary {
            sheet_name: "B".to_string(),
            ..Default::default()
        });
        builder.extend_warnings(vec!["w".to_string()]);
        let report = builder.build(PathBuf::from("out/workbook.xlsx"));

        assert_eq!(report.cnt_scanned, 3);
        assert_eq!(report.cnt_written, 2);
        assert_eq!(report.cnt_missing, 1);
        assert_eq!(report.cnt_rows, 4);
        assert_eq!(report.cnt_cells, 7);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.path_file_out, PathBuf::from("out/workbook.xlsx"));

        assert_eq!(
            report.to_string(),
            "[CONVERT] scanned=3 written=2 missing=1 rows=4 cells=7 warnings=1"
        );
        assert_eq!(report.sheets.len(), 2);
    }
}
