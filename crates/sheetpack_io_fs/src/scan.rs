//! Input directory listing and sheet source planning.

use std::fs;
use std::path::Path;

use crate::report::{ReportScan, SpecSheetSource};
use crate::spec::{ScanError, SpecScanOptions};
use crate::util::SpecScanPatterns;

/// List the sheet dump files directly under `dir_input`.
///
/// Only the top level is listed. Each kept entry becomes one sheet, in file
/// name order. Hidden entries (leading `.`), directories, special files and
/// names rejected by the include/exclude patterns are skipped and counted.
///
/// Returns [`ScanError`] when the patterns are invalid or the directory
/// itself cannot be listed; problems with single entries are warnings.
pub fn scan_sheet_sources<P: AsRef<Path>>(
    dir_input: P,
    spec_scan_options: &SpecScanOptions,
) -> Result<ReportScan, ScanError> {
    let path_dir_input = dir_input.as_ref();

    let spec_scan_pats = SpecScanPatterns::from_raw(
        spec_scan_options.patterns_include_files.as_deref(),
        spec_scan_options.patterns_exclude_files.as_deref(),
        spec_scan_options.rule_pattern,
    )?;

    if path_dir_input.exists() && !path_dir_input.is_dir() {
        return Err(ScanError::SourceNotDirectory(path_dir_input.to_path_buf()));
    }

    let iter_entries = fs::read_dir(path_dir_input).map_err(|source| ScanError::ReadDirFailed {
        path: path_dir_input.to_path_buf(),
        source,
    })?;

    let mut report = ReportScan::default();
    for _entry_res in iter_entries {
        report.cnt_scanned += 1;

        let entry = match _entry_res {
            Ok(v) => v,
            Err(e) => {
                report.cnt_skipped += 1;
                report.add_warning(format!(
                    "Failed to read directory entry under {} ({e})",
                    path_dir_input.display()
                ));
                continue;
            }
        };

        let path_entry = entry.path();
        let c_name = entry.file_name().to_string_lossy().to_string();

        if spec_scan_options.if_skip_hidden && c_name.starts_with('.') {
            report.cnt_skipped += 1;
            continue;
        }

        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                report.cnt_skipped += 1;
                report.add_warning(format!("Failed to inspect {} ({e})", path_entry.display()));
                continue;
            }
        };

        let b_is_symlink = cfg_file_type.is_symlink();
        let b_is_dir = cfg_file_type.is_dir() || (b_is_symlink && path_entry.is_dir());
        if b_is_dir {
            report.cnt_skipped += 1;
            report.add_warning(format!("Directory skipped: {}", path_entry.display()));
            continue;
        }
        if !cfg_file_type.is_file() && !b_is_symlink {
            report.cnt_skipped += 1;
            report.add_warning(format!("Special file skipped: {}", path_entry.display()));
            continue;
        }

        if spec_scan_pats.should_exclude(&c_name) {
            report.cnt_skipped += 1;
            log::debug!("Filtered out by patterns: {}", path_entry.display());
            continue;
        }

        report.sources.push(SpecSheetSource {
            path_file: path_entry,
            name_file: c_name,
        });
    }

    report.sources.sort_by(|a, b| a.name_file.cmp(&b.name_file));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::scan_sheet_sources;
    use crate::spec::{EnumScanPatternMode, ScanError, SpecScanOptions};

    fn write_bytes(path: &Path, bytes: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, bytes).expect("write bytes");
    }

    fn names(report: &crate::ReportScan) -> Vec<&str> {
        report
            .sources
            .iter()
            .map(|s| s.name_file.as_str())
            .collect()
    }

    #[test]
    fn scan_lists_files_sorted_and_skips_hidden_and_dirs() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_bytes(&tmp.path().join("b_sheet"), b"x\x0c");
        write_bytes(&tmp.path().join("a_sheet"), b"y\x0c");
        write_bytes(&tmp.path().join(".hidden"), b"z\x0c");
        write_bytes(&tmp.path().join("nested/inner"), b"w\x0c");

        let report = scan_sheet_sources(tmp.path(), &SpecScanOptions::default()).expect("scan");

        assert_eq!(names(&report), vec!["a_sheet", "b_sheet"]);
        assert_eq!(report.cnt_scanned, 4);
        assert_eq!(report.cnt_skipped, 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.sources[0].path_file, tmp.path().join("a_sheet"));
    }

    #[test]
    fn scan_keeps_hidden_when_requested() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_bytes(&tmp.path().join(".hidden"), b"z\x0c");

        let options = SpecScanOptions {
            if_skip_hidden: false,
            ..SpecScanOptions::default()
        };
        let report = scan_sheet_sources(tmp.path(), &options).expect("scan");
        assert_eq!(names(&report), vec![".hidden"]);
    }

    #[test]
    fn scan_applies_include_exclude_patterns() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_bytes(&tmp.path().join("Sheet1"), b"");
        write_bytes(&tmp.path().join("Sheet2"), b"");
        write_bytes(&tmp.path().join("Notes"), b"");

        let options = SpecScanOptions {
            patterns_include_files: Some(vec!["Sheet*".to_string()]),
            patterns_exclude_files: Some(vec!["*2".to_string()]),
            rule_pattern: EnumScanPatternMode::Glob,
            ..SpecScanOptions::default()
        };
        let report = scan_sheet_sources(tmp.path(), &options).expect("scan");
        assert_eq!(names(&report), vec!["Sheet1"]);
        assert_eq!(report.cnt_skipped, 2);
    }

    #[test]
    fn scan_missing_directory_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = scan_sheet_sources(tmp.path().join("absent"), &SpecScanOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::ReadDirFailed { .. }));
    }

    #[test]
    fn scan_file_as_input_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_file = tmp.path().join("Sheet1");
        write_bytes(&path_file, b"");

        let err = scan_sheet_sources(&path_file, &SpecScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::SourceNotDirectory(_)));
    }
}
