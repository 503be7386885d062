//! Conversion run: scan the input directory, tokenize every sheet dump, map
//! it into one workbook, and save that workbook once.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use sheetpack_io_fs::{SpecSheetSource, scan_sheet_sources};
use sheetpack_io_sep::tokenizer::log_dropped_fragment;
use sheetpack_io_sep::{SepReadError, TypeGrid, try_parse};
use sheetpack_io_xlsx::{XlsxWriter, derive_unique_sheet_name, sanitize_sheet_name};

use crate::conf::C_SHEET_NAME_REPLACE_TO;
use crate::report::{ReportConvert, ReportConvertBuilder};
use crate::spec::{ConvertError, SpecConvertOptions};

/// Convert every sheet dump in `dir_input` into one workbook at `path_file_out`.
///
/// Sources are processed one at a time in file name order. A source that
/// cannot be opened becomes an empty sheet and is counted as missing. Scan
/// failures and workbook errors abort the run; in that case nothing is saved.
pub fn convert_directory<P, Q>(
    dir_input: P,
    path_file_out: Q,
    options: &SpecConvertOptions,
) -> Result<ReportConvert, ConvertError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_out = path_file_out.as_ref().to_path_buf();
    let report_scan = scan_sheet_sources(dir_input.as_ref(), &options.scan_options)?;
    log::debug!("{report_scan}");

    let mut builder = ReportConvertBuilder::default();
    builder.add_scanned(report_scan.source_count());
    builder.extend_warnings(report_scan.warnings);

    let mut writer = match &options.path_template {
        Some(path_template) => {
            XlsxWriter::from_template(path_template, options.write_options.clone())?
        }
        None => XlsxWriter::new(options.write_options.clone())?,
    };

    let mut set_sheet_keys_taken = BTreeSet::new();
    for source in &report_scan.sources {
        let c_sheet_name_base = derive_sheet_name(&source.name_file, options.if_strip_extension);
        let c_sheet_name = derive_unique_sheet_name(&c_sheet_name_base, &mut set_sheet_keys_taken);
        if c_sheet_name != c_sheet_name_base {
            builder.add_warning(format!(
                "Sheet name {c_sheet_name_base:?} already used; {} written as {c_sheet_name:?}",
                source.path_file.display()
            ));
        }

        let grid = read_sheet_grid(source, &mut builder);
        let summary = writer.write_sheet(&c_sheet_name, &grid)?;
        log::debug!(
            "{} -> {:?}: rows={} cells={}",
            source.name_file,
            summary.sheet_name,
            summary.n_rows,
            summary.n_cells_written
        );
        builder.add_sheet(summary);
    }

    if let Some(path_dir_out) = path_file_out.parent()
        && !path_dir_out.as_os_str().is_empty()
    {
        fs::create_dir_all(path_dir_out).map_err(|source| ConvertError::OutputInitFailed {
            path: path_dir_out.to_path_buf(),
            source,
        })?;
    }
    writer.finalize(&path_file_out)?;

    let report = builder.build(path_file_out);
    log::info!("{report}");
    Ok(report)
}

/// Sheet name for an input file name: optional stem, then Excel sanitizing.
pub fn derive_sheet_name(name_file: &str, if_strip_extension: bool) -> String {
    let c_name = if if_strip_extension {
        Path::new(name_file)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| name_file.to_string())
    } else {
        name_file.to_string()
    };
    sanitize_sheet_name(&c_name, C_SHEET_NAME_REPLACE_TO)
}

fn read_sheet_grid(source: &SpecSheetSource, builder: &mut ReportConvertBuilder) -> TypeGrid {
    match try_parse(&source.path_file) {
        Ok(outcome) => {
            if let Some(fragment) = &outcome.fragment_dropped {
                log_dropped_fragment(&source.path_file, fragment);
                builder.extend_warnings([format!(
                    "{}: dropped {} trailing bytes without record separator",
                    source.path_file.display(),
                    fragment.n_bytes
                )]);
            }
            outcome.grid
        }
        Err(SepReadError::OpenFailed { path, .. }) => {
            builder.add_missing();
            builder.add_warning(format!("no file {}", path.display()));
            TypeGrid::new()
        }
        Err(SepReadError::ReadFailed {
            path,
            source,
            grid_partial,
        }) => {
            builder.add_warning(format!(
                "failed to read {} after {} records: {source}",
                path.display(),
                grid_partial.len()
            ));
            grid_partial
        }
    }
}

/// Output workbook path for an output directory and file name.
pub fn derive_path_file_out(dir_output: &Path, name_file_out: &str) -> PathBuf {
    dir_output.join(name_file_out)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use calamine::{Data, Reader, Xlsx, open_workbook};
    use sheetpack_io_xlsx::SpecXlsxWriteOptions;

    use super::*;

    fn write_bytes(path: &Path, bytes: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, bytes).expect("write bytes");
    }

    type TypeXlsxFile = Xlsx<std::io::BufReader<std::fs::File>>;

    fn cell_text(xlsx: &mut TypeXlsxFile, sheet: &str, at: (u32, u32)) -> Option<String> {
        let range = xlsx.worksheet_range(sheet).expect("sheet range");
        match range.get_value(at) {
            Some(Data::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    #[test]
    fn convert_directory_end_to_end() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_in = tmp.path().join("in");
        write_bytes(&dir_in.join("Alpha"), b"a\x1db\x0cc\x1dd\x0c");
        write_bytes(&dir_in.join("Beta"), b"\x1db\x0ctrailing");
        write_bytes(&dir_in.join(".skip"), b"x\x0c");
        let path_out = tmp.path().join("out/nested/book.xlsx");

        let report =
            convert_directory(&dir_in, &path_out, &SpecConvertOptions::default()).expect("convert");

        assert_eq!(report.cnt_scanned, 2);
        assert_eq!(report.cnt_written, 2);
        assert_eq!(report.cnt_missing, 0);
        assert_eq!(report.cnt_rows, 3);
        assert_eq!(report.cnt_cells, 5);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.path_file_out, path_out);

        let mut xlsx: Xlsx<_> = open_workbook(&path_out).expect("open output");
        assert_eq!(xlsx.sheet_names(), vec!["Alpha", "Beta"]);
        assert_eq!(cell_text(&mut xlsx, "Alpha", (0, 0)).as_deref(), Some("a"));
        assert_eq!(cell_text(&mut xlsx, "Alpha", (1, 1)).as_deref(), Some("d"));
        assert_eq!(cell_text(&mut xlsx, "Beta", (0, 0)), None);
        assert_eq!(cell_text(&mut xlsx, "Beta", (0, 1)).as_deref(), Some("b"));
    }

    #[test]
    fn convert_directory_missing_input_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_out = tmp.path().join("book.xlsx");

        let err = convert_directory(
            tmp.path().join("absent"),
            &path_out,
            &SpecConvertOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ConvertError::Scan(_)));
        assert!(!path_out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn convert_directory_dangling_symlink_becomes_empty_sheet() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_in = tmp.path().join("in");
        write_bytes(&dir_in.join("Real"), b"v\x0c");
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), dir_in.join("Gone"))
            .expect("symlink");
        let path_out = tmp.path().join("book.xlsx");

        let report =
            convert_directory(&dir_in, &path_out, &SpecConvertOptions::default()).expect("convert");

        assert_eq!(report.cnt_missing, 1);
        assert_eq!(report.cnt_written, 2);
        assert!(report.warnings.iter().any(|w| w.starts_with("no file")));

        let xlsx: Xlsx<_> = open_workbook(&path_out).expect("open output");
        assert_eq!(xlsx.sheet_names(), vec!["Gone", "Real"]);
    }

    #[test]
    fn convert_directory_dedupes_sanitized_names() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_in = tmp.path().join("in");
        write_bytes(&dir_in.join("a:b"), b"1\x0c");
        write_bytes(&dir_in.join("a_b"), b"2\x0c");
        let path_out = tmp.path().join("book.xlsx");

        let report =
            convert_directory(&dir_in, &path_out, &SpecConvertOptions::default()).expect("convert");

        let l_names: Vec<_> = report.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(l_names, vec!["a_b", "a_b__2"]);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn convert_directory_with_template_and_options() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_template = tmp.path().join("template.xlsx");
        let mut seed = XlsxWriter::new(SpecXlsxWriteOptions::default()).unwrap();
        seed.write_sheet("Cover", &vec![vec![b"title".to_vec()]]).unwrap();
        seed.finalize(&path_template).unwrap();

        let dir_in = tmp.path().join("in");
        write_bytes(&dir_in.join("data.txt"), b"x\x1d\x1dz\x0c");
        let path_out = tmp.path().join("book.xlsx");

        let options = SpecConvertOptions {
            path_template: Some(path_template),
            if_strip_extension: true,
            write_options: SpecXlsxWriteOptions {
                if_hide_rows_by_default: true,
                ..Default::default()
            },
            ..Default::default()
        };
        convert_directory(&dir_in, &path_out, &options).expect("convert");

        let mut xlsx: Xlsx<_> = open_workbook(&path_out).expect("open output");
        assert_eq!(xlsx.sheet_names(), vec!["Cover", "data"]);
        assert_eq!(cell_text(&mut xlsx, "Cover", (0, 0)).as_deref(), Some("title"));
        assert_eq!(cell_text(&mut xlsx, "data", (0, 2)).as_deref(), Some("z"));
    }

    #[test]
    fn derive_sheet_name_strips_and_sanitizes() {
        assert_eq!(derive_sheet_name("report.dat", false), "report.dat");
        assert_eq!(derive_sheet_name("report.dat", true), "report");
        assert_eq!(derive_sheet_name("q1/q2?", false), "q1_q2_");
        assert_eq!(derive_sheet_name(".dat", true), ".dat");
    }
}
