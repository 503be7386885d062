//! Command-line surface: `sheetpack <INPUT_DIR> <OUTPUT_DIR> [options]`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use sheetpack_io_fs::{EnumScanPatternMode, SpecScanOptions};
use sheetpack_io_xlsx::{EnumAutofitColumnsRule, SpecAutofitCellsPolicy, SpecXlsxWriteOptions};
use sheetpack_log::EnumLogLevel;

use crate::conf::{C_FILE_NAME_OUT_DEFAULT, N_EXIT_CODE_FAILURE};
use crate::convert::{convert_directory, derive_path_file_out};
use crate::spec::SpecConvertOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EnumPatternModeArg {
    Glob,
    Regex,
    Literal,
}

impl From<EnumPatternModeArg> for EnumScanPatternMode {
    fn from(value: EnumPatternModeArg) -> Self {
        match value {
            EnumPatternModeArg::Glob => Self::Glob,
            EnumPatternModeArg::Regex => Self::Regex,
            EnumPatternModeArg::Literal => Self::Literal,
        }
    }
}

/// Pack every sheet dump in a directory into one XLSX workbook.
///
/// Each regular file under INPUT_DIR becomes a sheet named after the file.
/// Fields are separated by 0x1D and records by 0x0C.
#[derive(Parser, Debug)]
#[command(name = "sheetpack", version)]
pub struct Args {
    /// Directory holding one sheet dump per file.
    pub dir_input: PathBuf,

    /// Directory receiving the workbook (created if absent).
    pub dir_output: PathBuf,

    /// Output workbook file name inside OUTPUT_DIR.
    #[arg(long = "file-name", value_name = "NAME", default_value = C_FILE_NAME_OUT_DEFAULT)]
    pub file_name: String,

    /// Seed the workbook with the sheets of an existing workbook.
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Only convert files whose name matches (repeatable).
    #[arg(long = "include", value_name = "PATTERN")]
    pub patterns_include: Vec<String>,

    /// Skip files whose name matches (repeatable).
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub patterns_exclude: Vec<String>,

    /// How `--include`/`--exclude` patterns are interpreted.
    #[arg(long = "pattern-mode", value_enum, default_value_t = EnumPatternModeArg::Glob)]
    pub pattern_mode: EnumPatternModeArg,

    /// Name sheets after the file stem instead of the full file name.
    #[arg(long = "strip-extension")]
    pub if_strip_extension: bool,

    /// Start every new sheet with all rows hidden; rows with data are shown.
    #[arg(long = "hide-rows-by-default")]
    pub if_hide_rows_by_default: bool,

    /// Text encoding of field bytes (WHATWG label, default UTF-8).
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Set column widths from the longest cell text.
    #[arg(long = "autofit")]
    pub if_autofit: bool,

    /// More output (-v per-sheet progress, -vv internals).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log preset selected by `-v`/`-q`.
    pub fn log_level(&self) -> EnumLogLevel {
        EnumLogLevel::from_verbosity(self.verbose, self.quiet)
    }

    /// Path of the workbook written by this run.
    pub fn path_file_out(&self) -> PathBuf {
        derive_path_file_out(&self.dir_output, &self.file_name)
    }

    /// Run options for `convert_directory`.
    pub fn to_convert_options(&self) -> SpecConvertOptions {
        let to_patterns =
            |l_patterns: &[String]| (!l_patterns.is_empty()).then(|| l_patterns.to_vec());
        let rule_columns = if self.if_autofit {
            EnumAutofitColumnsRule::Body
        } else {
            EnumAutofitColumnsRule::None
        };

        SpecConvertOptions {
            scan_options: SpecScanOptions {
                patterns_include_files: to_patterns(&self.patterns_include),
                patterns_exclude_files: to_patterns(&self.patterns_exclude),
                rule_pattern: self.pattern_mode.into(),
                ..SpecScanOptions::default()
            },
            write_options: SpecXlsxWriteOptions {
                if_hide_rows_by_default: self.if_hide_rows_by_default,
                encoding_label: self.encoding.clone(),
                policy_autofit: SpecAutofitCellsPolicy {
                    rule_columns,
                    ..SpecAutofitCellsPolicy::default()
                },
            },
            path_template: self.template.clone(),
            if_strip_extension: self.if_strip_extension,
        }
    }
}

/// Execute one run and return the process exit code.
pub fn run(args: &Args) -> i32 {
    let path_file_out = args.path_file_out();
    match convert_directory(&args.dir_input, &path_file_out, &args.to_convert_options()) {
        Ok(report) => {
            log::debug!("output: {}", report.path_file_out.display());
            0
        }
        Err(e) => {
            log::error!("{e}");
            N_EXIT_CODE_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn args_defaults_map_to_default_options() {
        let args = Args::try_parse_from(["sheetpack", "in", "out"]).expect("parse");

        assert_eq!(args.path_file_out(), PathBuf::from("out").join("workbook.xlsx"));
        assert_eq!(args.log_level(), EnumLogLevel::Normal);

        let options = args.to_convert_options();
        assert_eq!(options.scan_options.patterns_include_files, None);
        assert_eq!(options.scan_options.rule_pattern, EnumScanPatternMode::Glob);
        assert!(options.scan_options.if_skip_hidden);
        assert_eq!(options.write_options, SpecXlsxWriteOptions::default());
        assert_eq!(options.path_template, None);
        assert!(!options.if_strip_extension);
    }

    #[test]
    fn args_options_map_through() {
        let args = Args::try_parse_from([
            "sheetpack",
            "in",
            "out",
            "--file-name",
            "book.xlsx",
            "--template",
            "tpl.xlsx",
            "--include",
            "^S",
            "--include",
            "^T",
            "--exclude",
            "tmp",
            "--pattern-mode",
            "regex",
            "--strip-extension",
            "--hide-rows-by-default",
            "--encoding",
            "windows-1252",
            "--autofit",
            "-vv",
        ])
        .expect("parse");

        assert_eq!(args.log_level(), EnumLogLevel::Trace);
        assert_eq!(args.path_file_out(), PathBuf::from("out").join("book.xlsx"));

        let options = args.to_convert_options();
        assert_eq!(
            options.scan_options.patterns_include_files,
            Some(vec!["^S".to_string(), "^T".to_string()])
        );
        assert_eq!(
            options.scan_options.patterns_exclude_files,
            Some(vec!["tmp".to_string()])
        );
        assert_eq!(options.scan_options.rule_pattern, EnumScanPatternMode::Regex);
        assert!(options.write_options.if_hide_rows_by_default);
        assert_eq!(
            options.write_options.encoding_label.as_deref(),
            Some("windows-1252")
        );
        assert_eq!(
            options.write_options.policy_autofit.rule_columns,
            EnumAutofitColumnsRule::Body
        );
        assert_eq!(options.path_template, Some(PathBuf::from("tpl.xlsx")));
        assert!(options.if_strip_extension);
    }

    #[test]
    fn args_require_both_directories() {
        assert!(Args::try_parse_from(["sheetpack"]).is_err());
        assert!(Args::try_parse_from(["sheetpack", "in"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["sheetpack", "in", "out", "-q", "-v"]).is_err());
        let args = Args::try_parse_from(["sheetpack", "in", "out", "-q"]).expect("parse");
        assert_eq!(args.log_level(), EnumLogLevel::Quiet);
    }

    #[test]
    fn run_returns_failure_for_missing_input() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_input = tmp.path().join("absent");
        let dir_output = tmp.path().join("out");
        let args = Args::try_parse_from([
            OsStr::new("sheetpack"),
            dir_input.as_os_str(),
            dir_output.as_os_str(),
        ])
        .expect("parse");

        assert_eq!(run(&args), N_EXIT_CODE_FAILURE);
        assert!(!dir_output.exists());
    }
}
