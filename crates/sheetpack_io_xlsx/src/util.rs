//! Stateless helper utilities used by the workbook model and writer.

use std::collections::BTreeSet;

use crate::conf::{
    C_EXCEL_RESERVED_SHEET_NAME, N_LEN_EXCEL_SHEET_NAME_MAX, N_WIDTH_EXCEL_COLUMN_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SpecAutofitCellsPolicy, XlsxWriteError};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect();
    c_name = c_name
        .trim_matches(|chr: char| chr == '\'' || chr.is_whitespace())
        .to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }
    if c_name.eq_ignore_ascii_case(C_EXCEL_RESERVED_SHEET_NAME) {
        c_name.push('_');
    }

    c_name
}

/// Check `name` against Excel sheet naming rules without modifying it.
pub fn validate_sheet_name(name: &str) -> Result<(), XlsxWriteError> {
    let reject = |reason: &str| {
        Err(XlsxWriteError::InvalidSheetName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name is empty");
    }
    if name.chars().count() > N_LEN_EXCEL_SHEET_NAME_MAX {
        return reject("name is longer than 31 characters");
    }
    if let Some(c_illegal) = TUP_EXCEL_ILLEGAL.iter().find(|c| name.contains(**c)) {
        return reject(&format!("name contains {c_illegal:?}"));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return reject("name starts or ends with an apostrophe");
    }
    if name.eq_ignore_ascii_case(C_EXCEL_RESERVED_SHEET_NAME) {
        return reject("name is reserved by Excel");
    }
    Ok(())
}

/// Case-insensitive lookup key; Excel treats `Data` and `data` as one sheet.
pub(crate) fn derive_sheet_key(name: &str) -> String {
    name.to_lowercase()
}

/// Return `name`, or `name__N` when a sheet with that name was already taken.
///
/// `set_sheet_keys_taken` holds lowercase keys and is updated with the result.
pub fn derive_unique_sheet_name(name: &str, set_sheet_keys_taken: &mut BTreeSet<String>) -> String {
    if set_sheet_keys_taken.insert(derive_sheet_key(name)) {
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if set_sheet_keys_taken.insert(derive_sheet_key(&candidate)) {
            return candidate;
        }
        n_idx += 1;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Estimate displayed width units for one text cell.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Clamp a recorded text width to the policy bounds.
pub fn calculate_column_width(n_width_recorded: usize, policy: &SpecAutofitCellsPolicy) -> usize {
    let n_min = usize::max(1, policy.width_cell_min);
    let n_max = usize::min(
        N_WIDTH_EXCEL_COLUMN_MAX,
        usize::max(n_min, policy.width_cell_max),
    );
    usize::min(
        n_max,
        usize::max(n_min, n_width_recorded + policy.width_cell_padding),
    )
}

pub(crate) fn validate_policy_autofit(
    policy_autofit: &SpecAutofitCellsPolicy,
) -> Result<(), XlsxWriteError> {
    if policy_autofit.width_cell_min == 0 {
        return Err(XlsxWriteError::InvalidAutofitPolicy(
            "width_cell_min must be >= 1.".to_string(),
        ));
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(XlsxWriteError::InvalidAutofitPolicy(
            "width_cell_max must be >= width_cell_min.".to_string(),
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

/// Convert a 1-based model row to a 0-based `rust_xlsxwriter` row.
pub(crate) fn cast_row_num(value: usize) -> Result<u32, String> {
    value
        .checked_sub(1)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| format!("row index overflow: {value}"))
}

/// Convert a 1-based model column to a 0-based `rust_xlsxwriter` column.
pub(crate) fn cast_col_num(value: usize) -> Result<u16, String> {
    value
        .checked_sub(1)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| format!("column index overflow: {value}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
