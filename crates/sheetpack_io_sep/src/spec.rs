//! Grid models and tokenizer error types.

use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region GridTypes

/// One field as raw bytes. No character set is assumed.
pub type TypeField = Vec<u8>;
/// Ordered fields of one record, left to right.
pub type TypeRow = Vec<TypeField>;
/// Ordered records of one input file.
pub type TypeGrid = Vec<TypeRow>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Outcome

/// Bytes buffered after the last record separator when the stream ended.
///
/// These bytes are not part of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecDroppedFragment {
    /// Completed fields pending in the unterminated row.
    pub n_fields_pending: usize,
    /// Total dropped bytes, separators excluded.
    pub n_bytes: usize,
}

/// Full result of one tokenizer run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecTokenizeOutcome {
    /// Completed records.
    pub grid: TypeGrid,
    /// Unterminated trailing data, if any was buffered at end of stream.
    pub fragment_dropped: Option<SpecDroppedFragment>,
    /// Total bytes consumed from the source.
    pub n_bytes_read: u64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures of the strict tokenizer entry points.
#[derive(Debug, Error)]
pub enum SepReadError {
    /// Source file could not be opened.
    #[error("no file {}: {source}", path.display())]
    OpenFailed {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Reading failed after the source was opened.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        /// Path being read (empty for anonymous readers).
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
        /// Records completed before the failure.
        grid_partial: TypeGrid,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
