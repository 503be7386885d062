//! Single-state tokenizer for `0x1D`/`0x0C` separated sheet dumps.
//!
//! The machine has one state (inside a field). Only the two reserved bytes
//! drive transitions; every other byte is copied into the current field.
//! When the stream ends, a field/row that was never closed by a record
//! separator is dropped and reported through [`SpecDroppedFragment`].

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::conf::{BYTE_FIELD_SEP, BYTE_RECORD_SEP, N_BYTES_READ_BUFFER};
use crate::spec::{
    SepReadError, SpecDroppedFragment, SpecTokenizeOutcome, TypeField, TypeGrid, TypeRow,
};

////////////////////////////////////////////////////////////////////////////////
// #region StateMachine

/// Incremental tokenizer. Chunk boundaries passed to [`Self::feed`] never
/// change the result.
#[derive(Debug, Default)]
pub struct SepTokenizer {
    buf_field: TypeField,
    buf_row: TypeRow,
    grid: TypeGrid,
    n_bytes_read: u64,
}

impl SepTokenizer {
    /// Create an empty tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk of input.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.n_bytes_read += chunk.len() as u64;

        let mut n_idx_start = 0;
        for (n_idx, byte) in chunk.iter().enumerate() {
            match *byte {
                BYTE_FIELD_SEP => {
                    self.buf_field.extend_from_slice(&chunk[n_idx_start..n_idx]);
                    self.close_field();
                    n_idx_start = n_idx + 1;
                }
                BYTE_RECORD_SEP => {
                    self.buf_field.extend_from_slice(&chunk[n_idx_start..n_idx]);
                    self.close_field();
                    self.grid.push(std::mem::take(&mut self.buf_row));
                    n_idx_start = n_idx + 1;
                }
                _ => {}
            }
        }
        self.buf_field.extend_from_slice(&chunk[n_idx_start..]);
    }

    /// End of stream: return completed records and drop unterminated data.
    pub fn finish(self) -> SpecTokenizeOutcome {
        let fragment_dropped = if self.buf_field.is_empty() && self.buf_row.is_empty() {
            None
        } else {
            Some(SpecDroppedFragment {
                n_fields_pending: self.buf_row.len(),
                n_bytes: self.buf_field.len() + self.buf_row.iter().map(Vec::len).sum::<usize>(),
            })
        };

        SpecTokenizeOutcome {
            grid: self.grid,
            fragment_dropped,
            n_bytes_read: self.n_bytes_read,
        }
    }

    fn close_field(&mut self) {
        self.buf_row.push(std::mem::take(&mut self.buf_field));
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EntryPoints

/// Tokenize an in-memory byte slice.
pub fn parse_bytes(bytes: &[u8]) -> TypeGrid {
    let mut tokenizer = SepTokenizer::new();
    tokenizer.feed(bytes);
    tokenizer.finish().grid
}

/// Tokenize any reader to completion.
pub fn parse_reader<R: Read>(reader: R) -> Result<SpecTokenizeOutcome, SepReadError> {
    tokenize_reader(reader, Path::new(""))
}

/// Tokenize the file at `path`, returning open/read failures as errors.
pub fn try_parse<P: AsRef<Path>>(path: P) -> Result<SpecTokenizeOutcome, SepReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SepReadError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    tokenize_reader(file, path)
}

/// Tokenize the file at `path`.
///
/// A file that cannot be opened yields an empty grid and a `no file` warning.
/// A read failure after opening keeps the records completed before it.
pub fn parse<P: AsRef<Path>>(path: P) -> TypeGrid {
    let path = path.as_ref();
    match try_parse(path) {
        Ok(outcome) => {
            if let Some(fragment) = &outcome.fragment_dropped {
                log_dropped_fragment(path, fragment);
            }
            outcome.grid
        }
        Err(SepReadError::OpenFailed { path, .. }) => {
            log::warn!("no file {}", path.display());
            TypeGrid::new()
        }
        Err(SepReadError::ReadFailed {
            path,
            source,
            grid_partial,
        }) => {
            log::warn!(
                "failed to read {} after {} records: {source}",
                path.display(),
                grid_partial.len()
            );
            grid_partial
        }
    }
}

/// Log the unterminated tail that [`SepTokenizer::finish`] discarded.
pub fn log_dropped_fragment(path: &Path, fragment: &SpecDroppedFragment) {
    log::warn!(
        "{}: dropped unterminated trailing record ({} bytes, {} completed fields)",
        path.display(),
        fragment.n_bytes,
        fragment.n_fields_pending
    );
}

fn tokenize_reader<R: Read>(
    mut reader: R,
    path: &Path,
) -> Result<SpecTokenizeOutcome, SepReadError> {
    let mut tokenizer = SepTokenizer::new();
    let mut buf = vec![0u8; N_BYTES_READ_BUFFER];

    loop {
        let n_read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(SepReadError::ReadFailed {
                    path: PathBuf::from(path),
                    source,
                    grid_partial: tokenizer.finish().grid,
                });
            }
        };
        tokenizer.feed(&buf[..n_read]);
    }

    Ok(tokenizer.finish())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
