//! `sheetpack_io_sep` v1:
//! Byte-level tokenizer for control-byte separated sheet dumps.
//!
//! Module layout:
//! - `conf`      : reserved separator bytes and buffer sizes
//! - `spec`      : grid type aliases, outcome models and errors
//! - `tokenizer` : single-state tokenizer and file/reader entry points
pub mod conf;
pub mod spec;
pub mod tokenizer;

pub use conf::{BYTE_FIELD_SEP, BYTE_RECORD_SEP};
pub use spec::{
    SepReadError, SpecDroppedFragment, SpecTokenizeOutcome, TypeField, TypeGrid, TypeRow,
};
pub use tokenizer::{SepTokenizer, parse, parse_bytes, parse_reader, try_parse};
