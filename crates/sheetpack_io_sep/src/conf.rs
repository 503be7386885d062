//! Reserved bytes and I/O sizing constants.

/// Field separator (ASCII group separator).
pub const BYTE_FIELD_SEP: u8 = 0x1D;
/// Record separator (ASCII form feed).
pub const BYTE_RECORD_SEP: u8 = 0x0C;

/// Read buffer capacity used by file/reader entry points.
pub const N_BYTES_READ_BUFFER: usize = 64 * 1024;
