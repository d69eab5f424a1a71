//! # Access Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage access
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors raised by a `FlashAccess` implementation.
///
/// The engine propagates these unchanged; retries, if any, belong here.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Can't open device {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("Read of {size} bytes at offset {offset} failed: {source}")]
    Read {
        size: usize,
        offset: usize,
        source: io::Error,
    },

    #[error("Write of {size} bytes at offset {offset} failed: {source}")]
    Write {
        size: usize,
        offset: usize,
        source: io::Error,
    },

    #[error("Access of {size} bytes at offset {offset} exceeds medium size {capacity}")]
    OutOfRange {
        size: usize,
        offset: usize,
        capacity: usize,
    },

    #[error("Serial number not available: {0}")]
    SerialUnavailable(String),
}
