//! # Layout Errors

use thiserror::Error;

use super::field::Register;

/// Result type for layout lookups
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Layout resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Version byte does not match any known layout of the register
    #[error("No valid version for {register}: {version}")]
    UnknownVersion { register: Register, version: u8 },

    /// Field name is not part of any resolved layout
    #[error("Invalid data field: {0}")]
    UnknownField(String),
}
