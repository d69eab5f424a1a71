//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::access::AccessError;
use crate::device::DeviceDataError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Malformed hex input
    InvalidData,
    /// I/O error (stdout)
    IoError,
    /// Device could not be opened
    DeviceError,
    /// Register engine rejected the operation
    DataError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PRODDATA_CLI_CONFIG_ERROR",
            Self::InvalidData => "PRODDATA_CLI_INVALID_DATA",
            Self::IoError => "PRODDATA_CLI_IO_ERROR",
            Self::DeviceError => "PRODDATA_CLI_DEVICE_ERROR",
            Self::DataError => "PRODDATA_CLI_DATA_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Invalid hex input
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidData, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<AccessError> for CliError {
    fn from(e: AccessError) -> Self {
        Self::new(CliErrorCode::DeviceError, e.to_string())
    }
}

impl From<DeviceDataError> for CliError {
    fn from(e: DeviceDataError) -> Self {
        Self::new(CliErrorCode::DataError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
