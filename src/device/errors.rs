//! Device data error types
//!
//! Error codes:
//! - PRODDATA_UNKNOWN_VERSION (ERROR severity)
//! - PRODDATA_UNKNOWN_FIELD (ERROR severity)
//! - PRODDATA_DATA_SIZE_ERROR (ERROR severity)
//! - PRODDATA_FIELD_SIZE_MISMATCH (ERROR severity)
//! - PRODDATA_CORRUPT_DATA (FATAL severity) - stored data can't be trusted
//! - PRODDATA_IMMUTABLE_FIELD (ERROR severity)
//! - PRODDATA_INTERNAL_ERROR (ERROR severity)
//! - PRODDATA_ACCESS_ERROR (ERROR severity)
//!
//! No error is retried or downgraded. Every one aborts the operation.

use std::fmt;

use crate::access::AccessError;
use crate::layout::LayoutError;

/// Severity levels for device data errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller misuse or a failed access; the medium is intact
    Error,
    /// Stored data failed its integrity check
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Distinguishable error kinds of the register engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceDataErrorCode {
    /// Version byte matches no known layout
    UnknownVersion,
    /// Field name is not in any resolved layout
    UnknownField,
    /// Buffer length does not match the register extent
    DataSizeError,
    /// Field value has the wrong length
    FieldSizeMismatch,
    /// Checksum verification failed
    CorruptData,
    /// Field is derived data and can't be written
    ImmutableField,
    /// Internal consistency check failed
    InternalError,
    /// Storage collaborator failed
    AccessError,
}

impl DeviceDataErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DeviceDataErrorCode::UnknownVersion => "PRODDATA_UNKNOWN_VERSION",
            DeviceDataErrorCode::UnknownField => "PRODDATA_UNKNOWN_FIELD",
            DeviceDataErrorCode::DataSizeError => "PRODDATA_DATA_SIZE_ERROR",
            DeviceDataErrorCode::FieldSizeMismatch => "PRODDATA_FIELD_SIZE_MISMATCH",
            DeviceDataErrorCode::CorruptData => "PRODDATA_CORRUPT_DATA",
            DeviceDataErrorCode::ImmutableField => "PRODDATA_IMMUTABLE_FIELD",
            DeviceDataErrorCode::InternalError => "PRODDATA_INTERNAL_ERROR",
            DeviceDataErrorCode::AccessError => "PRODDATA_ACCESS_ERROR",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            DeviceDataErrorCode::CorruptData => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DeviceDataErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Register engine error with context
#[derive(Debug)]
pub struct DeviceDataError {
    /// Error code
    code: DeviceDataErrorCode,
    /// Human-readable message
    message: String,
    /// Optional details about the error context
    details: Option<String>,
    /// Underlying access error if applicable
    source: Option<AccessError>,
}

impl DeviceDataError {
    fn new(code: DeviceDataErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_version(register: impl fmt::Display, version: u8) -> Self {
        Self::new(DeviceDataErrorCode::UnknownVersion, "No valid reg version")
            .with_details(format!("{}: {}", register, version))
    }

    pub fn unknown_field(name: &str) -> Self {
        Self::new(
            DeviceDataErrorCode::UnknownField,
            format!("Invalid data field: {}", name),
        )
    }

    /// Buffer length differs from what the resolved layouts require
    pub fn data_size(expected: usize, actual: usize) -> Self {
        Self::new(DeviceDataErrorCode::DataSizeError, "Data size error")
            .with_details(format!("expected: {}, actual: {}", expected, actual))
    }

    /// Buffer too short to hold a byte at `position`
    pub fn data_too_short(position: usize, actual: usize) -> Self {
        Self::new(DeviceDataErrorCode::DataSizeError, "Data size error")
            .with_details(format!("needs byte {}, actual length: {}", position, actual))
    }

    pub fn field_size(name: &str, expected: usize, actual: usize) -> Self {
        Self::new(DeviceDataErrorCode::FieldSizeMismatch, "Invalid field size").with_details(
            format!("field: {}, expected: {}, actual: {}", name, expected, actual),
        )
    }

    /// Checksum mismatch (FATAL)
    pub fn corrupt_data(stored: u16, computed: u16) -> Self {
        Self::new(DeviceDataErrorCode::CorruptData, "Data corrupted: checksum failed")
            .with_details(format!(
                "stored: {:#06x}, computed: {:#06x}",
                stored, computed
            ))
    }

    pub fn immutable_field(name: &str) -> Self {
        Self::new(
            DeviceDataErrorCode::ImmutableField,
            format!("Cannot modify {}", name),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(DeviceDataErrorCode::InternalError, message)
    }

    /// Adds the register the failure concerns
    pub fn in_register(self, register: impl fmt::Display) -> Self {
        let details = match self.details {
            Some(ref details) => format!("{}, register: {}", details, register),
            None => format!("register: {}", register),
        };
        Self {
            details: Some(details),
            ..self
        }
    }

    /// Returns the error code
    pub fn code(&self) -> DeviceDataErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether the stored data itself is damaged
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for DeviceDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for DeviceDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<AccessError> for DeviceDataError {
    fn from(e: AccessError) -> Self {
        Self {
            code: DeviceDataErrorCode::AccessError,
            message: e.to_string(),
            details: None,
            source: Some(e),
        }
    }
}

impl From<LayoutError> for DeviceDataError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::UnknownVersion { register, version } => {
                Self::unknown_version(register, version)
            }
            LayoutError::UnknownField(name) => Self::unknown_field(&name),
        }
    }
}

/// Result type for register engine operations
pub type DeviceResult<T> = Result<T, DeviceDataError>;
