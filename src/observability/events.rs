//! Observability events for proddata
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events of the register engine and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Storage device opened
    DeviceOpened,

    // Version resolution
    /// Version bytes read and resolved to layouts
    VersionsResolved,
    /// Version byte matches no known layout
    UnknownVersion,

    // Whole dataset
    /// Whole dataset read begins
    DatasetReadBegin,
    /// Whole dataset read complete
    DatasetReadComplete,
    /// Whole dataset write begins
    DatasetWriteBegin,
    /// One register of the dataset written
    RegisterWritten,
    /// Whole dataset write complete
    DatasetWriteComplete,

    // Single field
    /// Field read complete
    FieldRead,
    /// Serial number read
    SerialRead,
    /// Field write begins
    FieldWriteBegin,
    /// Field write complete
    FieldWriteComplete,
    /// Write to a derived field rejected
    ImmutableFieldRejected,

    // Integrity
    /// Checksum verification failed (FATAL)
    ChecksumMismatch,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DeviceOpened => "DEVICE_OPENED",

            Event::VersionsResolved => "VERSIONS_RESOLVED",
            Event::UnknownVersion => "UNKNOWN_VERSION",

            Event::DatasetReadBegin => "DATASET_READ_BEGIN",
            Event::DatasetReadComplete => "DATASET_READ_COMPLETE",
            Event::DatasetWriteBegin => "DATASET_WRITE_BEGIN",
            Event::RegisterWritten => "REGISTER_WRITTEN",
            Event::DatasetWriteComplete => "DATASET_WRITE_COMPLETE",

            Event::FieldRead => "FIELD_READ",
            Event::SerialRead => "SERIAL_READ",
            Event::FieldWriteBegin => "FIELD_WRITE_BEGIN",
            Event::FieldWriteComplete => "FIELD_WRITE_COMPLETE",
            Event::ImmutableFieldRejected => "IMMUTABLE_FIELD_REJECTED",

            Event::ChecksumMismatch => "CHECKSUM_MISMATCH",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ChecksumMismatch)
    }

    /// Returns true if this event reports a rejected operation
    pub fn is_error(&self) -> bool {
        matches!(self, Event::UnknownVersion | Event::ImmutableFieldRejected)
    }

    /// Returns true for per-step detail below INFO
    pub fn is_trace(&self) -> bool {
        matches!(self, Event::VersionsResolved | Event::RegisterWritten)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
