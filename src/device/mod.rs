//! Device data subsystem for proddata
//!
//! The register engine holds the only path to production data in OTP.
//!
//! # Design Principles
//!
//! - Versions re-resolved from storage on every call (no caching)
//! - Checksum-verified on every register read
//! - Fresh checksum on every register write
//! - Exact size checks before any write; no partial updates
//! - Corruption is surfaced as its own FATAL error kind
//!
//! Register0 and register1 are written separately. A crash between the two
//! writes of a whole-dataset write leaves one register updated and the other
//! stale.

pub mod checksum;
pub mod splice;

mod engine;
mod errors;

pub use engine::{is_immutable_field, DeviceData, SERIAL_FIELD};
pub use errors::{DeviceDataError, DeviceDataErrorCode, DeviceResult, Severity};
