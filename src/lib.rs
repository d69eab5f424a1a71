//! proddata - versioned production data in OTP registers
//!
//! Two fixed registers hold factory calibration data. Each register starts
//! with a CRC-16 checksum followed by a version byte that selects the
//! register's field layout.

pub mod access;
pub mod cli;
pub mod device;
pub mod layout;
pub mod observability;
