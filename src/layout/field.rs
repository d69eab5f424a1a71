//! Register identity and field descriptors

use std::fmt;

use serde::Serialize;

/// Size of the checksum field at the start of every register
pub const CHECKSUM_SIZE: usize = 2;

/// Size of the version field that follows the checksum
pub const VERSION_SIZE: usize = 1;

/// Size and position of a named field.
///
/// `offset` is absolute from the start of the storage medium, not from the
/// start of the owning register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataField {
    pub size: usize,
    pub offset: usize,
}

impl DataField {
    pub const fn new(size: usize, offset: usize) -> Self {
        Self { size, offset }
    }

    /// One past the last byte of the field
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// The two physical registers holding production data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    /// MAC addresses
    Register0,
    /// Radio calibration (DCXO trim, power detector)
    Register1,
}

impl Register {
    /// Both registers in storage order
    pub const ALL: [Register; 2] = [Register::Register0, Register::Register1];

    /// Position of the register in `ALL`
    pub fn index(self) -> usize {
        match self {
            Register::Register0 => 0,
            Register::Register1 => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::Register0 => "register0",
            Register::Register1 => "register1",
        }
    }

    /// Name of the checksum field in every layout of this register
    pub fn checksum_field(self) -> &'static str {
        match self {
            Register::Register0 => "CRC_REG0",
            Register::Register1 => "CRC_REG1",
        }
    }

    /// Name of the version field in every layout of this register
    pub fn version_field(self) -> &'static str {
        match self {
            Register::Register0 => "VERSION_REG0",
            Register::Register1 => "VERSION_REG1",
        }
    }

    /// Absolute storage offset of the version byte.
    ///
    /// Known before any layout is resolved, since the layout depends on it.
    pub fn version_offset(self) -> usize {
        match self {
            Register::Register0 => 2,
            Register::Register1 => 258,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
