//! Per-version field tables and layout resolution
//!
//! Reference configuration (absolute offsets from the start of the medium):
//!
//! | register  | version | fields                                   | size |
//! |-----------|---------|------------------------------------------|------|
//! | register0 | 1       | CRC, VERSION, MAC_0..MAC_5 (6 bytes each) | 39   |
//! | register1 | 0       | CRC, VERSION                             | 3    |
//! | register1 | 1       | + DCXO                                   | 4    |
//! | register1 | 2       | + ten power detector bytes               | 14   |

use serde::Serialize;

use super::errors::{LayoutError, LayoutResult};
use super::field::{DataField, Register, CHECKSUM_SIZE};

type FieldTable = &'static [(&'static str, DataField)];

const REGISTER0_V1: FieldTable = &[
    ("CRC_REG0", DataField::new(2, 0)),
    ("VERSION_REG0", DataField::new(1, 2)),
    ("MAC_0", DataField::new(6, 3)),
    ("MAC_1", DataField::new(6, 9)),
    ("MAC_2", DataField::new(6, 15)),
    ("MAC_3", DataField::new(6, 21)),
    ("MAC_4", DataField::new(6, 27)),
    ("MAC_5", DataField::new(6, 33)),
];

const REGISTER1_V0: FieldTable = &[
    ("CRC_REG1", DataField::new(2, 256)),
    ("VERSION_REG1", DataField::new(1, 258)),
];

const REGISTER1_V1: FieldTable = &[
    ("CRC_REG1", DataField::new(2, 256)),
    ("VERSION_REG1", DataField::new(1, 258)),
    ("DCXO", DataField::new(1, 259)),
];

const REGISTER1_V2: FieldTable = &[
    ("CRC_REG1", DataField::new(2, 256)),
    ("VERSION_REG1", DataField::new(1, 258)),
    ("DCXO", DataField::new(1, 259)),
    ("PD_A1_B24", DataField::new(1, 260)),
    ("PD_A1_B51", DataField::new(1, 261)),
    ("PD_A1_B52", DataField::new(1, 262)),
    ("PD_A1_B53", DataField::new(1, 263)),
    ("PD_A1_B54", DataField::new(1, 264)),
    ("PD_A2_B24", DataField::new(1, 265)),
    ("PD_A2_B51", DataField::new(1, 266)),
    ("PD_A2_B52", DataField::new(1, 267)),
    ("PD_A2_B53", DataField::new(1, 268)),
    ("PD_A2_B54", DataField::new(1, 269)),
];

/// Every supported (register, version) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutVersion {
    Register0V1,
    Register1V0,
    Register1V1,
    Register1V2,
}

impl LayoutVersion {
    /// All supported layouts, grouped by register
    pub const ALL: [LayoutVersion; 4] = [
        LayoutVersion::Register0V1,
        LayoutVersion::Register1V0,
        LayoutVersion::Register1V1,
        LayoutVersion::Register1V2,
    ];

    /// Maps a raw version byte to a layout of the given register
    pub fn from_raw(register: Register, version: u8) -> Option<Self> {
        match (register, version) {
            (Register::Register0, 1) => Some(LayoutVersion::Register0V1),
            (Register::Register1, 0) => Some(LayoutVersion::Register1V0),
            (Register::Register1, 1) => Some(LayoutVersion::Register1V1),
            (Register::Register1, 2) => Some(LayoutVersion::Register1V2),
            _ => None,
        }
    }

    pub fn register(self) -> Register {
        match self {
            LayoutVersion::Register0V1 => Register::Register0,
            LayoutVersion::Register1V0
            | LayoutVersion::Register1V1
            | LayoutVersion::Register1V2 => Register::Register1,
        }
    }

    /// Version byte as stored in the register
    pub fn number(self) -> u8 {
        match self {
            LayoutVersion::Register0V1 => 1,
            LayoutVersion::Register1V0 => 0,
            LayoutVersion::Register1V1 => 1,
            LayoutVersion::Register1V2 => 2,
        }
    }

    fn table(self) -> FieldTable {
        match self {
            LayoutVersion::Register0V1 => REGISTER0_V1,
            LayoutVersion::Register1V0 => REGISTER1_V0,
            LayoutVersion::Register1V1 => REGISTER1_V1,
            LayoutVersion::Register1V2 => REGISTER1_V2,
        }
    }
}

/// Resolves the layout in effect for `version` of `register`.
///
/// Fails with `UnknownVersion` for any version without a field table.
pub fn resolve(register: Register, version: u8) -> LayoutResult<Layout> {
    LayoutVersion::from_raw(register, version)
        .map(Layout::new)
        .ok_or(LayoutError::UnknownVersion { register, version })
}

/// The field table of one register at one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    version: LayoutVersion,
}

impl Layout {
    pub fn new(version: LayoutVersion) -> Self {
        Self { version }
    }

    pub fn register(&self) -> Register {
        self.version.register()
    }

    pub fn version(&self) -> u8 {
        self.version.number()
    }

    /// Named fields in table order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, DataField)> {
        self.version.table().iter().copied()
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<DataField> {
        self.fields()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, field)| field)
    }

    /// Looks up a field by name, failing with `UnknownField`
    pub fn lookup(&self, name: &str) -> LayoutResult<DataField> {
        self.field(name)
            .ok_or_else(|| LayoutError::UnknownField(name.to_string()))
    }

    /// Sum of all field sizes, checksum included.
    pub fn size(&self) -> usize {
        self.fields().map(|(_, field)| field.size).sum()
    }

    /// Register size without its checksum
    pub fn payload_size(&self) -> usize {
        self.size() - CHECKSUM_SIZE
    }

    /// Offset of the checksum field, which is also where the register starts
    /// in storage.
    pub fn checksum_offset(&self) -> usize {
        // Every table starts with its checksum field.
        self.version.table()[0].1.offset
    }

    /// Position of `field` relative to the start of the register
    pub fn relative_position(&self, field: DataField) -> usize {
        field.offset - self.checksum_offset()
    }

    /// Serializable description of the layout
    pub fn describe(&self) -> LayoutDescription {
        LayoutDescription {
            register: self.register(),
            version: self.version(),
            size: self.size(),
            fields: self
                .fields()
                .map(|(name, field)| FieldDescription {
                    name,
                    size: field.size,
                    offset: field.offset,
                })
                .collect(),
        }
    }
}

/// JSON view of a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutDescription {
    pub register: Register,
    pub version: u8,
    pub size: usize,
    pub fields: Vec<FieldDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescription {
    pub name: &'static str,
    pub size: usize,
    pub offset: usize,
}

/// Layouts of both registers, resolved for a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLayouts {
    layouts: [Layout; 2],
}

impl ActiveLayouts {
    /// Resolves both registers from their raw version bytes
    pub fn resolve(versions: [u8; 2]) -> LayoutResult<Self> {
        Ok(Self {
            layouts: [
                resolve(Register::Register0, versions[0])?,
                resolve(Register::Register1, versions[1])?,
            ],
        })
    }

    pub fn get(&self, register: Register) -> Layout {
        self.layouts[register.index()]
    }

    /// Finds the register whose layout defines `name`
    pub fn register_of(&self, name: &str) -> LayoutResult<Register> {
        Register::ALL
            .into_iter()
            .find(|register| self.get(*register).field(name).is_some())
            .ok_or_else(|| LayoutError::UnknownField(name.to_string()))
    }

    /// Flat lookup of a field across both registers
    pub fn locate(&self, name: &str) -> LayoutResult<(Register, DataField)> {
        let register = self.register_of(name)?;
        let field = self.get(register).lookup(name)?;
        Ok((register, field))
    }

    /// Combined payload size of both registers (checksums excluded)
    pub fn dataset_size(&self) -> usize {
        self.layouts.iter().map(Layout::payload_size).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = Layout> + '_ {
        self.layouts.iter().copied()
    }

    pub fn describe(&self) -> Vec<LayoutDescription> {
        self.layouts.iter().map(Layout::describe).collect()
    }
}
