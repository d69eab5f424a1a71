//! Register engine: versioned read/modify/write of production data
//!
//! Every public operation starts from scratch:
//!
//! 1. Resolve both register versions (from storage, or from the buffer
//!    being written)
//! 2. Select the layouts for those versions
//! 3. Compute sizes and positions, validate lengths
//! 4. Access storage, verifying checksums on read and recomputing them on
//!    write
//!
//! Nothing survives between calls. A version read by one call is never
//! reused by the next, so out-of-band changes to storage are always seen.

use super::checksum;
use super::errors::{DeviceDataError, DeviceResult};
use super::splice;
use crate::access::FlashAccess;
use crate::layout::{resolve, ActiveLayouts, Layout, Register, CHECKSUM_SIZE, VERSION_SIZE};
use crate::observability::{log_event, log_event_with_fields, Event};

/// Reserved name of the factory serial number, which lives outside the
/// versioned registers.
pub const SERIAL_FIELD: &str = "SERIAL";

const VERSION_FIELD_PREFIX: &str = "VERSION_REG";
const CHECKSUM_FIELD_PREFIX: &str = "CRC_REG";

/// Returns whether `name` denotes derived data that callers can't write.
pub fn is_immutable_field(name: &str) -> bool {
    name.starts_with(VERSION_FIELD_PREFIX) || name.starts_with(CHECKSUM_FIELD_PREFIX)
}

/// Production data stored in the two OTP registers.
///
/// Owns its storage collaborator. Single-threaded; callers serialize access
/// across processes.
#[derive(Debug)]
pub struct DeviceData<A: FlashAccess> {
    access: A,
}

impl<A: FlashAccess> DeviceData<A> {
    pub fn new(access: A) -> Self {
        Self { access }
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn access_mut(&mut self) -> &mut A {
        &mut self.access
    }

    pub fn into_inner(self) -> A {
        self.access
    }

    /// Reads both version bytes from storage and resolves their layouts.
    ///
    /// Both bytes are read before either is resolved.
    pub fn read_versions(&mut self) -> DeviceResult<ActiveLayouts> {
        let mut versions = [0u8; 2];
        for register in Register::ALL {
            let offset = register.version_offset();
            let raw = self.access.read(VERSION_SIZE, offset)?;
            versions[register.index()] = match raw.as_slice() {
                [version] => *version,
                _ => {
                    return Err(DeviceDataError::data_size(VERSION_SIZE, raw.len())
                        .in_register(register))
                }
            };
        }

        let layouts = ActiveLayouts::resolve(versions).map_err(|e| {
            let error = e.to_string();
            log_event_with_fields(Event::UnknownVersion, &[("error", error.as_str())]);
            DeviceDataError::from(e)
        })?;

        let reg0 = versions[0].to_string();
        let reg1 = versions[1].to_string();
        log_event_with_fields(
            Event::VersionsResolved,
            &[("register0", reg0.as_str()), ("register1", reg1.as_str())],
        );
        Ok(layouts)
    }

    /// Resolves both layouts from a dataset about to be written.
    ///
    /// The dataset carries no checksums: register0's version is its first
    /// byte, register1's version is the first byte after register0's
    /// payload.
    pub fn read_versions_from_buffer(buf: &[u8]) -> DeviceResult<ActiveLayouts> {
        let reg0_version = *buf
            .first()
            .ok_or_else(|| DeviceDataError::data_too_short(0, buf.len()))?;
        let reg0 = resolve(Register::Register0, reg0_version)?;

        let position = reg0.payload_size();
        let reg1_version = *buf
            .get(position)
            .ok_or_else(|| DeviceDataError::data_too_short(position, buf.len()))?;

        Ok(ActiveLayouts::resolve([reg0_version, reg1_version])?)
    }

    /// Reads and verifies both registers and returns their payloads,
    /// register0 first, checksums stripped.
    pub fn read(&mut self) -> DeviceResult<Vec<u8>> {
        log_event(Event::DatasetReadBegin);

        let layouts = self.read_versions()?;
        let mut dataset = Vec::with_capacity(layouts.dataset_size());
        for layout in layouts.iter() {
            let buf = self.read_register(layout)?;
            dataset.extend_from_slice(&buf[CHECKSUM_SIZE..]);
        }

        let size = dataset.len().to_string();
        log_event_with_fields(Event::DatasetReadComplete, &[("size", size.as_str())]);
        Ok(dataset)
    }

    /// Writes a whole dataset (both payloads, no checksums).
    ///
    /// The layouts come from the version bytes inside `buf`, not from
    /// storage. The length must match those layouts exactly. Each register
    /// gets a fresh checksum and one write; a failed write aborts before the
    /// next one is attempted.
    pub fn write(&mut self, buf: &[u8]) -> DeviceResult<()> {
        let layouts = Self::read_versions_from_buffer(buf)?;

        let expected = layouts.dataset_size();
        if buf.len() != expected {
            return Err(DeviceDataError::data_size(expected, buf.len()));
        }

        let reg0_version = layouts.get(Register::Register0).version().to_string();
        let reg1_version = layouts.get(Register::Register1).version().to_string();
        log_event_with_fields(
            Event::DatasetWriteBegin,
            &[
                ("register0", reg0_version.as_str()),
                ("register1", reg1_version.as_str()),
            ],
        );

        let (reg0, reg1) = buf.split_at(layouts.get(Register::Register0).payload_size());
        let registers = [checksum::prepend(reg0), checksum::prepend(reg1)];

        for (layout, data) in layouts.iter().zip(registers.iter()) {
            self.access.write(data, layout.checksum_offset())?;
            let size = data.len().to_string();
            log_event_with_fields(
                Event::RegisterWritten,
                &[("register", layout.register().name()), ("size", size.as_str())],
            );
        }

        log_event(Event::DatasetWriteComplete);
        Ok(())
    }

    /// Reads a single named field.
    ///
    /// `SERIAL` goes straight to the storage collaborator. Any other name
    /// resolves versions from storage, then reads and verifies the owning
    /// register.
    pub fn read_field(&mut self, name: &str) -> DeviceResult<Vec<u8>> {
        if name == SERIAL_FIELD {
            let serial = self.access.read_serial()?;
            log_event(Event::SerialRead);
            return Ok(serial);
        }

        let layouts = self.read_versions()?;
        let (register, field) = layouts.locate(name)?;
        let layout = layouts.get(register);

        let buf = self.read_register(layout)?;
        let position = layout.relative_position(field);
        let value = buf
            .get(position..position + field.size)
            .ok_or_else(|| {
                DeviceDataError::internal(format!(
                    "Field {} at position {} exceeds register of {} bytes",
                    name,
                    position,
                    buf.len()
                ))
            })?
            .to_vec();

        log_event_with_fields(
            Event::FieldRead,
            &[("field", name), ("register", register.name())],
        );
        Ok(value)
    }

    /// Replaces a single named field.
    ///
    /// Version and checksum fields are rejected before storage is touched.
    /// The owning register is read, verified, patched, re-checksummed and
    /// written back in one write.
    pub fn write_field(&mut self, name: &str, data: &[u8]) -> DeviceResult<()> {
        if is_immutable_field(name) {
            log_event_with_fields(Event::ImmutableFieldRejected, &[("field", name)]);
            return Err(DeviceDataError::immutable_field(name));
        }

        let layouts = self.read_versions()?;
        let (register, field) = layouts.locate(name)?;
        if data.len() != field.size {
            return Err(DeviceDataError::field_size(name, field.size, data.len()));
        }

        let layout = layouts.get(register);
        log_event_with_fields(
            Event::FieldWriteBegin,
            &[("field", name), ("register", register.name())],
        );

        let mut buf = self.read_register(layout)?;
        splice::replace(&mut buf, data, layout.relative_position(field))?;
        checksum::replace(&mut buf)?;
        self.access.write(&buf, layout.checksum_offset())?;

        log_event_with_fields(
            Event::FieldWriteComplete,
            &[("field", name), ("register", register.name())],
        );
        Ok(())
    }

    /// Reads a register's full extent, checksum included, and verifies it.
    fn read_register(&mut self, layout: Layout) -> DeviceResult<Vec<u8>> {
        let register = layout.register();
        let size = layout.size();
        let buf = self.access.read(size, layout.checksum_offset())?;
        if buf.len() != size {
            return Err(DeviceDataError::data_size(size, buf.len()).in_register(register));
        }

        checksum::verify(&buf).map_err(|e| {
            if e.is_fatal() {
                log_event_with_fields(
                    Event::ChecksumMismatch,
                    &[
                        ("details", e.details().unwrap_or_default()),
                        ("register", register.name()),
                    ],
                );
            }
            e.in_register(register)
        })?;

        Ok(buf)
    }
}
