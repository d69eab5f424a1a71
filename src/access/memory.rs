//! # In-memory Flash Access
//!
//! A fixed-size byte image standing in for the device. Every access is
//! recorded so callers can assert exactly which storage operations ran.

use std::io;

use super::backend::{FlashAccess, SERIAL_SIZE};
use super::errors::{AccessError, AccessResult};

/// Size of a fresh image: one 512-byte OTP region
pub const DEFAULT_IMAGE_SIZE: usize = 512;

/// A recorded storage operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOp {
    Read { size: usize, offset: usize },
    Write { data: Vec<u8>, offset: usize },
    ReadSerial,
}

/// In-memory flash image
#[derive(Debug, Clone)]
pub struct MemoryAccess {
    image: Vec<u8>,
    serial: [u8; SERIAL_SIZE],
    ops: Vec<AccessOp>,
    writes: usize,
    fail_write: Option<usize>,
}

impl MemoryAccess {
    /// Blank (erased, all `0xFF`) image of the default size
    pub fn new() -> Self {
        Self::from_image(vec![0xFF; DEFAULT_IMAGE_SIZE])
    }

    pub fn from_image(image: Vec<u8>) -> Self {
        Self {
            image,
            serial: [0u8; SERIAL_SIZE],
            ops: Vec::new(),
            writes: 0,
            fail_write: None,
        }
    }

    pub fn with_serial(mut self, serial: [u8; SERIAL_SIZE]) -> Self {
        self.serial = serial;
        self
    }

    /// Makes the `n`-th write from now (zero based) fail without touching
    /// the image.
    pub fn fail_write_after(&mut self, n: usize) {
        self.fail_write = Some(self.writes + n);
    }

    /// Copies `data` into the image without recording an operation.
    ///
    /// Simulates an out-of-band writer.
    pub fn poke(&mut self, data: &[u8], offset: usize) -> AccessResult<()> {
        self.check_range(data.len(), offset)?;
        self.image[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Operations recorded so far, oldest first
    pub fn ops(&self) -> &[AccessOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of recorded writes
    pub fn write_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, AccessOp::Write { .. }))
            .count()
    }

    fn check_range(&self, size: usize, offset: usize) -> AccessResult<()> {
        match offset.checked_add(size) {
            Some(end) if end <= self.image.len() => Ok(()),
            _ => Err(AccessError::OutOfRange {
                size,
                offset,
                capacity: self.image.len(),
            }),
        }
    }
}

impl Default for MemoryAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashAccess for MemoryAccess {
    fn read(&mut self, size: usize, offset: usize) -> AccessResult<Vec<u8>> {
        self.ops.push(AccessOp::Read { size, offset });
        self.check_range(size, offset)?;
        Ok(self.image[offset..offset + size].to_vec())
    }

    fn write(&mut self, data: &[u8], offset: usize) -> AccessResult<()> {
        self.ops.push(AccessOp::Write {
            data: data.to_vec(),
            offset,
        });
        self.check_range(data.len(), offset)?;

        let index = self.writes;
        self.writes += 1;
        if self.fail_write == Some(index) {
            self.fail_write = None;
            return Err(AccessError::Write {
                size: data.len(),
                offset,
                source: io::Error::new(io::ErrorKind::Other, "injected write failure"),
            });
        }

        self.image[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn read_serial(&mut self) -> AccessResult<Vec<u8>> {
        self.ops.push(AccessOp::ReadSerial);
        Ok(self.serial.to_vec())
    }
}
