//! # Flash Access Trait

use super::errors::AccessResult;

/// Length of the factory-programmed serial number
pub const SERIAL_SIZE: usize = 8;

/// Byte-level access to the medium holding production data
pub trait FlashAccess: std::fmt::Debug {
    /// Read `size` bytes starting at absolute `offset`
    fn read(&mut self, size: usize, offset: usize) -> AccessResult<Vec<u8>>;

    /// Write `data` starting at absolute `offset`
    fn write(&mut self, data: &[u8], offset: usize) -> AccessResult<()>;

    /// Read the factory serial number (`SERIAL_SIZE` bytes)
    fn read_serial(&mut self) -> AccessResult<Vec<u8>>;
}

impl<T: FlashAccess + ?Sized> FlashAccess for Box<T> {
    fn read(&mut self, size: usize, offset: usize) -> AccessResult<Vec<u8>> {
        (**self).read(size, offset)
    }

    fn write(&mut self, data: &[u8], offset: usize) -> AccessResult<()> {
        (**self).write(data, offset)
    }

    fn read_serial(&mut self) -> AccessResult<Vec<u8>> {
        (**self).read_serial()
    }
}
