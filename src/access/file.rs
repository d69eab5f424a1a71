//! # File-backed Flash Access
//!
//! Positional reads and writes on a device node (`/dev/mtdN`) or a plain
//! image file. Every write is flushed and synced before returning.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::backend::{FlashAccess, SERIAL_SIZE};
use super::errors::{AccessError, AccessResult};

/// Flash access over an open file handle
#[derive(Debug)]
pub struct FileAccess {
    path: PathBuf,
    file: File,
    serial: Option<(PathBuf, u64)>,
}

impl FileAccess {
    /// Opens `path` for reading and writing.
    pub fn open(path: &Path) -> AccessResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| AccessError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            serial: None,
        })
    }

    /// Reads the serial number from `path` at `offset` instead of failing
    /// `read_serial`.
    pub fn with_serial(mut self, path: &Path, offset: u64) -> Self {
        self.serial = Some((path.to_path_buf(), offset));
        self
    }

    /// Returns the device path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn seek(&mut self, offset: usize) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset as u64)).map(|_| ())
    }
}

impl FlashAccess for FileAccess {
    fn read(&mut self, size: usize, offset: usize) -> AccessResult<Vec<u8>> {
        let mut buf = vec![0u8; size];
        self.seek(offset)
            .and_then(|_| self.file.read_exact(&mut buf))
            .map_err(|source| AccessError::Read {
                size,
                offset,
                source,
            })?;
        Ok(buf)
    }

    fn write(&mut self, data: &[u8], offset: usize) -> AccessResult<()> {
        let result = self
            .seek(offset)
            .and_then(|_| self.file.write_all(data))
            .and_then(|_| self.file.flush())
            .and_then(|_| match self.file.sync_data() {
                // Character devices without fsync support report EINVAL.
                Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
                other => other,
            });

        result.map_err(|source| AccessError::Write {
            size: data.len(),
            offset,
            source,
        })
    }

    fn read_serial(&mut self) -> AccessResult<Vec<u8>> {
        let (path, offset) = self.serial.as_ref().ok_or_else(|| {
            AccessError::SerialUnavailable("no serial_path configured".to_string())
        })?;

        let mut file = File::open(path).map_err(|source| AccessError::Open {
            path: path.clone(),
            source,
        })?;

        let mut buf = vec![0u8; SERIAL_SIZE];
        file.seek(SeekFrom::Start(*offset))
            .and_then(|_| file.read_exact(&mut buf))
            .map_err(|source| AccessError::Read {
                size: SERIAL_SIZE,
                offset: *offset as usize,
                source,
            })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_image(dir: &TempDir, size: usize) -> PathBuf {
        let path = dir.path().join("otp.bin");
        std::fs::write(&path, vec![0xFFu8; size]).unwrap();
        path
    }

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let path = create_image(&temp, 512);
        let mut access = FileAccess::open(&path).unwrap();

        access.write(&[0x01, 0x02, 0x03], 256).unwrap();
        assert_eq!(access.read(3, 256).unwrap(), vec![0x01, 0x02, 0x03]);
        assert_eq!(access.read(2, 254).unwrap(), vec![0xFF, 0xFF]);
    }

    #[test]
    fn test_write_persists_to_file() {
        let temp = TempDir::new().unwrap();
        let path = create_image(&temp, 64);

        {
            let mut access = FileAccess::open(&path).unwrap();
            access.write(&[0xAB], 10).unwrap();
        }

        let contents = std::fs::read(&path).unwrap();
        assert_eq!(contents.len(), 64);
        assert_eq!(contents[10], 0xAB);
        assert_eq!(contents[11], 0xFF);
    }

    #[test]
    fn test_short_read_fails() {
        let temp = TempDir::new().unwrap();
        let path = create_image(&temp, 16);
        let mut access = FileAccess::open(&path).unwrap();

        let result = access.read(8, 12);
        assert!(matches!(
            result,
            Err(AccessError::Read { size: 8, offset: 12, .. })
        ));
    }

    #[test]
    fn test_open_missing_device() {
        let temp = TempDir::new().unwrap();
        let result = FileAccess::open(&temp.path().join("missing"));
        assert!(matches!(result, Err(AccessError::Open { .. })));
    }

    #[test]
    fn test_serial_requires_configuration() {
        let temp = TempDir::new().unwrap();
        let path = create_image(&temp, 16);
        let mut access = FileAccess::open(&path).unwrap();

        assert!(matches!(
            access.read_serial(),
            Err(AccessError::SerialUnavailable(_))
        ));
    }

    #[test]
    fn test_serial_read_from_factory_region() {
        let temp = TempDir::new().unwrap();
        let path = create_image(&temp, 16);
        let serial_path = temp.path().join("factory.bin");
        std::fs::write(&serial_path, [0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();

        let mut access = FileAccess::open(&path)
            .unwrap()
            .with_serial(&serial_path, 2);

        assert_eq!(access.read_serial().unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
