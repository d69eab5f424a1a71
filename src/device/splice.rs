//! Bounds-checked in-place byte range replacement

use super::errors::{DeviceDataError, DeviceResult};

/// Overwrites `buf[position..position + replacement.len()]` with
/// `replacement`.
///
/// The buffer length never changes. A range that runs past the end of the
/// buffer fails with `InternalError` and leaves `buf` untouched.
pub fn replace(buf: &mut [u8], replacement: &[u8], position: usize) -> DeviceResult<()> {
    let end = position
        .checked_add(replacement.len())
        .filter(|end| *end <= buf.len())
        .ok_or_else(|| {
            DeviceDataError::internal(format!(
                "Cannot replace {} bytes at position {} in buffer of {} bytes",
                replacement.len(),
                position,
                buf.len()
            ))
        })?;

    buf[position..end].copy_from_slice(replacement);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceDataErrorCode;

    #[test]
    fn test_replace_middle() {
        let mut buf = vec![0u8; 6];
        replace(&mut buf, &[1, 2], 2).unwrap();
        assert_eq!(buf, vec![0, 0, 1, 2, 0, 0]);
    }

    #[test]
    fn test_replace_exact_end() {
        let mut buf = vec![0u8; 4];
        replace(&mut buf, &[7, 8], 2).unwrap();
        assert_eq!(buf, vec![0, 0, 7, 8]);
    }

    #[test]
    fn test_replace_empty() {
        let mut buf = vec![5u8; 3];
        replace(&mut buf, &[], 3).unwrap();
        assert_eq!(buf, vec![5, 5, 5]);
    }

    #[test]
    fn test_replace_past_end_fails_untouched() {
        let mut buf = vec![0u8; 4];
        let err = replace(&mut buf, &[1, 2, 3], 2).unwrap_err();
        assert_eq!(err.code(), DeviceDataErrorCode::InternalError);
        assert_eq!(buf, vec![0u8; 4]);
    }

    #[test]
    fn test_replace_overflowing_position_fails() {
        let mut buf = vec![0u8; 4];
        let err = replace(&mut buf, &[1], usize::MAX).unwrap_err();
        assert_eq!(err.code(), DeviceDataErrorCode::InternalError);
    }
}
