//! CRC-16 checksum for register contents
//!
//! Every register starts with a 2-byte checksum over the bytes that follow
//! it. The checksum is CRC-16/ARC (reflected polynomial 0xA001, zero init,
//! no final xor), stored big-endian.
//!
//! - Every buffer read from a register is verified before use
//! - Every buffer written to a register carries a freshly computed checksum

use crc::{Crc, CRC_16_ARC};

use super::errors::{DeviceDataError, DeviceResult};
use crate::layout::CHECKSUM_SIZE;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// Computes the checksum bytes for `payload` (checksum field excluded).
pub fn compute(payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    CRC16.checksum(payload).to_be_bytes()
}

/// Verifies the checksum stored in the first two bytes of `buf`.
///
/// Returns `CorruptData` on mismatch, which is never retried.
pub fn verify(buf: &[u8]) -> DeviceResult<()> {
    if buf.len() < CHECKSUM_SIZE {
        return Err(DeviceDataError::data_too_short(CHECKSUM_SIZE - 1, buf.len()));
    }

    let (stored, payload) = buf.split_at(CHECKSUM_SIZE);
    let computed = compute(payload);
    if stored != computed {
        return Err(DeviceDataError::corrupt_data(
            u16::from_be_bytes([stored[0], stored[1]]),
            u16::from_be_bytes(computed),
        ));
    }

    Ok(())
}

/// Returns `checksum ++ payload` for a fresh write.
pub fn prepend(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(CHECKSUM_SIZE + payload.len());
    buf.extend_from_slice(&compute(payload));
    buf.extend_from_slice(payload);
    buf
}

/// Recomputes the checksum of an already checksummed buffer in place.
pub fn replace(buf: &mut [u8]) -> DeviceResult<()> {
    if buf.len() < CHECKSUM_SIZE {
        return Err(DeviceDataError::data_too_short(CHECKSUM_SIZE - 1, buf.len()));
    }

    let checksum = compute(&buf[CHECKSUM_SIZE..]);
    buf[..CHECKSUM_SIZE].copy_from_slice(&checksum);
    Ok(())
}
