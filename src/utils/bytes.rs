//! Byte-slice utilities for bounds-oriented parsing.
//!
//! Two layers:
//! - **Option layer** (`read_*`): helpers that return `Option<T>`.
//! - **Result layer** (`*_r`): wrappers that map `None` to `DeserializationError::Truncated`.
//!
//! All numeric reads are **little-endian** (resource data is LE). Offsets are `usize` and are
//! interpreted relative to the slice you pass in.

use crate::err::DeserializationError;

/// Read `N` raw bytes at `offset`.
///
/// Returns `None` if the range is out of bounds.
pub(crate) fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    let bytes: [u8; N] = buf.get(offset..end)?.try_into().ok()?;
    Some(bytes)
}

/// Read a single byte at `offset`.
pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

/// Read a `u16` (little-endian) at `offset`.
pub(crate) fn read_u16_le(buf: &[u8], offset: usize) -> Option<u16> {
    Some(u16::from_le_bytes(read_array::<2>(buf, offset)?))
}

/// Read a `u32` (little-endian) at `offset`.
pub(crate) fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    Some(u32::from_le_bytes(read_array::<4>(buf, offset)?))
}

#[inline]
pub(crate) fn truncated(
    what: &'static str,
    offset: usize,
    need: usize,
    len: usize,
) -> DeserializationError {
    DeserializationError::Truncated {
        what,
        offset: offset as u64,
        need,
        have: len.saturating_sub(offset),
    }
}

pub(crate) fn slice_r<'a>(
    buf: &'a [u8],
    offset: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], DeserializationError> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| truncated(what, offset, len, buf.len()))?;
    buf.get(offset..end)
        .ok_or_else(|| truncated(what, offset, len, buf.len()))
}

/// Read a `u8` at `offset`, or return `DeserializationError::Truncated`.
pub(crate) fn read_u8_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<u8, DeserializationError> {
    read_u8(buf, offset).ok_or_else(|| truncated(what, offset, 1, buf.len()))
}

/// Read a `u16` (little-endian) at `offset`, or return `DeserializationError::Truncated`.
pub(crate) fn read_u16_le_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<u16, DeserializationError> {
    read_u16_le(buf, offset).ok_or_else(|| truncated(what, offset, 2, buf.len()))
}

/// Read a `u32` (little-endian) at `offset`, or return `DeserializationError::Truncated`.
pub(crate) fn read_u32_le_r(
    buf: &[u8],
    offset: usize,
    what: &'static str,
) -> Result<u32, DeserializationError> {
    read_u32_le(buf, offset).ok_or_else(|| truncated(what, offset, 4, buf.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian_primitives() {
        let buf = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_u16_le(&buf, 0), Some(0x1234));
        assert_eq!(read_u32_le(&buf, 2), Some(0x1234_5678));
        assert_eq!(read_u8(&buf, 5), Some(0x12));
    }

    #[test]
    fn test_out_of_bounds_reads_are_reported() {
        let buf = [0x01, 0x02, 0x03];
        assert_eq!(read_u32_le(&buf, 0), None);
        assert_eq!(read_u16_le(&buf, usize::MAX), None);

        match read_u16_le_r(&buf, 2, "word") {
            Err(DeserializationError::Truncated {
                what,
                offset,
                need,
                have,
            }) => {
                assert_eq!(what, "word");
                assert_eq!(offset, 2);
                assert_eq!(need, 2);
                assert_eq!(have, 1);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_slice_r_allows_empty_slice_at_eof() {
        let buf = [0_u8; 4];
        assert!(slice_r(&buf, 4, 0, "eof").unwrap().is_empty());
        assert!(slice_r(&buf, 5, 0, "past eof").is_err());
    }
}
