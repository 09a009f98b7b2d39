use crate::err::{DeserializationError, DeserializationResult};
use crate::settings::DecodeSettings;
use crate::utils::bytes;
use crate::utils::utf16::decode_utf16_units_z;

use log::trace;

/// A lightweight cursor over an immutable byte slice.
///
/// This is the slice/offset equivalent of `Cursor<&[u8]>`: the template block is already in
/// memory, and every read is bounds-checked against the slice length instead of going through
/// IO-style error plumbing.
///
/// All reads are little-endian and advance the cursor on success. A failed read leaves the
/// position untouched.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    strict_utf16: bool,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            strict_utf16: false,
        }
    }

    pub fn with_settings(buf: &'a [u8], settings: &DecodeSettings) -> Self {
        Self {
            buf,
            pos: 0,
            strict_utf16: settings.should_decode_utf16_strictly(),
        }
    }

    #[inline]
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn set_pos(&mut self, pos: usize, what: &'static str) -> DeserializationResult<()> {
        // Allow pos == len (EOF), reject pos > len.
        let _ = bytes::slice_r(self.buf, pos, 0, what)?;
        self.pos = pos;
        Ok(())
    }

    /// Rounds the position up to the next multiple of 4.
    ///
    /// Never fails: a position that lands past the end of the buffer is reported by the next read.
    #[inline]
    pub fn align_up(&mut self) -> usize {
        self.pos = align_to_dword(self.pos);
        self.pos
    }

    #[inline]
    pub fn take_bytes(&mut self, len: usize, what: &'static str) -> DeserializationResult<&'a [u8]> {
        let out = bytes::slice_r(self.buf, self.pos, len, what)?;
        self.pos += len;
        Ok(out)
    }

    #[inline]
    pub fn u8_named(&mut self, what: &'static str) -> DeserializationResult<u8> {
        let v = bytes::read_u8_r(self.buf, self.pos, what)?;
        self.pos += 1;
        Ok(v)
    }

    #[inline]
    pub fn u16_named(&mut self, what: &'static str) -> DeserializationResult<u16> {
        let v = bytes::read_u16_le_r(self.buf, self.pos, what)?;
        self.pos += 2;
        Ok(v)
    }

    #[inline]
    pub fn i16_named(&mut self, what: &'static str) -> DeserializationResult<i16> {
        Ok(self.u16_named(what)? as i16)
    }

    #[inline]
    pub fn u32_named(&mut self, what: &'static str) -> DeserializationResult<u32> {
        let v = bytes::read_u32_le_r(self.buf, self.pos, what)?;
        self.pos += 4;
        Ok(v)
    }

    /// Read UTF-16 code units until a NUL (0x0000) code unit is encountered.
    ///
    /// The cursor ends up just past the terminator. If the buffer runs out first (including a
    /// dangling odd byte), nothing is consumed and `MalformedString` is returned.
    pub fn utf16z(&mut self, what: &'static str) -> DeserializationResult<String> {
        let start = self.pos;
        let mut units = Vec::new();
        let mut cur = start;

        loop {
            let unit = bytes::read_u16_le(self.buf, cur).ok_or(
                DeserializationError::MalformedString {
                    what,
                    offset: start as u64,
                },
            )?;
            cur += 2;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }

        let s = decode_utf16_units_z(&units, self.strict_utf16).map_err(|_| {
            DeserializationError::MalformedString {
                what,
                offset: start as u64,
            }
        })?;

        trace!(
            "Offset `0x{offset:08x} ({offset})` read {what} of {len} code units",
            offset = start,
            len = units.len()
        );

        self.pos = cur;
        Ok(s)
    }
}

/// Rounds `offset` up to the next multiple of 4.
#[inline]
pub(crate) fn align_to_dword(offset: usize) -> usize {
    (offset + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_align_up_rounds_to_dword() {
        let buf = [0_u8; 16];
        let mut cursor = ByteCursor::new(&buf);

        for (start, expected) in [(0, 0), (1, 4), (2, 4), (3, 4), (4, 4), (5, 8), (10, 12)] {
            cursor.set_pos(start, "test").unwrap();
            assert_eq!(cursor.align_up(), expected, "aligning {}", start);
        }
    }

    #[test]
    fn test_align_up_past_end_fails_on_next_read() {
        let buf = [0_u8; 5];
        let mut cursor = ByteCursor::new(&buf);
        cursor.set_pos(5, "test").unwrap();
        assert_eq!(cursor.align_up(), 8);
        assert_eq!(cursor.remaining(), 0);
        assert!(matches!(
            cursor.u16_named("after align"),
            Err(DeserializationError::Truncated { .. })
        ));
    }

    #[test]
    fn test_reads_fixed_width_fields() {
        let buf = [0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12, 0x7F];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.i16_named("x").unwrap(), -2);
        assert_eq!(cursor.u32_named("style").unwrap(), 0x1234_5678);
        assert_eq!(cursor.u8_named("italic").unwrap(), 0x7F);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_utf16z_reads_and_advances_past_terminator() {
        let buf = [b'H', 0, b'i', 0, 0, 0, 0xAA, 0xBB];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.utf16z("caption").unwrap(), "Hi");
        assert_eq!(cursor.pos(), 6);
    }

    #[test]
    fn test_utf16z_empty_string() {
        let buf = [0, 0];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.utf16z("caption").unwrap(), "");
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn test_utf16z_one_byte_short_of_terminator() {
        let buf = [b'H', 0, b'i', 0, 0];
        let mut cursor = ByteCursor::new(&buf);
        assert!(matches!(
            cursor.utf16z("caption"),
            Err(DeserializationError::MalformedString {
                what: "caption",
                offset: 0
            })
        ));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_utf16z_strict_rejects_unpaired_surrogate() {
        let buf = [0x00, 0xD8, 0, 0];
        let strict = DecodeSettings::new().strict_utf16(true);

        let mut cursor = ByteCursor::with_settings(&buf, &strict);
        assert!(matches!(
            cursor.utf16z("caption"),
            Err(DeserializationError::MalformedString { .. })
        ));

        let mut lossy = ByteCursor::new(&buf);
        assert_eq!(lossy.utf16z("caption").unwrap(), "\u{FFFD}");
    }
}
