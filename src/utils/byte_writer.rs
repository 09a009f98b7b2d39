use byteorder::{LittleEndian, WriteBytesExt};

use std::io::{self, Write};

/// Position-tracking little-endian writer.
///
/// The position counts bytes written since construction, which is the offset relative to the
/// start of the template block. Alignment padding is computed from it.
#[derive(Debug)]
pub struct ByteWriter<W: Write> {
    inner: W,
    pos: u64,
}

impl ByteWriter<Vec<u8>> {
    pub fn buffered() -> Self {
        ByteWriter::new(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter::new(Vec::with_capacity(capacity))
    }
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        ByteWriter { inner, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_u8(&mut self, v: u8) -> io::Result<()> {
        self.inner.write_u8(v)?;
        self.pos += 1;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> io::Result<()> {
        self.inner.write_u16::<LittleEndian>(v)?;
        self.pos += 2;
        Ok(())
    }

    pub fn write_i16(&mut self, v: i16) -> io::Result<()> {
        self.inner.write_i16::<LittleEndian>(v)?;
        self.pos += 2;
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> io::Result<()> {
        self.inner.write_u32::<LittleEndian>(v)?;
        self.pos += 4;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.pos += bytes.len() as u64;
        Ok(())
    }

    /// Writes zero bytes until the position is a multiple of 4.
    pub fn pad_to_dword(&mut self) -> io::Result<()> {
        while self.pos % 4 != 0 {
            self.write_u8(0)?;
        }
        Ok(())
    }

    /// Writes the UTF-16 code units of `s` followed by a zero word. Does not pad.
    pub fn write_utf16z(&mut self, s: &str) -> io::Result<()> {
        for unit in s.encode_utf16() {
            self.write_u16(unit)?;
        }
        self.write_u16(0)
    }
}
