//! Stream wrappers for chunk payload I/O.
//!
//! Skin payloads are embedded in a larger chunked container, so these wrappers
//! work over any blocking [`std::io::Read`] / [`std::io::Write`] rather than
//! owning a file. They add little-endian primitives, position tracking, and
//! explicit surfacing of truncated input as [`Error::UnexpectedEof`].

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::util::{Error, Result};

/// Input stream for reading a chunk payload.
pub struct IStream<R> {
    inner: R,
    pos: u64,
}

impl<R: Read> IStream<R> {
    /// Wrap a reader positioned at the start of the payload.
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Get the current read position within the payload.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Read bytes, filling the whole buffer.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(|e| self.map_eof(e))?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.pos += 4;
        Ok(value)
    }

    /// Read little-endian f32 values, filling the whole slice.
    pub fn read_f32s(&mut self, dst: &mut [f32]) -> Result<()> {
        self.inner
            .read_f32_into::<LittleEndian>(dst)
            .map_err(|e| self.map_eof(e))?;
        self.pos += (dst.len() * 4) as u64;
        Ok(())
    }

    /// Skip forward over `n` bytes of payload.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let copied = io::copy(&mut self.inner.by_ref().take(n), &mut io::sink())?;
        self.pos += copied;
        if copied < n {
            return Err(Error::UnexpectedEof(self.pos));
        }
        Ok(())
    }

    fn map_eof(&self, e: io::Error) -> Error {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof(self.pos)
        } else {
            Error::Io(e)
        }
    }
}

/// Output stream for writing a chunk payload.
pub struct OStream<W> {
    inner: W,
    pos: u64,
}

impl<W: Write> OStream<W> {
    /// Wrap a writer positioned at the start of the payload.
    pub fn new(inner: W) -> Self {
        Self { inner, pos: 0 }
    }

    /// Get the current write position within the payload.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write bytes and advance position.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.inner.write_u32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write f32 values (little-endian).
    pub fn write_f32s(&mut self, src: &[f32]) -> Result<()> {
        for &value in src {
            self.inner.write_f32::<LittleEndian>(value)?;
        }
        self.pos += (src.len() * 4) as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_u32_le() {
        let mut s = IStream::new(Cursor::new(vec![0x01, 0x02, 0x03, 0x04]));
        assert_eq!(s.read_u32().unwrap(), 0x04030201);
        assert_eq!(s.pos(), 4);
    }

    #[test]
    fn test_read_f32s() {
        let mut s = IStream::new(Cursor::new(1.5f32.to_le_bytes().to_vec()));
        let mut out = [0.0f32; 1];
        s.read_f32s(&mut out).unwrap();
        assert_eq!(out[0], 1.5);
    }

    #[test]
    fn test_skip() {
        let mut s = IStream::new(Cursor::new(vec![0u8; 8]));
        s.skip(4).unwrap();
        assert_eq!(s.pos(), 4);
        assert!(matches!(s.skip(8), Err(Error::UnexpectedEof(8))));
    }

    #[test]
    fn test_truncated_read() {
        let mut s = IStream::new(Cursor::new(vec![0u8; 2]));
        let mut buf = [0u8; 4];
        assert!(matches!(s.read_bytes(&mut buf), Err(Error::UnexpectedEof(0))));
    }

    #[test]
    fn test_write_round_trip() {
        let mut buf = Vec::new();
        {
            let mut s = OStream::new(&mut buf);
            s.write_u32(0xdead_dead).unwrap();
            s.write_f32s(&[0.25, 0.75]).unwrap();
            s.write_bytes(&[7]).unwrap();
            assert_eq!(s.pos(), 13);
        }
        assert_eq!(&buf[0..4], &[0xad, 0xde, 0xad, 0xde]);

        let mut s = IStream::new(Cursor::new(buf));
        assert_eq!(s.read_u32().unwrap(), 0xdead_dead);
        let mut f = [0.0f32; 2];
        s.read_f32s(&mut f).unwrap();
        assert_eq!(f, [0.25, 0.75]);
    }
}
