use crate::{Error, Result};
use byteorder::{ReadBytesExt, LE};
use std::io::{self, Read, Seek, SeekFrom};

/// Random-access, little-endian view over the bytes of one image.
///
/// Every read is bounds-checked against the length of the underlying data, so
/// a truncated image surfaces as [`Error::Truncated`] instead of a short read.
pub trait ByteSource {
    /// Total number of bytes available.
    fn len(&self) -> u64;

    /// Moves to an absolute offset.
    fn seek_to(&mut self, offset: u64) -> Result<()>;

    /// Moves forward `count` bytes from the current position.
    fn skip(&mut self, count: u64) -> Result<()>;

    fn read_u16(&mut self) -> Result<u16>;

    fn read_u32(&mut self) -> Result<u32>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`ByteSource`] over any seekable reader, e.g. a `File` or a `Cursor<Vec<u8>>`.
#[derive(Debug)]
pub struct PeReader<R> {
    inner: R,
    len: u64,
    pos: u64,
}

impl<R: Read + Seek> PeReader<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len, pos: 0 })
    }

    fn ensure_available(&self, offset: u64, width: u64) -> Result<()> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(Error::Truncated {
                offset,
                len: self.len,
            }),
        }
    }

    fn read_with<T>(
        &mut self,
        width: u64,
        read: impl FnOnce(&mut R) -> io::Result<T>,
    ) -> Result<T> {
        self.ensure_available(self.pos, width)?;
        let value = read(&mut self.inner)?;
        self.pos += width;
        Ok(value)
    }
}

impl<R: Read + Seek> ByteSource for PeReader<R> {
    fn len(&self) -> u64 {
        self.len
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.ensure_available(offset, 0)?;
        self.inner.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }

    fn skip(&mut self, count: u64) -> Result<()> {
        let target = self.pos.checked_add(count).ok_or(Error::OffsetOverflow)?;
        self.seek_to(target)
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.read_with(2, |r| r.read_u16::<LE>())
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.read_with(4, |r| r.read_u32::<LE>())
    }
}
