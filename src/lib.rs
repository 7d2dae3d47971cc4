//! Byte backends for the `dpack` encoder and decoder.
//!
//! An encoder writes through [`PackWrite`], a decoder reads through [`PackRead`].
//! Fixed buffers are covered by [`SliceWriter`] and [`SliceReader`], container
//! types from `std`/`alloc` and a few `no_std` crates get implementations behind
//! their respective features, and [`IoWriter`] forwards to any `std::io::Write`.
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

mod foreign;
#[cfg(feature = "std")]
mod io;

#[cfg(feature = "std")]
pub use io::*;

pub type BackendResult<T> = Result<T, BackendError>;

/// An error returned by [`PackWrite`] and [`PackRead`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Not enough room left for the whole write
    #[error("buffer is full")]
    BufferFull,
    /// Not enough data left for the whole read or skip
    #[error("no more data")]
    NoData,
    /// An underlying I/O operation failed
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(std::io::ErrorKind),
}

/// Encoders write data to the implementations of this trait.
///
/// A failed write must not leave a partial chunk behind.
pub trait PackWrite {
    /// Write all bytes from `buf` to the internal buffer.
    ///
    /// When over capacity return `Err(BackendError::BufferFull)`.
    fn write(&mut self, buf: &[u8]) -> BackendResult<()>;
    /// Write a single `byte` to the internal buffer.
    ///
    /// When over capacity return `Err(BackendError::BufferFull)`.
    #[inline]
    fn write_byte(&mut self, byte: u8) -> BackendResult<()> {
        self.write(core::slice::from_ref(&byte))
    }
    /// Return the number of bytes written so far.
    fn space_used(&self) -> usize;
    /// Return the number of bytes that may still be written.
    fn space_left(&self) -> usize;
    /// Called once when an encoding session is over.
    #[inline]
    fn finish(&mut self) -> BackendResult<()> {
        Ok(())
    }
}

impl<T: PackWrite> PackWrite for &'_ mut T {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        (*self).write(buf)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> BackendResult<()> {
        (*self).write_byte(byte)
    }
    #[inline]
    fn space_used(&self) -> usize {
        (**self).space_used()
    }
    #[inline]
    fn space_left(&self) -> usize {
        (**self).space_left()
    }
    #[inline]
    fn finish(&mut self) -> BackendResult<()> {
        (*self).finish()
    }
}

/// Decoders read data from the implementations of this trait.
///
/// A failed read or skip must not move the read position.
pub trait PackRead {
    /// Return the number of bytes that may still be read.
    fn data_left(&self) -> usize;
    /// Fill the whole of `buf` with the next bytes.
    ///
    /// When not enough data is left return `Err(BackendError::NoData)`.
    fn read(&mut self, buf: &mut [u8]) -> BackendResult<()>;
    /// Advance the read position by `len` bytes without copying.
    ///
    /// When not enough data is left return `Err(BackendError::NoData)`.
    fn skip(&mut self, len: usize) -> BackendResult<()>;
    /// Read a single byte.
    #[inline]
    fn read_byte(&mut self) -> BackendResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }
    /// Read exactly `N` bytes into an array.
    #[inline]
    fn read_array<const N: usize>(&mut self) -> BackendResult<[u8;N]> {
        let mut buf = [0u8;N];
        self.read(&mut buf)?;
        Ok(buf)
    }
    /// Called once when a decoding session is over.
    #[inline]
    fn finish(&mut self) -> BackendResult<()> {
        Ok(())
    }
}

impl<T: PackRead> PackRead for &'_ mut T {
    #[inline]
    fn data_left(&self) -> usize {
        (**self).data_left()
    }
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> BackendResult<()> {
        (*self).read(buf)
    }
    #[inline]
    fn skip(&mut self, len: usize) -> BackendResult<()> {
        (*self).skip(len)
    }
    #[inline]
    fn finish(&mut self) -> BackendResult<()> {
        (*self).finish()
    }
}

/// A fixed slice writer
#[derive(Debug, PartialEq)]
pub struct SliceWriter<'a> {
    pub buf: &'a mut [u8],
    pub len: usize
}

impl<'a> AsRef<[u8]> for SliceWriter<'a> {
    /// Returns a populated portion of the slice
    fn as_ref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<'a> AsMut<[u8]> for SliceWriter<'a> {
    /// Returns a populated portion of the slice
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl<'a> SliceWriter<'a> {
    /// Create new instance
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceWriter { buf, len: 0 }
    }
    /// Return populated length
    pub fn len(&self) -> usize {
        self.len
    }
    /// Return `true` if nothing was written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Return total capacity
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
    /// Split the underlying buffer and return the portion of the populated buffer
    /// with an underlying buffer's borrowed lifetime.
    ///
    /// Once a SliceWriter is dropped the slice stays borrowed as long as an original container lives.
    pub fn split(self) -> (&'a mut[u8], Self) {
        let (res, buf) = self.buf.split_at_mut(self.len);
        (res, Self { buf, len: 0 })
    }
    /// Destruct into an underlying buffer
    pub fn into_buf(self) -> &'a mut [u8] {
        self.buf
    }
}

impl PackWrite for SliceWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        let chunk = self.len.checked_add(buf.len())
                    .and_then(|end| self.buf.get_mut(self.len..end));
        match chunk {
            Some(chunk) => {
                chunk.copy_from_slice(buf);
                self.len += buf.len();
                Ok(())
            }
            None => Err(BackendError::BufferFull)
        }
    }

    #[inline]
    fn space_used(&self) -> usize {
        self.len
    }

    #[inline]
    fn space_left(&self) -> usize {
        self.buf.len() - self.len
    }
}

/// A fixed slice reader
#[derive(Debug, Clone, PartialEq)]
pub struct SliceReader<'a> {
    pub buf: &'a [u8],
    pub pos: usize
}

impl<'a> SliceReader<'a> {
    /// Create new instance
    pub fn new(buf: &'a [u8]) -> Self {
        SliceReader { buf, pos: 0 }
    }
    /// Return the number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }
    /// Return the portion of the slice not consumed yet
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn chunk(&self, len: usize) -> BackendResult<&'a [u8]> {
        self.pos.checked_add(len)
                .and_then(|end| self.buf.get(self.pos..end))
                .ok_or(BackendError::NoData)
    }
}

impl PackRead for SliceReader<'_> {
    #[inline]
    fn data_left(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn read(&mut self, buf: &mut [u8]) -> BackendResult<()> {
        let chunk = self.chunk(buf.len())?;
        buf.copy_from_slice(chunk);
        self.pos += buf.len();
        Ok(())
    }

    fn skip(&mut self, len: usize) -> BackendResult<()> {
        self.chunk(len)?;
        self.pos += len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_writer() {
        let mut buf = [0u8;8];
        let mut writer = SliceWriter::new(&mut buf[..]);
        assert!(writer.is_empty());
        writer.write_byte(0x92).unwrap();
        writer.write(b"\xa4test").unwrap();
        writer.write_byte(0xc0).unwrap();
        assert_eq!(writer.as_ref(), b"\x92\xa4test\xc0");
        assert_eq!(writer.len(), 7);
        assert_eq!(writer.space_left(), 1);
        writer.write_byte(0xc3).unwrap();
        assert_eq!(writer.space_left(), 0);
        assert_eq!(writer.write_byte(0xc2), Err(BackendError::BufferFull));
        let (message, mut rest) = writer.split();
        assert_eq!(message, b"\x92\xa4test\xc0\xc3");
        assert_eq!(rest.capacity(), 0);
        assert_eq!(rest.write(b""), Ok(()));
    }

    #[test]
    fn test_slice_writer_overflow_keeps_state() {
        let mut buf = [0u8;4];
        let mut writer = SliceWriter::new(&mut buf[..]);
        writer.write(b"ab").unwrap();
        assert_eq!(writer.write(b"cde"), Err(BackendError::BufferFull));
        assert_eq!(writer.as_ref(), b"ab");
        assert_eq!(writer.space_left(), 2);
        writer.write(b"cd").unwrap();
        assert_eq!(writer.into_buf(), b"abcd");
    }

    #[test]
    fn test_slice_reader() {
        let mut reader = SliceReader::new(b"\x01\x02\x03\x04\x05");
        assert_eq!(reader.data_left(), 5);
        assert_eq!(reader.read_byte(), Ok(1));
        assert_eq!(reader.read_array::<2>(), Ok([2, 3]));
        assert_eq!(reader.skip(3), Err(BackendError::NoData));
        assert_eq!(reader.position(), 3);
        let mut buf = [0u8;3];
        assert_eq!(reader.read(&mut buf), Err(BackendError::NoData));
        assert_eq!(reader.remaining(), &[4, 5]);
        reader.skip(2).unwrap();
        assert_eq!(reader.data_left(), 0);
        assert_eq!(reader.skip(usize::MAX), Err(BackendError::NoData));
        assert_eq!(reader.read_byte(), Err(BackendError::NoData));
        reader.skip(0).unwrap();
    }
}
