//! A page buffered backend over `std::io::Write`.
use std::io;

use super::*;

/// The size of an [`IoWriter`] page.
pub const PAGE_SIZE: usize = 4096;

/// Buffers encoded bytes one page at a time and forwards full pages with
/// blocking `write_all` calls.
///
/// A chunk that does not fit the page flushes it first, so a failed write
/// buffers nothing of its chunk. Chunks larger than a page go straight to
/// the underlying writer, which may have taken part of them on failure.
///
/// Pending bytes are flushed by [`PackWrite::finish`]. Dropping the writer
/// without finishing loses them.
#[derive(Debug)]
pub struct IoWriter<W: io::Write> {
    inner: W,
    page: [u8;PAGE_SIZE],
    fill: usize,
    flushed: usize,
}

impl<W: io::Write> IoWriter<W> {
    /// Create new instance
    pub fn new(inner: W) -> Self {
        IoWriter { inner, page: [0u8;PAGE_SIZE], fill: 0, flushed: 0 }
    }
    /// Return a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
    /// Destruct into the underlying writer, dropping unflushed bytes
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn flush_page(&mut self) -> BackendResult<()> {
        if self.fill == 0 {
            return Ok(())
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.fill, "flushing page");
        self.inner.write_all(&self.page[..self.fill])
                  .map_err(|e| BackendError::Io(e.kind()))?;
        self.flushed += self.fill;
        self.fill = 0;
        Ok(())
    }
}

impl<W: io::Write> PackWrite for IoWriter<W> {
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        if buf.len() > PAGE_SIZE - self.fill {
            self.flush_page()?;
        }
        if buf.len() > PAGE_SIZE {
            self.inner.write_all(buf)
                      .map_err(|e| BackendError::Io(e.kind()))?;
            self.flushed += buf.len();
        }
        else {
            self.page[self.fill..self.fill + buf.len()].copy_from_slice(buf);
            self.fill += buf.len();
        }
        Ok(())
    }

    #[inline]
    fn space_used(&self) -> usize {
        self.flushed + self.fill
    }

    #[inline]
    fn space_left(&self) -> usize {
        (isize::MAX as usize).saturating_sub(self.space_used())
    }

    fn finish(&mut self) -> BackendResult<()> {
        self.flush_page()?;
        self.inner.flush().map_err(|e| BackendError::Io(e.kind()))
    }
}
