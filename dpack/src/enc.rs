//! The encoder session.
use dpack_io::{BackendResult, PackWrite, SliceWriter};

use crate::error::Result;
use crate::tag::*;

/// Writes MessagePack items to a [`PackWrite`] backend.
///
/// Encoding a collection is a caller discipline: every `begin_*` call must be
/// followed by exactly the announced number of items and a matching `end_*`
/// call. Debug builds check this and panic on violations, until a write
/// fails.
#[derive(Debug)]
pub struct Encoder<W> {
    output: W,
    #[cfg(debug_assertions)]
    nest: Nesting,
}

impl<'a> Encoder<SliceWriter<'a>> {
    /// Create a new encoder writing to a fixed slice
    pub fn from_slice(buf: &'a mut [u8]) -> Self {
        Encoder::new(SliceWriter::new(buf))
    }
}

impl<W: PackWrite> Encoder<W> {
    /// Create a new encoder instance over the given backend
    pub fn new(output: W) -> Self {
        Encoder {
            output,
            #[cfg(debug_assertions)]
            nest: Nesting::default()
        }
    }
    /// Return the number of bytes written so far
    #[inline]
    pub fn space_used(&self) -> usize {
        self.output.space_used()
    }
    /// Return the number of bytes that may still be written
    #[inline]
    pub fn space_left(&self) -> usize {
        self.output.space_left()
    }
    /// Return a reference to the backend
    pub fn get_ref(&self) -> &W {
        &self.output
    }
    /// End the session and return the backend.
    ///
    /// The backend's own [`PackWrite::finish`] is called, which flushes
    /// buffering backends.
    pub fn finish(mut self) -> Result<W> {
        #[cfg(debug_assertions)]
        self.nest.finish();
        self.output.finish()?;
        Ok(self.output)
    }

    #[inline]
    pub(crate) fn write_byte(&mut self, byte: u8) -> Result<()> {
        let res = self.output.write_byte(byte);
        self.check(res)
    }

    #[inline]
    pub(crate) fn write(&mut self, buf: &[u8]) -> Result<()> {
        let res = self.output.write(buf);
        self.check(res)
    }

    /// Mark the session failed after a write error
    #[inline(always)]
    pub(crate) fn fail(&mut self) {
        #[cfg(debug_assertions)]
        self.nest.fail();
    }

    #[inline]
    fn check(&mut self, res: BackendResult<()>) -> Result<()> {
        res.map_err(|err| {
            self.fail();
            err.into()
        })
    }

    /// Write a tag followed by `len` in the width of `tier`.
    ///
    /// An inline tier ORs `len` into the tag.
    pub(crate) fn write_head(&mut self, tag: u8, tier: Tier, len: u32) -> Result<()> {
        match tier {
            Tier::Inline => self.write_byte(tag | len as u8),
            Tier::Len8 => self.write(&[tag, len as u8]),
            Tier::Len16 => {
                let [hi, lo] = (len as u16).to_be_bytes();
                self.write(&[tag, hi, lo])
            }
            Tier::Len32 => {
                let [b0, b1, b2, b3] = len.to_be_bytes();
                self.write(&[tag, b0, b1, b2, b3])
            }
        }
    }

    /// Account for an item written to the innermost collection
    #[inline(always)]
    pub(crate) fn commit(&mut self) {
        #[cfg(debug_assertions)]
        self.nest.item();
    }

    /// Account for a collection header announcing `items` wire items
    #[inline(always)]
    #[allow(unused_variables)]
    pub(crate) fn open(&mut self, items: u64) {
        #[cfg(debug_assertions)]
        self.nest.open(items);
    }

    #[inline(always)]
    pub(crate) fn close(&mut self) {
        #[cfg(debug_assertions)]
        self.nest.close();
    }
}

/// Remaining wire items per open collection, innermost last.
///
/// Once a write has failed the stream is left incomplete and nothing more
/// is checked.
#[cfg(debug_assertions)]
#[derive(Debug, Default)]
struct Nesting {
    depth: usize,
    failed: bool,
    pending: [u64; crate::config::NEST_CHECK_DEPTH],
}

#[cfg(debug_assertions)]
impl Nesting {
    fn innermost(&mut self) -> Option<&mut u64> {
        self.depth.checked_sub(1).and_then(|top| self.pending.get_mut(top))
    }

    fn fail(&mut self) {
        self.failed = true;
    }

    fn item(&mut self) {
        if self.failed {
            return
        }
        if let Some(pending) = self.innermost() {
            assert!(*pending > 0, "more items than announced by the collection header");
            *pending -= 1;
        }
    }

    fn open(&mut self, items: u64) {
        if self.failed {
            return
        }
        self.item();
        self.depth += 1;
        if let Some(pending) = self.innermost() {
            *pending = items;
        }
    }

    fn close(&mut self) {
        if self.failed {
            return
        }
        assert!(self.depth > 0, "no open collection to end");
        if let Some(pending) = self.innermost() {
            assert_eq!(*pending, 0, "collection ended before all announced items were written");
        }
        self.depth -= 1;
    }

    fn finish(&self) {
        if self.failed {
            return
        }
        assert_eq!(self.depth, 0, "encoder finished with an open collection");
    }
}
