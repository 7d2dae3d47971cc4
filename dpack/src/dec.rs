//! The decoder session and the discard machinery.
use dpack_io::{PackRead, SliceReader};

#[cfg(feature = "std")]
use std::vec::Vec;
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::tag::{Tag, Tier};

/// Reads MessagePack items from a [`PackRead`] backend.
///
/// A decoder runs in one of two modes chosen at construction:
///
/// * [`Decoder::new`] aborts: a rejected item is left where the failure was
///   detected and the caller is expected to give up on the message.
/// * [`Decoder::new_discard`] discards: the remains of a rejected item, an
///   array or map failing its count policy and the siblings left unvisited by
///   an aborting item callback are skipped, so the decoder stays positioned at
///   the next item.
///
/// String and bin payloads of a length failing its policy are skipped in
/// both modes.
#[derive(Debug, Clone)]
pub struct Decoder<R> {
    input: R,
    discard: bool,
}

/// What follows a tag.
enum Body {
    /// Opaque bytes
    Bytes(usize),
    /// Nested wire items
    Items(u64),
}

impl<'a> Decoder<SliceReader<'a>> {
    /// Create a new aborting decoder reading from a slice
    pub fn from_slice(input: &'a [u8]) -> Self {
        Decoder::new(SliceReader::new(input))
    }
    /// Create a new discarding decoder reading from a slice
    pub fn from_slice_discard(input: &'a [u8]) -> Self {
        Decoder::new_discard(SliceReader::new(input))
    }
}

impl<R: PackRead> Decoder<R> {
    /// Create a new aborting decoder over the given backend
    pub fn new(input: R) -> Self {
        Decoder { input, discard: false }
    }
    /// Create a new discarding decoder over the given backend
    pub fn new_discard(input: R) -> Self {
        Decoder { input, discard: true }
    }
    /// Return `true` if created with [`Decoder::new_discard`]
    #[inline]
    pub fn is_discard(&self) -> bool {
        self.discard
    }
    /// Return the number of bytes not decoded yet
    #[inline]
    pub fn data_left(&self) -> usize {
        self.input.data_left()
    }
    /// Return a reference to the backend
    pub fn get_ref(&self) -> &R {
        &self.input
    }
    /// End the session and return the backend
    pub fn finish(mut self) -> Result<R> {
        self.input.finish()?;
        Ok(self.input)
    }
    /// Skip over one complete item of any type, nested collections included.
    ///
    /// Meant for deprecated or unwanted map fields, whatever the decoder mode.
    pub fn skip_item(&mut self) -> Result<()> {
        if self.data_left() == 0 {
            return Err(Error::NoMoreData)
        }
        self.discard_items(1)
    }

    /// Fetch the next tag or return `Err(Error::NoMoreData)`.
    pub(crate) fn fetch_tag(&mut self) -> Result<Tag> {
        Ok(Tag::from_byte(self.input.read_byte()?))
    }

    /// Fetch bytes announced by a tag already consumed.
    pub(crate) fn fetch_array<const N: usize>(&mut self) -> Result<[u8;N]> {
        self.input.read_array().map_err(|_| Error::CorruptPayload)
    }

    pub(crate) fn fetch_payload(&mut self, buf: &mut [u8]) -> Result<()> {
        self.input.read(buf).map_err(|_| Error::CorruptPayload)
    }

    pub(crate) fn fetch_u8(&mut self) -> Result<u8> {
        Ok(u8::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.fetch_array()?))
    }

    pub(crate) fn fetch_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.fetch_array()?))
    }

    /// Fetch the count or length field of `tier`, `inline` being the value
    /// embedded in the tag.
    pub(crate) fn fetch_len(&mut self, tier: Tier, inline: u8) -> Result<u32> {
        Ok(match tier {
            Tier::Inline => inline.into(),
            Tier::Len8 => self.fetch_u8()?.into(),
            Tier::Len16 => self.fetch_u16()?.into(),
            Tier::Len32 => self.fetch_u32()?
        })
    }

    /// Skip a payload of `len` bytes, a short stream being `Err(Error::CorruptPayload)`.
    pub(crate) fn skip_payload(&mut self, len: usize) -> Result<()> {
        self.input.skip(len).map_err(|_| Error::CorruptPayload)
    }

    /// Check a str or bin payload length against `min..=max`.
    ///
    /// An empty payload is `Err(Error::CorruptPayload)`. A length out of bounds
    /// has its payload skipped and is `Err(Error::SizeMismatch)`, or
    /// `Err(Error::CorruptPayload)` when the payload is too short to skip.
    /// A length within bounds requires the whole payload to be present.
    pub(crate) fn check_payload(&mut self, len: u32, min: usize, max: usize) -> Result<usize> {
        let len = len as usize;
        if len == 0 {
            return Err(Error::CorruptPayload)
        }
        if len < min || len > max {
            log_debug!(len, min, max, "skipping payload of mismatched size");
            self.skip_payload(len)?;
            return Err(Error::SizeMismatch)
        }
        if len > self.data_left() {
            return Err(Error::CorruptPayload)
        }
        Ok(len)
    }

    /// Fetch a payload of `len` bytes into a new vector.
    #[cfg(any(feature = "std", feature = "alloc"))]
    pub(crate) fn fetch_payload_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
        buf.resize(len, 0);
        self.fetch_payload(&mut buf)?;
        Ok(buf)
    }

    /// Fetch a payload of `len` bytes into the front of `dest`.
    pub(crate) fn fetch_payload_into<'d>(&mut self, len: usize, dest: &'d mut [u8]) -> Result<&'d mut [u8]> {
        let dest = dest.get_mut(..len).ok_or(Error::SizeMismatch)?;
        self.fetch_payload(dest)?;
        Ok(dest)
    }

    /// Turn a tag of the wrong type into an error.
    ///
    /// In discard mode the body following the tag is skipped first. A failure
    /// to skip it is returned instead.
    pub(crate) fn reject(&mut self, tag: Tag) -> Error {
        let err = match tag {
            Tag::Reserved => return Error::MalformedStream,
            tag if tag.is_ext() => Error::UnsupportedConstruct,
            _ => Error::WrongType
        };
        if self.discard {
            log_debug!(?tag, "discarding unexpected item");
            if let Err(err) = self.discard_body(tag) {
                return err
            }
        }
        err
    }

    /// Skip `pending` wire items after a collection was rejected or aborted.
    ///
    /// Only discarding decoders skip anything.
    pub(crate) fn interrupt(&mut self, pending: u64) -> Result<()> {
        if self.discard && pending != 0 {
            log_debug!(pending, "discarding remaining items");
            self.discard_items(pending)
        }
        else {
            Ok(())
        }
    }

    fn body(&mut self, tag: Tag) -> Result<Body> {
        if let Some(size) = tag.fixed_body_size() {
            return Ok(Body::Bytes(size))
        }
        Ok(match tag {
            Tag::Str(tier, inline) => Body::Bytes(self.fetch_len(tier, inline)? as usize),
            Tag::Bin(tier) => Body::Bytes(self.fetch_len(tier, 0)? as usize),
            Tag::Ext(tier) => {
                // the type byte follows the length
                let len = self.fetch_len(tier, 0)? as usize;
                Body::Bytes(len.checked_add(1).ok_or(Error::CorruptPayload)?)
            }
            Tag::Array(tier, inline) => Body::Items(self.fetch_len(tier, inline)?.into()),
            Tag::Map(tier, inline) => Body::Items(2 * u64::from(self.fetch_len(tier, inline)?)),
            Tag::Reserved => return Err(Error::MalformedStream),
            _ => Body::Bytes(0)
        })
    }

    fn discard_body(&mut self, tag: Tag) -> Result<()> {
        match self.body(tag)? {
            Body::Bytes(len) => self.skip_payload(len),
            Body::Items(pending) => self.discard_items(pending)
        }
    }

    /// Skip `pending` complete wire items.
    ///
    /// Walks nested collections with a counter, never recursing. Every item
    /// costs a byte at least, so more pending items than bytes left is
    /// `Err(Error::CorruptPayload)` without scanning any further.
    pub(crate) fn discard_items(&mut self, mut pending: u64) -> Result<()> {
        log_trace!(pending, left = self.data_left(), "discard");
        while pending > 0 {
            if pending > self.data_left() as u64 {
                return Err(Error::CorruptPayload)
            }
            pending -= 1;
            let tag = self.fetch_tag().map_err(|_| Error::CorruptPayload)?;
            match self.body(tag)? {
                Body::Bytes(len) => self.skip_payload(len)?,
                Body::Items(nested) => pending += nested
            }
        }
        Ok(())
    }
}
