//! Arrays.
//!
//! An array is a header announcing its element count followed by that many
//! items of any type. Decoding hands every element to an item callback.
use dpack_io::{PackRead, PackWrite};

use crate::config::ARRAY_ELMNR_MAX;
use crate::dec::Decoder;
use crate::enc::Encoder;
use crate::error::{Error, Result};
use crate::tag::{ARRAY_16, ARRAY_32, FIXARRAY, Tag, Tier};

impl<W: PackWrite> Encoder<W> {
    /// Begin an array of `nr` elements.
    ///
    /// Exactly `nr` items must follow, then [`Encoder::end_array`].
    /// A zero `nr` or one beyond [`ARRAY_ELMNR_MAX`] is a contract violation.
    pub fn begin_array(&mut self, nr: u32) -> Result<()> {
        debug_assert!(nr > 0, "empty array");
        debug_assert!(nr <= ARRAY_ELMNR_MAX, "too many array elements");
        let tier = Tier::array(nr);
        let tag = match tier {
            Tier::Inline => FIXARRAY,
            Tier::Len8|Tier::Len16 => ARRAY_16,
            Tier::Len32 => ARRAY_32
        };
        self.write_head(tag, tier, nr)?;
        self.open(nr.into());
        Ok(())
    }
    /// End the array begun last
    #[inline]
    pub fn end_array(&mut self) {
        self.close();
    }
}

impl<R: PackRead> Decoder<R> {
    /// Decode an array header, checking its count against `min..=max`.
    ///
    /// A zero count is `Err(Error::CorruptPayload)`, a count out of bounds is
    /// `Err(Error::SizeMismatch)` after its elements were discarded.
    fn decode_array_head(&mut self, min: u32, max: u32) -> Result<u32> {
        let nr = match self.fetch_tag()? {
            Tag::Array(tier, inline) => self.fetch_len(tier, inline)?,
            tag => return Err(self.reject(tag))
        };
        if nr == 0 {
            return Err(Error::CorruptPayload)
        }
        if nr < min || nr > max {
            log_debug!(nr, min, max, "array count mismatch");
            self.interrupt(nr.into())?;
            return Err(Error::SizeMismatch)
        }
        Ok(nr)
    }

    fn decode_array_items<E, F>(&mut self, min: u32, max: u32, mut decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u32) -> core::result::Result<(), E>
    {
        let nr = self.decode_array_head(min, max)?;
        for index in 0..nr {
            if let Err(err) = decode(self, index) {
                self.interrupt((nr - index - 1).into())?;
                return Err(err)
            }
        }
        Ok(nr)
    }

    /// Decode an array of any length, calling `decode` with each element's index.
    ///
    /// Return the number of elements on success.
    ///
    /// A callback error stops decoding and is returned as is. A discarding
    /// decoder skips the elements not visited yet first; if that fails the
    /// discard error is returned instead.
    pub fn decode_array<E, F>(&mut self, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u32) -> core::result::Result<(), E>
    {
        self.decode_array_items(1, ARRAY_ELMNR_MAX, decode)
    }
    /// Decode an array of exactly `nr` elements, see [`Decoder::decode_array`].
    pub fn decode_array_equ<E, F>(&mut self, nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u32) -> core::result::Result<(), E>
    {
        debug_assert!(nr > 0 && nr <= ARRAY_ELMNR_MAX);
        self.decode_array_items(nr, nr, decode)
    }
    /// Decode an array of `min_nr` elements at least, see [`Decoder::decode_array`].
    pub fn decode_array_min<E, F>(&mut self, min_nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u32) -> core::result::Result<(), E>
    {
        debug_assert!(min_nr > 0 && min_nr < ARRAY_ELMNR_MAX);
        self.decode_array_items(min_nr, ARRAY_ELMNR_MAX, decode)
    }
    /// Decode an array of `max_nr` elements at most, see [`Decoder::decode_array`].
    pub fn decode_array_max<E, F>(&mut self, max_nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u32) -> core::result::Result<(), E>
    {
        debug_assert!(max_nr > 0 && max_nr <= ARRAY_ELMNR_MAX);
        self.decode_array_items(1, max_nr, decode)
    }
    /// Decode an array of `min_nr..=max_nr` elements, see [`Decoder::decode_array`].
    pub fn decode_array_range<E, F>(&mut self, min_nr: u32, max_nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u32) -> core::result::Result<(), E>
    {
        debug_assert!(min_nr > 0);
        debug_assert!(min_nr < max_nr);
        debug_assert!(max_nr <= ARRAY_ELMNR_MAX);
        self.decode_array_items(min_nr, max_nr, decode)
    }
}
