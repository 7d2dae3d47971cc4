//! Field maps.
//!
//! A map is a header announcing its field count followed by that many
//! pairs of a field identifier and a value. Field identifiers are
//! unsigned integers up to [`MAP_FLDID_MAX`], values are items of any type,
//! nested arrays and maps included.
use core::ffi::CStr;

use dpack_io::{PackRead, PackWrite};

use crate::config::{MAP_FLDID_MAX, MAP_FLDNR_MAX};
use crate::dec::Decoder;
use crate::enc::Encoder;
use crate::error::{Error, Result};
use crate::tag::{FIXMAP, MAP_16, MAP_32, Tag, Tier};

impl<W: PackWrite> Encoder<W> {
    /// Begin a map of `nr` fields.
    ///
    /// Exactly `nr` fields must follow, then [`Encoder::end_map`].
    /// A zero `nr` or one beyond [`MAP_FLDNR_MAX`] is a contract violation.
    pub fn begin_map(&mut self, nr: u32) -> Result<()> {
        debug_assert!(nr > 0, "empty map");
        debug_assert!(nr <= MAP_FLDNR_MAX, "too many map fields");
        let tier = Tier::map(nr);
        let tag = match tier {
            Tier::Inline => FIXMAP,
            Tier::Len8|Tier::Len16 => MAP_16,
            Tier::Len32 => MAP_32
        };
        self.write_head(tag, tier, nr)?;
        self.open(2 * u64::from(nr));
        Ok(())
    }
    /// End the map begun last
    #[inline]
    pub fn end_map(&mut self) {
        self.close();
    }
    /// Encode a field identifier, to be followed by the field's value
    pub fn encode_field_id(&mut self, id: u16) -> Result<()> {
        debug_assert!(id <= MAP_FLDID_MAX, "field identifier out of range");
        self.encode_u16(id)
    }
    /// Encode a `nil` field
    pub fn encode_field_nil(&mut self, id: u16) -> Result<()> {
        self.encode_field_id(id)?;
        self.encode_nil()
    }
    /// Encode a string field, see [`Encoder::encode_str`]
    pub fn encode_field_str(&mut self, id: u16, v: &str) -> Result<()> {
        self.encode_field_id(id)?;
        self.encode_str(v)
    }
    /// Encode a NUL terminated string field, see [`Encoder::encode_cstr`]
    pub fn encode_field_cstr(&mut self, id: u16, v: &CStr) -> Result<()> {
        self.encode_field_id(id)?;
        self.encode_cstr(v)
    }
    /// Encode a bin field, see [`Encoder::encode_bin`]
    pub fn encode_field_bin(&mut self, id: u16, v: &[u8]) -> Result<()> {
        self.encode_field_id(id)?;
        self.encode_bin(v)
    }
    /// Begin an array of `nr` elements as the value of field `id`
    pub fn begin_field_array(&mut self, id: u16, nr: u32) -> Result<()> {
        self.encode_field_id(id)?;
        self.begin_array(nr)
    }
    /// Begin a map of `nr` fields as the value of field `id`
    pub fn begin_field_map(&mut self, id: u16, nr: u32) -> Result<()> {
        self.encode_field_id(id)?;
        self.begin_map(nr)
    }
}

macro_rules! implement_encode_field {
    ($($name:ident, $encode:ident, $ty:ty;)*) => {$(
        #[doc = concat!("Encode an `", stringify!($ty), "` field")]
        pub fn $name(&mut self, id: u16, v: $ty) -> Result<()> {
            self.encode_field_id(id)?;
            self.$encode(v)
        }
    )*};
}

impl<W: PackWrite> Encoder<W> {
    implement_encode_field! {
        encode_field_bool, encode_bool, bool;
        encode_field_u8, encode_u8, u8;
        encode_field_u16, encode_u16, u16;
        encode_field_u32, encode_u32, u32;
        encode_field_u64, encode_u64, u64;
        encode_field_i8, encode_i8, i8;
        encode_field_i16, encode_i16, i16;
        encode_field_i32, encode_i32, i32;
        encode_field_i64, encode_i64, i64;
        encode_field_f32, encode_f32, f32;
        encode_field_f64, encode_f64, f64;
    }
}

impl<R: PackRead> Decoder<R> {
    /// Decode a field identifier.
    ///
    /// An identifier beyond [`MAP_FLDID_MAX`] is `Err(Error::InvalidRange)`.
    pub fn decode_field_id(&mut self) -> Result<u16> {
        self.decode_u16_max(MAP_FLDID_MAX)
    }

    /// Decode a map header, checking its field count against `min..=max`.
    ///
    /// A zero count is `Err(Error::CorruptPayload)`, a count out of bounds is
    /// `Err(Error::SizeMismatch)` after its fields were discarded.
    fn decode_map_head(&mut self, min: u32, max: u32) -> Result<u32> {
        let nr = match self.fetch_tag()? {
            Tag::Map(tier, inline) => self.fetch_len(tier, inline)?,
            tag => return Err(self.reject(tag))
        };
        if nr == 0 {
            return Err(Error::CorruptPayload)
        }
        if nr < min || nr > max {
            log_debug!(nr, min, max, "map count mismatch");
            self.interrupt(2 * u64::from(nr))?;
            return Err(Error::SizeMismatch)
        }
        Ok(nr)
    }

    fn decode_map_fields<E, F>(&mut self, min: u32, max: u32, mut decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u16) -> core::result::Result<(), E>
    {
        let nr = self.decode_map_head(min, max)?;
        // wire items left, identifiers and values
        let mut pending = 2 * u64::from(nr);
        while pending > 0 {
            let fid = self.decode_field_id();
            pending -= 1;
            let fid = match fid {
                Ok(fid) => fid,
                Err(err) => {
                    self.interrupt(pending)?;
                    return Err(err.into())
                }
            };
            let res = decode(self, fid);
            pending -= 1;
            if let Err(err) = res {
                self.interrupt(pending)?;
                return Err(err)
            }
        }
        Ok(nr)
    }

    /// Decode a map of any number of fields, calling `decode` with each
    /// field's identifier. The callback decodes the field's value.
    ///
    /// Return the number of fields on success.
    ///
    /// Both a callback error and an invalid field identifier stop decoding
    /// and are returned. A discarding decoder skips the fields not visited
    /// yet first; if that fails the discard error is returned instead.
    pub fn decode_map<E, F>(&mut self, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u16) -> core::result::Result<(), E>
    {
        self.decode_map_fields(1, MAP_FLDNR_MAX, decode)
    }
    /// Decode a map of exactly `nr` fields, see [`Decoder::decode_map`].
    pub fn decode_map_equ<E, F>(&mut self, nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u16) -> core::result::Result<(), E>
    {
        debug_assert!(nr > 0 && nr <= MAP_FLDNR_MAX);
        self.decode_map_fields(nr, nr, decode)
    }
    /// Decode a map of `min_nr` fields at least, see [`Decoder::decode_map`].
    pub fn decode_map_min<E, F>(&mut self, min_nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u16) -> core::result::Result<(), E>
    {
        debug_assert!(min_nr > 0 && min_nr < MAP_FLDNR_MAX);
        self.decode_map_fields(min_nr, MAP_FLDNR_MAX, decode)
    }
    /// Decode a map of `max_nr` fields at most, see [`Decoder::decode_map`].
    pub fn decode_map_max<E, F>(&mut self, max_nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u16) -> core::result::Result<(), E>
    {
        debug_assert!(max_nr > 0 && max_nr <= MAP_FLDNR_MAX);
        self.decode_map_fields(1, max_nr, decode)
    }
    /// Decode a map of `min_nr..=max_nr` fields, see [`Decoder::decode_map`].
    pub fn decode_map_range<E, F>(&mut self, min_nr: u32, max_nr: u32, decode: F) -> core::result::Result<u32, E>
        where E: From<Error>,
              F: FnMut(&mut Self, u16) -> core::result::Result<(), E>
    {
        debug_assert!(min_nr > 0);
        debug_assert!(min_nr < max_nr);
        debug_assert!(max_nr <= MAP_FLDNR_MAX);
        self.decode_map_fields(min_nr, max_nr, decode)
    }
}
