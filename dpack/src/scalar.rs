//! Booleans, nil, integers and floats.
use dpack_io::{PackRead, PackWrite};

use crate::dec::Decoder;
use crate::enc::Encoder;
use crate::error::{Error, Result};
use crate::tag::*;

/// An integer as found on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WireInt {
    Unsigned(u64),
    Signed(i64),
}

impl<W: PackWrite> Encoder<W> {
    /// Encode `nil`
    pub fn encode_nil(&mut self) -> Result<()> {
        self.write_byte(NIL)?;
        self.commit();
        Ok(())
    }
    /// Encode a boolean
    pub fn encode_bool(&mut self, v: bool) -> Result<()> {
        self.write_byte(if v { TRUE } else { FALSE })?;
        self.commit();
        Ok(())
    }
    /// Encode an unsigned integer using its smallest representation
    pub fn encode_u64(&mut self, v: u64) -> Result<()> {
        if v <= MAX_POSFIXINT as u64 {
            self.write_byte(v as u8)?
        }
        else if let Ok(v) = u8::try_from(v) {
            self.write(&[UINT_8, v])?
        }
        else if let Ok(v) = u16::try_from(v) {
            self.write_int(UINT_16, &v.to_be_bytes())?
        }
        else if let Ok(v) = u32::try_from(v) {
            self.write_int(UINT_32, &v.to_be_bytes())?
        }
        else {
            self.write_int(UINT_64, &v.to_be_bytes())?
        }
        self.commit();
        Ok(())
    }
    /// Encode a signed integer using its smallest representation
    ///
    /// Non-negative values are encoded as unsigned integers.
    pub fn encode_i64(&mut self, v: i64) -> Result<()> {
        if v >= 0 {
            return self.encode_u64(v as u64)
        }
        if v >= MIN_NEGFIXINT as i64 {
            self.write_byte(v as u8)?
        }
        else if let Ok(v) = i8::try_from(v) {
            self.write(&[INT_8, v as u8])?
        }
        else if let Ok(v) = i16::try_from(v) {
            self.write_int(INT_16, &v.to_be_bytes())?
        }
        else if let Ok(v) = i32::try_from(v) {
            self.write_int(INT_32, &v.to_be_bytes())?
        }
        else {
            self.write_int(INT_64, &v.to_be_bytes())?
        }
        self.commit();
        Ok(())
    }
    /// Encode a single precision float, `NaN` being a contract violation
    pub fn encode_f32(&mut self, v: f32) -> Result<()> {
        debug_assert!(!v.is_nan(), "NaN can't be encoded");
        self.write_float(FLOAT_32, &v.to_be_bytes())
    }
    /// Encode a double precision float, `NaN` being a contract violation
    pub fn encode_f64(&mut self, v: f64) -> Result<()> {
        debug_assert!(!v.is_nan(), "NaN can't be encoded");
        self.write_float(FLOAT_64, &v.to_be_bytes())
    }

    fn write_int(&mut self, tag: u8, be: &[u8]) -> Result<()> {
        let mut buf = [tag;9];
        buf[1..=be.len()].copy_from_slice(be);
        self.write(&buf[..=be.len()])
    }

    fn write_float(&mut self, tag: u8, be: &[u8]) -> Result<()> {
        self.write_int(tag, be)?;
        self.commit();
        Ok(())
    }
}

macro_rules! implement_encode_int {
    ($($name:ident, $ty:ty, $via:ident;)*) => {$(
        #[doc = concat!("Encode an `", stringify!($ty), "` using its smallest representation")]
        #[inline]
        pub fn $name(&mut self, v: $ty) -> Result<()> {
            self.$via(v.into())
        }
    )*};
}

impl<W: PackWrite> Encoder<W> {
    implement_encode_int! {
        encode_u8, u8, encode_u64;
        encode_u16, u16, encode_u64;
        encode_u32, u32, encode_u64;
        encode_i8, i8, encode_i64;
        encode_i16, i16, encode_i64;
        encode_i32, i32, encode_i64;
    }
}

impl<R: PackRead> Decoder<R> {
    /// Decode `nil`
    pub fn decode_nil(&mut self) -> Result<()> {
        match self.fetch_tag()? {
            Tag::Nil => Ok(()),
            tag => Err(self.reject(tag))
        }
    }
    /// Decode a boolean
    pub fn decode_bool(&mut self) -> Result<bool> {
        match self.fetch_tag()? {
            Tag::False => Ok(false),
            Tag::True => Ok(true),
            tag => Err(self.reject(tag))
        }
    }
    /// Decode a single precision float.
    ///
    /// A `NaN` and a double precision float are both `Err(Error::WrongType)`.
    pub fn decode_f32(&mut self) -> Result<f32> {
        let v = match self.fetch_tag()? {
            Tag::Float32 => self.fetch_f32()?,
            tag => return Err(self.reject(tag))
        };
        if v.is_nan() {
            return Err(Error::WrongType)
        }
        Ok(v)
    }
    /// Decode a double precision float.
    ///
    /// A `NaN` and a single precision float are both `Err(Error::WrongType)`.
    pub fn decode_f64(&mut self) -> Result<f64> {
        let v = match self.fetch_tag()? {
            Tag::Float64 => self.fetch_f64()?,
            tag => return Err(self.reject(tag))
        };
        if v.is_nan() {
            return Err(Error::WrongType)
        }
        Ok(v)
    }

    fn decode_wire_int(&mut self) -> Result<WireInt> {
        use WireInt::*;
        Ok(match self.fetch_tag()? {
            Tag::PosFixInt(v) => Unsigned(v.into()),
            Tag::NegFixInt(v) => Signed(v.into()),
            Tag::Uint8 => Unsigned(self.fetch_u8()?.into()),
            Tag::Uint16 => Unsigned(self.fetch_u16()?.into()),
            Tag::Uint32 => Unsigned(self.fetch_u32()?.into()),
            Tag::Uint64 => Unsigned(self.fetch_u64()?),
            Tag::Int8 => Signed(self.fetch_i8()?.into()),
            Tag::Int16 => Signed(self.fetch_i16()?.into()),
            Tag::Int32 => Signed(self.fetch_i32()?.into()),
            Tag::Int64 => Signed(self.fetch_i64()?),
            tag => return Err(self.reject(tag))
        })
    }

    /// Decode any integer with a non-negative value into `N`.
    ///
    /// Negative values are `Err(Error::WrongType)`, values not fitting `N`
    /// are `Err(Error::InvalidRange)`.
    fn decode_unsigned<N: TryFrom<u64>>(&mut self) -> Result<N> {
        let v = match self.decode_wire_int()? {
            WireInt::Unsigned(v) => v,
            WireInt::Signed(v) => u64::try_from(v).map_err(|_| Error::WrongType)?
        };
        N::try_from(v).map_err(|_| Error::InvalidRange)
    }

    /// Decode any integer into `N`, values not fitting `N` being `Err(Error::InvalidRange)`.
    fn decode_signed<N: TryFrom<i64>>(&mut self) -> Result<N> {
        let v = match self.decode_wire_int()? {
            WireInt::Unsigned(v) => i64::try_from(v).map_err(|_| Error::InvalidRange)?,
            WireInt::Signed(v) => v
        };
        N::try_from(v).map_err(|_| Error::InvalidRange)
    }
}

/// Decoded values are checked against the bounds after being consumed,
/// out of bounds values are `Err(Error::InvalidRange)`.
macro_rules! implement_decode_bounded {
    ($ty:ty, $decode:ident, $min:ident, $max:ident, $range:ident) => {
        #[doc = concat!("Decode an `", stringify!($ty), "` greater than or equal to `low`")]
        pub fn $min(&mut self, low: $ty) -> Result<$ty> {
            debug_assert!(low > <$ty>::MIN);
            let v = self.$decode()?;
            if v < low {
                return Err(Error::InvalidRange)
            }
            Ok(v)
        }
        #[doc = concat!("Decode an `", stringify!($ty), "` less than or equal to `high`")]
        pub fn $max(&mut self, high: $ty) -> Result<$ty> {
            debug_assert!(high < <$ty>::MAX);
            let v = self.$decode()?;
            if v > high {
                return Err(Error::InvalidRange)
            }
            Ok(v)
        }
        #[doc = concat!("Decode an `", stringify!($ty), "` within `low..=high`")]
        pub fn $range(&mut self, low: $ty, high: $ty) -> Result<$ty> {
            debug_assert!(low > <$ty>::MIN);
            debug_assert!(low < high);
            debug_assert!(high < <$ty>::MAX);
            let v = self.$decode()?;
            if v < low || v > high {
                return Err(Error::InvalidRange)
            }
            Ok(v)
        }
    };
}

macro_rules! implement_decode_int {
    ($($ty:ty, $via:ident, $decode:ident, $min:ident, $max:ident, $range:ident;)*) => {$(
        #[doc = concat!("Decode an `", stringify!($ty), "`")]
        #[inline]
        pub fn $decode(&mut self) -> Result<$ty> {
            self.$via()
        }
        implement_decode_bounded!($ty, $decode, $min, $max, $range);
    )*};
}

macro_rules! implement_decode_float {
    ($($ty:ty, $decode:ident, $min:ident, $max:ident, $range:ident;)*) => {$(
        #[doc = concat!("Decode an `", stringify!($ty), "` greater than or equal to `low`")]
        pub fn $min(&mut self, low: $ty) -> Result<$ty> {
            debug_assert!(low.is_finite());
            let v = self.$decode()?;
            if v < low {
                return Err(Error::InvalidRange)
            }
            Ok(v)
        }
        #[doc = concat!("Decode an `", stringify!($ty), "` less than or equal to `high`")]
        pub fn $max(&mut self, high: $ty) -> Result<$ty> {
            debug_assert!(high.is_finite());
            let v = self.$decode()?;
            if v > high {
                return Err(Error::InvalidRange)
            }
            Ok(v)
        }
        #[doc = concat!("Decode an `", stringify!($ty), "` within `low..=high`")]
        pub fn $range(&mut self, low: $ty, high: $ty) -> Result<$ty> {
            debug_assert!(low.is_finite() && high.is_finite());
            debug_assert!(low < high);
            let v = self.$decode()?;
            if v < low || v > high {
                return Err(Error::InvalidRange)
            }
            Ok(v)
        }
    )*};
}

impl<R: PackRead> Decoder<R> {
    implement_decode_int! {
        u8, decode_unsigned, decode_u8, decode_u8_min, decode_u8_max, decode_u8_range;
        u16, decode_unsigned, decode_u16, decode_u16_min, decode_u16_max, decode_u16_range;
        u32, decode_unsigned, decode_u32, decode_u32_min, decode_u32_max, decode_u32_range;
        u64, decode_unsigned, decode_u64, decode_u64_min, decode_u64_max, decode_u64_range;
        i8, decode_signed, decode_i8, decode_i8_min, decode_i8_max, decode_i8_range;
        i16, decode_signed, decode_i16, decode_i16_min, decode_i16_max, decode_i16_range;
        i32, decode_signed, decode_i32, decode_i32_min, decode_i32_max, decode_i32_range;
        i64, decode_signed, decode_i64, decode_i64_min, decode_i64_max, decode_i64_range;
    }
    implement_decode_float! {
        f32, decode_f32, decode_f32_min, decode_f32_max, decode_f32_range;
        f64, decode_f64, decode_f64_min, decode_f64_max, decode_f64_range;
    }
}
