//! MessagePack tag bytes and length tiers.
//!
//! Every encoded item starts with a single tag byte. For strings, bins,
//! arrays and maps the tag also selects a [`Tier`]: either the length is
//! embedded in the tag's low bits or it follows the tag as a big-endian
//! unsigned field of 1, 2 or 4 bytes.

/* MessagePack MAGICK */
pub const MIN_POSFIXINT: u8 = 0x00;
pub const MAX_POSFIXINT: u8 = 0x7f;
pub const NEGFIXINT: u8 = 0b11100000;
pub const MIN_NEGFIXINT: i8 = NEGFIXINT as i8; //-32
pub const NIL: u8      = 0xc0;
pub const RESERVED: u8 = 0xc1;
pub const FALSE: u8    = 0xc2;
pub const TRUE: u8     = 0xc3;

pub const FIXMAP: u8   = 0x80; /* 1000xxxx */
pub const MAX_FIXMAP_SIZE: u32 = 0b1111;
pub const FIXMAP_MAX: u8 = FIXMAP + MAX_FIXMAP_SIZE as u8; /* 10001111 */

pub const FIXARRAY: u8 = 0x90; /* 1001xxxx */
pub const MAX_FIXARRAY_SIZE: u32 = 0b1111;
pub const FIXARRAY_MAX: u8 = FIXARRAY + MAX_FIXARRAY_SIZE as u8; /* 10011111 */

pub const FIXSTR: u8   = 0xa0; /* 101xxxxx */
pub const MAX_FIXSTR_SIZE: usize = 0b11111;
pub const FIXSTR_MAX: u8 = FIXSTR + MAX_FIXSTR_SIZE as u8; /* 10111111 */

pub const BIN_8: u8     = 0xc4;
pub const BIN_16: u8    = 0xc5;
pub const BIN_32: u8    = 0xc6;

pub const EXT_8: u8     = 0xc7;
pub const EXT_16: u8    = 0xc8;
pub const EXT_32: u8    = 0xc9;

pub const FLOAT_32: u8  = 0xca;
pub const FLOAT_64: u8  = 0xcb;

pub const UINT_8: u8    = 0xcc;
pub const UINT_16: u8   = 0xcd;
pub const UINT_32: u8   = 0xce;
pub const UINT_64: u8   = 0xcf;

pub const INT_8: u8     = 0xd0;
pub const INT_16: u8    = 0xd1;
pub const INT_32: u8    = 0xd2;
pub const INT_64: u8    = 0xd3;

pub const FIXEXT_1: u8  = 0xd4;
pub const FIXEXT_2: u8  = 0xd5;
pub const FIXEXT_4: u8  = 0xd6;
pub const FIXEXT_8: u8  = 0xd7;
pub const FIXEXT_16: u8 = 0xd8;

pub const STR_8: u8     = 0xd9;
pub const STR_16: u8    = 0xda;
pub const STR_32: u8    = 0xdb;

pub const ARRAY_16: u8  = 0xdc;
pub const ARRAY_32: u8  = 0xdd;

pub const MAP_16: u8    = 0xde;
pub const MAP_32: u8    = 0xdf;

/// The width class of a count or length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Embedded in the tag byte
    Inline,
    /// One trailing byte
    Len8,
    /// Two trailing bytes
    Len16,
    /// Four trailing bytes
    Len32,
}

impl Tier {
    /// The number of length bytes following the tag.
    #[inline]
    pub const fn len_size(self) -> usize {
        match self {
            Tier::Inline => 0,
            Tier::Len8 => 1,
            Tier::Len16 => 2,
            Tier::Len32 => 4,
        }
    }
    /// The number of header bytes, the tag included.
    #[inline]
    pub const fn head_size(self) -> usize {
        1 + self.len_size()
    }
    /// The smallest tier for an array of `nr` elements.
    pub const fn array(nr: u32) -> Tier {
        if nr <= MAX_FIXARRAY_SIZE {
            Tier::Inline
        }
        else if nr <= u16::MAX as u32 {
            Tier::Len16
        }
        else {
            Tier::Len32
        }
    }
    /// The smallest tier for a map of `nr` fields.
    pub const fn map(nr: u32) -> Tier {
        if nr <= MAX_FIXMAP_SIZE {
            Tier::Inline
        }
        else if nr <= u16::MAX as u32 {
            Tier::Len16
        }
        else {
            Tier::Len32
        }
    }
    /// The smallest tier for a string of `len` bytes.
    pub const fn str(len: usize) -> Tier {
        if len <= MAX_FIXSTR_SIZE {
            Tier::Inline
        }
        else {
            Tier::sized(len)
        }
    }
    /// The smallest tier for a bin of `len` bytes.
    pub const fn bin(len: usize) -> Tier {
        Tier::sized(len)
    }

    const fn sized(len: usize) -> Tier {
        if len <= u8::MAX as usize {
            Tier::Len8
        }
        else if len <= u16::MAX as usize {
            Tier::Len16
        }
        else {
            Tier::Len32
        }
    }
}

/// A classified tag byte.
///
/// Inline variants carry the value or the count embedded in the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Nil,
    False,
    True,
    PosFixInt(u8),
    NegFixInt(i8),
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Str(Tier, u8),
    Bin(Tier),
    Array(Tier, u8),
    Map(Tier, u8),
    /// A fixext tag with the size of its body, the type byte included
    FixExt(u8),
    Ext(Tier),
    Reserved,
}

impl Tag {
    /// Classify a tag byte.
    pub const fn from_byte(code: u8) -> Tag {
        match code {
            MIN_POSFIXINT..=MAX_POSFIXINT => Tag::PosFixInt(code),
            FIXMAP..=FIXMAP_MAX => Tag::Map(Tier::Inline, code & MAX_FIXMAP_SIZE as u8),
            FIXARRAY..=FIXARRAY_MAX => Tag::Array(Tier::Inline, code & MAX_FIXARRAY_SIZE as u8),
            FIXSTR..=FIXSTR_MAX => Tag::Str(Tier::Inline, code & MAX_FIXSTR_SIZE as u8),
            NIL => Tag::Nil,
            RESERVED => Tag::Reserved,
            FALSE => Tag::False,
            TRUE => Tag::True,
            BIN_8 => Tag::Bin(Tier::Len8),
            BIN_16 => Tag::Bin(Tier::Len16),
            BIN_32 => Tag::Bin(Tier::Len32),
            EXT_8 => Tag::Ext(Tier::Len8),
            EXT_16 => Tag::Ext(Tier::Len16),
            EXT_32 => Tag::Ext(Tier::Len32),
            FLOAT_32 => Tag::Float32,
            FLOAT_64 => Tag::Float64,
            UINT_8 => Tag::Uint8,
            UINT_16 => Tag::Uint16,
            UINT_32 => Tag::Uint32,
            UINT_64 => Tag::Uint64,
            INT_8 => Tag::Int8,
            INT_16 => Tag::Int16,
            INT_32 => Tag::Int32,
            INT_64 => Tag::Int64,
            FIXEXT_1 => Tag::FixExt(2),
            FIXEXT_2 => Tag::FixExt(3),
            FIXEXT_4 => Tag::FixExt(5),
            FIXEXT_8 => Tag::FixExt(9),
            FIXEXT_16 => Tag::FixExt(17),
            STR_8 => Tag::Str(Tier::Len8, 0),
            STR_16 => Tag::Str(Tier::Len16, 0),
            STR_32 => Tag::Str(Tier::Len32, 0),
            ARRAY_16 => Tag::Array(Tier::Len16, 0),
            ARRAY_32 => Tag::Array(Tier::Len32, 0),
            MAP_16 => Tag::Map(Tier::Len16, 0),
            MAP_32 => Tag::Map(Tier::Len32, 0),
            NEGFIXINT..=0xff => Tag::NegFixInt(code as i8),
        }
    }

    /// The size of the fixed body following the tag, for tags that have one.
    ///
    /// Returns `None` for tags followed by a length field.
    pub const fn fixed_body_size(self) -> Option<usize> {
        match self {
            Tag::Nil|
            Tag::False|
            Tag::True|
            Tag::PosFixInt(_)|
            Tag::NegFixInt(_) => Some(0),
            Tag::Uint8|Tag::Int8 => Some(1),
            Tag::Uint16|Tag::Int16 => Some(2),
            Tag::Uint32|Tag::Int32|Tag::Float32 => Some(4),
            Tag::Uint64|Tag::Int64|Tag::Float64 => Some(8),
            Tag::FixExt(size) => Some(size as usize),
            Tag::Str(Tier::Inline, len) => Some(len as usize),
            Tag::Array(Tier::Inline, 0)|Tag::Map(Tier::Inline, 0) => Some(0),
            _ => None
        }
    }

    /// The tier selected by a str, bin, array, map or ext tag.
    pub const fn tier(self) -> Option<Tier> {
        match self {
            Tag::Str(tier, _)|
            Tag::Bin(tier)|
            Tag::Array(tier, _)|
            Tag::Map(tier, _)|
            Tag::Ext(tier) => Some(tier),
            _ => None
        }
    }

    /// Return `true` for extension types, which are recognized but never decoded.
    #[inline]
    pub const fn is_ext(self) -> bool {
        matches!(self, Tag::FixExt(_)|Tag::Ext(_))
    }
}

impl From<u8> for Tag {
    #[inline]
    fn from(code: u8) -> Self {
        Tag::from_byte(code)
    }
}
