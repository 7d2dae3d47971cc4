//! Encoded sizes.
//!
//! Every function here is a `const fn` so that buffers may be sized at build
//! time, e.g.
//!
//! ```
//! use dpack::size::{map_size, field_size, str_size, FIELD_ID_SIZE_MAX, I16_SIZE_MAX};
//! const RECORD_SIZE: usize = map_size(2, FIELD_ID_SIZE_MAX + I16_SIZE_MAX + field_size(1, str_size(8)));
//! let buf = [0u8; RECORD_SIZE];
//! assert_eq!(buf.len(), 17);
//! ```
//!
//! The results are exactly what the encoders write for the same input.
use crate::config::{ARRAY_ELMNR_MAX, BINSZ_MAX, MAP_FLDID_MAX, MAP_FLDNR_MAX, STRLEN_MAX};
use crate::tag::{MAX_POSFIXINT, MIN_NEGFIXINT, Tier};

pub const NIL_SIZE: usize = 1;
pub const BOOL_SIZE: usize = 1;
pub const F32_SIZE: usize = 5;
pub const F64_SIZE: usize = 9;

pub const U8_SIZE_MIN: usize = 1;
pub const U8_SIZE_MAX: usize = uint_size(u8::MAX as u64);
pub const U16_SIZE_MIN: usize = 1;
pub const U16_SIZE_MAX: usize = uint_size(u16::MAX as u64);
pub const U32_SIZE_MIN: usize = 1;
pub const U32_SIZE_MAX: usize = uint_size(u32::MAX as u64);
pub const U64_SIZE_MIN: usize = 1;
pub const U64_SIZE_MAX: usize = uint_size(u64::MAX);

pub const I8_SIZE_MIN: usize = 1;
pub const I8_SIZE_MAX: usize = int_size(i8::MIN as i64);
pub const I16_SIZE_MIN: usize = 1;
pub const I16_SIZE_MAX: usize = int_size(i16::MIN as i64);
pub const I32_SIZE_MIN: usize = 1;
pub const I32_SIZE_MAX: usize = int_size(i32::MIN as i64);
pub const I64_SIZE_MIN: usize = 1;
pub const I64_SIZE_MAX: usize = int_size(i64::MIN);

/// The smallest encoded size of a field identifier.
pub const FIELD_ID_SIZE_MIN: usize = 1;
/// The largest encoded size of a field identifier.
pub const FIELD_ID_SIZE_MAX: usize = field_id_size(MAP_FLDID_MAX);

/// The encoded size of the unsigned integer `v`.
pub const fn uint_size(v: u64) -> usize {
    if v <= MAX_POSFIXINT as u64 { 1 }
    else if v <= u8::MAX as u64 { 2 }
    else if v <= u16::MAX as u64 { 3 }
    else if v <= u32::MAX as u64 { 5 }
    else { 9 }
}

/// The encoded size of the signed integer `v`.
pub const fn int_size(v: i64) -> usize {
    if v >= 0 {
        return uint_size(v as u64)
    }
    if v >= MIN_NEGFIXINT as i64 { 1 }
    else if v >= i8::MIN as i64 { 2 }
    else if v >= i16::MIN as i64 { 3 }
    else if v >= i32::MIN as i64 { 5 }
    else { 9 }
}

/// The encoded size of a string of `len` bytes, its header included.
pub const fn str_size(len: usize) -> usize {
    debug_assert!(len > 0 && len <= STRLEN_MAX);
    Tier::str(len).head_size() + len
}

/// The encoded size of a bin of `len` bytes, its header included.
pub const fn bin_size(len: usize) -> usize {
    debug_assert!(len > 0 && len <= BINSZ_MAX);
    Tier::bin(len).head_size() + len
}

/// The size of the header of an array of `nr` elements.
pub const fn array_head_size(nr: u32) -> usize {
    debug_assert!(nr > 0 && nr <= ARRAY_ELMNR_MAX);
    Tier::array(nr).head_size()
}

/// The encoded size of an array of `nr` elements of `elm_size` bytes each.
pub const fn array_size(elm_size: usize, nr: u32) -> usize {
    let head = array_head_size(nr);
    debug_assert!(elm_size <= (usize::MAX - head) / nr as usize, "array size overflow");
    head + elm_size * nr as usize
}

/// The encoded size of an array of `nr` elements whose encodings add up to
/// `data_size` bytes.
pub const fn array_mixed_size(nr: u32, data_size: usize) -> usize {
    debug_assert!(data_size >= nr as usize);
    array_head_size(nr) + data_size
}

/// The size of the header of a map of `nr` fields.
pub const fn map_head_size(nr: u32) -> usize {
    debug_assert!(nr > 0 && nr <= MAP_FLDNR_MAX);
    Tier::map(nr).head_size()
}

/// The encoded size of a map of `nr` fields whose encodings, identifiers
/// included, add up to `data_size` bytes.
pub const fn map_size(nr: u32, data_size: usize) -> usize {
    debug_assert!(data_size >= 2 * nr as usize);
    map_head_size(nr) + data_size
}

/// The encoded size of the field identifier `id`.
pub const fn field_id_size(id: u16) -> usize {
    debug_assert!(id <= MAP_FLDID_MAX);
    uint_size(id as u64)
}

/// The encoded size of field `id` with a value of `value_size` bytes.
pub const fn field_size(id: u16, value_size: usize) -> usize {
    field_id_size(id) + value_size
}
