//! Build time limits.
//!
//! Decoders reject counts and lengths beyond these limits with
//! [`Error::SizeMismatch`](crate::Error::SizeMismatch), encoders treat them as
//! caller contract violations.
use crate::tag::{MAX_FIXARRAY_SIZE, MAX_FIXMAP_SIZE, MAX_FIXSTR_SIZE};

/// The maximum number of elements of an array.
pub const ARRAY_ELMNR_MAX: u32 = u32::MAX;

/// The maximum number of fields of a map.
///
/// Half of the 32-bit tier, so that the number of wire items of a map
/// (a field identifier plus a value per field) still fits the tier's count.
pub const MAP_FLDNR_MAX: u32 = u32::MAX / 2;

/// The maximum value of a map field identifier.
pub const MAP_FLDID_MAX: u16 = 1024;

/// The maximum length of a string in bytes.
pub const STRLEN_MAX: usize = 4 * 1024 * 1024;

/// The maximum length of a bin in bytes.
pub const BINSZ_MAX: usize = 4 * 1024 * 1024;

/// The depth up to which debug builds check encoder nesting.
pub const NEST_CHECK_DEPTH: usize = 32;

const _: () = assert!(ARRAY_ELMNR_MAX > MAX_FIXARRAY_SIZE);
const _: () = assert!(MAP_FLDNR_MAX > MAX_FIXMAP_SIZE);
const _: () = assert!(MAP_FLDNR_MAX <= u32::MAX / 2);
const _: () = assert!(MAP_FLDID_MAX as u32 <= u16::MAX as u32);
const _: () = assert!(STRLEN_MAX >= 16);
const _: () = assert!(STRLEN_MAX > MAX_FIXSTR_SIZE);
const _: () = assert!(STRLEN_MAX as u64 <= u32::MAX as u64);
const _: () = assert!(STRLEN_MAX <= isize::MAX as usize);
const _: () = assert!(BINSZ_MAX >= 16);
const _: () = assert!(BINSZ_MAX as u64 <= u32::MAX as u64);
const _: () = assert!(BINSZ_MAX <= isize::MAX as usize);
const _: () = assert!(NEST_CHECK_DEPTH > 0);
