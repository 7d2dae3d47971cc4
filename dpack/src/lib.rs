//! A size constrained MessagePack subset codec for [`dpack-io`](`dpack_io`) backends.
/*!

Messages are encoded item by item with an [`Encoder`] and decoded item by item
with a [`Decoder`]. There is no schema: both sides agree on the field
identifiers and their order out of band.

[`Encoder`] types:

| Rust type         | MessagePack type
|-------------------|--------------------
| `()`              | `nil`
| `bool`            | `bool`
| `u8`-`u64`        | `uint` (smallest representation)
| `i8`-`i64`        | `int`, `uint` (sm. repr.)
| `f32`             | `float-32`
| `f64`             | `float-64`
| `str`, `CStr`     | `str` (sm. repr., 1 byte at least)
| `[u8]`            | `bin` (sm. repr., 1 byte at least)
| array             | `array` (sm. repr., 1 element at least)
| field map         | `map` of `uint` field identifiers (sm. repr., 1 field at least)

[`Decoder`] types:

| MessagePack type    | Rust type
|---------------------|----------------------------------------
| `nil`               | `()`
| `bool`              | `bool`
| `fixint`, `int`     | `u8`-`u64`,`i8`-`i64` (range checked)
| `float-32`          | `f32` (not `NaN`)
| `float-64`          | `f64` (not `NaN`)
| `str`               | `String` with `std` or `alloc`, `&str` copied into a caller buffer
| `bin`               | `Vec<u8>` with `std` or `alloc`, `&[u8]` copied into a caller buffer
| `array`             | a callback per element
| `map`               | a callback per field
| `fixext`, `ext`     | Unsupported

Every variable sized item is decoded against a count or length policy: an exact
value (`_equ`), a lower bound (`_min`), an upper bound (`_max`) or both
(`_range`). A [`Decoder`] created with [`Decoder::new_discard`] skips over the
remains of rejected items so that decoding may go on past them.

[`size`] holds `const` functions computing encoded sizes ahead of encoding.

```
use dpack::{Encoder, Decoder, Error};

let mut buf = [0u8;16];
let mut enc = Encoder::from_slice(&mut buf);
enc.begin_map(2)?;
enc.encode_field_i8(0, -128)?;
enc.encode_field_str(1, "test")?;
enc.end_map();
let len = enc.finish()?.len();
assert_eq!(&buf[..len], b"\x82\x00\xd0\x80\x01\xa4test");

let mut dec = Decoder::from_slice(&buf[..len]);
let mut value = 0;
dec.decode_map_equ(2, |dec, fid| {
    match fid {
        0 => value = dec.decode_i8()?,
        1 => assert_eq!(dec.decode_str_copy(&mut [0u8;4])?, "test"),
        _ => return Err(Error::WrongType)
    }
    Ok::<_, Error>(())
})?;
assert_eq!(value, -128);
assert_eq!(dec.data_left(), 0);
# Ok::<(), Error>(())
```
*/
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

pub mod tag;
pub mod config;
pub mod size;
mod error;
mod enc;
mod dec;
mod scalar;
mod string;
mod bin;
mod array;
mod map;

pub use dpack_io;
pub use dpack_io::{PackWrite, PackRead, SliceWriter, SliceReader};

pub use error::{Error, Result};
pub use enc::Encoder;
pub use dec::Decoder;
