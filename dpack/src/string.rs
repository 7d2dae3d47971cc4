//! Strings.
//!
//! A string holds 1 to [`STRLEN_MAX`] bytes of UTF-8 without any NUL byte.
//! The wire payload is not NUL terminated.
use core::ffi::CStr;

#[cfg(feature = "std")]
use std::string::String;
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::string::String;

use dpack_io::{PackRead, PackWrite};

use crate::config::STRLEN_MAX;
use crate::dec::Decoder;
use crate::enc::Encoder;
use crate::error::{Error, Result};
use crate::tag::{FIXSTR, STR_8, STR_16, STR_32, Tag, Tier};

impl<W: PackWrite> Encoder<W> {
    /// Encode a string.
    ///
    /// An empty string, a string longer than [`STRLEN_MAX`] bytes or one
    /// holding a NUL byte is a contract violation.
    pub fn encode_str(&mut self, v: &str) -> Result<()> {
        debug_assert!(!v.as_bytes().contains(&0), "string holds a NUL byte");
        self.write_str_bytes(v.as_bytes())
    }
    /// Encode a NUL terminated string, the terminator excluded.
    ///
    /// An empty string, a string longer than [`STRLEN_MAX`] bytes or one
    /// holding invalid UTF-8 is a contract violation.
    pub fn encode_cstr(&mut self, v: &CStr) -> Result<()> {
        debug_assert!(v.to_str().is_ok(), "string is not valid UTF-8");
        self.write_str_bytes(v.to_bytes())
    }

    fn write_str_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let len = bytes.len();
        debug_assert!(len > 0, "empty string");
        debug_assert!(len <= STRLEN_MAX, "string too long");
        let tier = Tier::str(len);
        let tag = match tier {
            Tier::Inline => FIXSTR,
            Tier::Len8 => STR_8,
            Tier::Len16 => STR_16,
            Tier::Len32 => STR_32
        };
        if tier.head_size() + len > self.space_left() {
            self.fail();
            return Err(Error::NotEnoughSpace)
        }
        self.write_head(tag, tier, len as u32)?;
        self.write(bytes)?;
        self.commit();
        Ok(())
    }
}

fn check_str(bytes: &[u8]) -> Result<&str> {
    if bytes.contains(&0) {
        return Err(Error::CorruptPayload)
    }
    core::str::from_utf8(bytes).map_err(|_| Error::CorruptPayload)
}

impl<R: PackRead> Decoder<R> {
    fn decode_str_len(&mut self, min: usize, max: usize) -> Result<usize> {
        match self.fetch_tag()? {
            Tag::Str(tier, inline) => {
                let len = self.fetch_len(tier, inline)?;
                self.check_payload(len, min, max)
            }
            tag => Err(self.reject(tag))
        }
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    fn decode_str_vec(&mut self, min: usize, max: usize) -> Result<String> {
        let len = self.decode_str_len(min, max)?;
        let bytes = self.fetch_payload_vec(len)?;
        check_str(&bytes)?;
        String::from_utf8(bytes).map_err(|_| Error::CorruptPayload)
    }

    /// Decode a string of any length into a new `String`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_str_dup(&mut self) -> Result<String> {
        self.decode_str_vec(1, STRLEN_MAX)
    }
    /// Decode a string of exactly `len` bytes into a new `String`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_str_dup_equ(&mut self, len: usize) -> Result<String> {
        debug_assert!(len > 0 && len <= STRLEN_MAX);
        self.decode_str_vec(len, len)
    }
    /// Decode a string of `min_len` bytes at least into a new `String`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_str_dup_min(&mut self, min_len: usize) -> Result<String> {
        debug_assert!(min_len > 0 && min_len < STRLEN_MAX);
        self.decode_str_vec(min_len, STRLEN_MAX)
    }
    /// Decode a string of `max_len` bytes at most into a new `String`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_str_dup_max(&mut self, max_len: usize) -> Result<String> {
        debug_assert!(max_len > 0 && max_len <= STRLEN_MAX);
        self.decode_str_vec(1, max_len)
    }
    /// Decode a string of `min_len..=max_len` bytes into a new `String`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_str_dup_range(&mut self, min_len: usize, max_len: usize) -> Result<String> {
        debug_assert!(min_len > 0);
        debug_assert!(min_len < max_len);
        debug_assert!(max_len <= STRLEN_MAX);
        self.decode_str_vec(min_len, max_len)
    }

    fn decode_str_into<'d>(&mut self, min: usize, dest: &'d mut [u8]) -> Result<&'d str> {
        let max = dest.len().min(STRLEN_MAX);
        let len = self.decode_str_len(min, max)?;
        let bytes = self.fetch_payload_into(len, dest)?;
        check_str(bytes)
    }

    /// Decode a string into `dest`, returning the filled part.
    ///
    /// A string longer than `dest` is `Err(Error::SizeMismatch)`.
    pub fn decode_str_copy<'d>(&mut self, dest: &'d mut [u8]) -> Result<&'d str> {
        debug_assert!(!dest.is_empty());
        self.decode_str_into(1, dest)
    }
    /// Decode a string filling the whole of `dest`.
    pub fn decode_str_copy_equ<'d>(&mut self, dest: &'d mut [u8]) -> Result<&'d str> {
        debug_assert!(!dest.is_empty() && dest.len() <= STRLEN_MAX);
        let len = dest.len();
        self.decode_str_into(len, dest)
    }
    /// Decode a string of `min_len` bytes at least into `dest`, returning the filled part.
    pub fn decode_str_copy_range<'d>(&mut self, min_len: usize, dest: &'d mut [u8]) -> Result<&'d str> {
        debug_assert!(min_len > 0);
        debug_assert!(min_len < dest.len());
        self.decode_str_into(min_len, dest)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "std")]
    use std::{vec, vec::Vec, string::String};
    #[cfg(all(feature = "alloc",not(feature = "std")))]
    use alloc::{vec, vec::Vec, string::String};
    use crate::{Encoder, Decoder, Error};

    #[cfg(any(feature = "std", feature = "alloc"))]
    fn encoded(s: &str) -> Vec<u8> {
        let mut enc = Encoder::new(Vec::new());
        enc.encode_str(s).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_encode_str() {
        let mut buf = [0u8;8];
        let mut enc = Encoder::from_slice(&mut buf);
        enc.encode_str("test").unwrap();
        enc.encode_cstr(c"ab").unwrap();
        assert_eq!(enc.encode_str("x"), Err(Error::NotEnoughSpace));
        assert_eq!(enc.finish().unwrap().as_ref(), b"\xa4test\xa2ab");
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_encode_str_tiers() {
        for (len, head) in [(1, &b"\xa1"[..]), (31, &b"\xbf"[..]), (32, &b"\xd9\x20"[..]),
                            (255, &b"\xd9\xff"[..]), (256, &b"\xda\x01\x00"[..]),
                            (65535, &b"\xda\xff\xff"[..]), (65536, &b"\xdb\x00\x01\x00\x00"[..])]
        {
            let s = String::from_utf8(vec![b'x'; len]).unwrap();
            let out = encoded(&s);
            assert_eq!(&out[..head.len()], head, "{}", len);
            assert_eq!(out.len(), head.len() + len);
            assert_eq!(out.len(), crate::size::str_size(len));
        }
    }

    #[test]
    fn test_encode_str_no_partial_write() {
        let mut buf = [0u8;33];
        let mut enc = Encoder::from_slice(&mut buf);
        assert_eq!(enc.encode_str("0123456789abcdef0123456789abcdef"), Err(Error::NotEnoughSpace));
        assert_eq!(enc.space_used(), 0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "empty string")]
    fn test_encode_empty_str() {
        let mut buf = [0u8;8];
        let _ = Encoder::from_slice(&mut buf).encode_str("");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "NUL")]
    fn test_encode_str_nul() {
        let mut buf = [0u8;8];
        let _ = Encoder::from_slice(&mut buf).encode_str("a\0b");
    }

    #[test]
    fn test_decode_str_copy() {
        let mut dest = [0u8;8];
        let mut dec = Decoder::from_slice(b"\xa4test\xd9\x04abcd\xa9123456789\xa0\xa2ab");
        assert_eq!(dec.decode_str_copy(&mut dest), Ok("test"));
        assert_eq!(dec.decode_str_copy(&mut dest), Ok("abcd"));
        // too long for the buffer, skipped
        assert_eq!(dec.decode_str_copy(&mut dest), Err(Error::SizeMismatch));
        assert_eq!(dec.decode_str_copy(&mut dest), Err(Error::CorruptPayload));
        assert_eq!(dec.decode_str_copy(&mut dest), Ok("ab"));
        assert_eq!(dec.data_left(), 0);
    }

    #[test]
    fn test_decode_str_copy_policies() {
        let input = b"\xa3abc";
        let mut dest = [0u8;3];
        assert_eq!(Decoder::from_slice(input).decode_str_copy_equ(&mut dest), Ok("abc"));
        assert_eq!(Decoder::from_slice(input).decode_str_copy_equ(&mut dest[..2]), Err(Error::SizeMismatch));
        let mut dest = [0u8;4];
        assert_eq!(Decoder::from_slice(input).decode_str_copy_equ(&mut dest), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(input).decode_str_copy_range(3, &mut dest), Ok("abc"));
        let mut dec = Decoder::from_slice(input);
        assert_eq!(dec.decode_str_copy_range(1, &mut dest[..2]), Err(Error::SizeMismatch));
        assert_eq!(dec.data_left(), 0);
        let mut dest = [0u8;8];
        assert_eq!(Decoder::from_slice(input).decode_str_copy_range(4, &mut dest), Err(Error::SizeMismatch));
    }

    #[test]
    fn test_decode_str_short_payload() {
        let mut dest = [0u8;8];
        // a length within bounds with a truncated payload
        assert_eq!(Decoder::from_slice(b"\xa4tes").decode_str_copy(&mut dest), Err(Error::CorruptPayload));
        // a mismatched length that can't even be skipped
        assert_eq!(Decoder::from_slice(b"\xa9tes").decode_str_copy(&mut dest), Err(Error::CorruptPayload));
        assert_eq!(Decoder::from_slice(b"\xd9").decode_str_copy(&mut dest), Err(Error::CorruptPayload));
        assert_eq!(Decoder::from_slice(b"").decode_str_copy(&mut dest), Err(Error::NoMoreData));
    }

    #[test]
    fn test_decode_str_invalid() {
        let mut dest = [0u8;8];
        for input in [&b"\xa3\x00bc"[..], &b"\xa3a\x00c"[..], &b"\xa3ab\x00"[..], &b"\xa2\xc3\x28"[..]] {
            let mut dec = Decoder::from_slice(input);
            assert_eq!(dec.decode_str_copy(&mut dest), Err(Error::CorruptPayload));
            assert_eq!(dec.data_left(), 0);
        }
        assert_eq!(Decoder::from_slice(b"\xc4\x01a").decode_str_copy(&mut dest), Err(Error::WrongType));
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_decode_str_dup() {
        let input = b"\xa4test";
        assert_eq!(Decoder::from_slice(input).decode_str_dup().unwrap(), "test");
        assert_eq!(Decoder::from_slice(input).decode_str_dup_equ(4).unwrap(), "test");
        assert_eq!(Decoder::from_slice(input).decode_str_dup_equ(3), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(input).decode_str_dup_equ(5), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(input).decode_str_dup_min(4).unwrap(), "test");
        assert_eq!(Decoder::from_slice(input).decode_str_dup_min(5), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(input).decode_str_dup_max(4).unwrap(), "test");
        assert_eq!(Decoder::from_slice(input).decode_str_dup_max(3), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(input).decode_str_dup_range(3, 4).unwrap(), "test");
        assert_eq!(Decoder::from_slice(input).decode_str_dup_range(4, 5).unwrap(), "test");
        assert_eq!(Decoder::from_slice(input).decode_str_dup_range(1, 3), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(input).decode_str_dup_range(5, 6), Err(Error::SizeMismatch));
        assert_eq!(Decoder::from_slice(b"\xa4te\x00t").decode_str_dup(), Err(Error::CorruptPayload));
        assert_eq!(Decoder::from_slice(b"\xa4tes").decode_str_dup(), Err(Error::CorruptPayload));
        assert_eq!(Decoder::from_slice(b"\xa0").decode_str_dup(), Err(Error::CorruptPayload));
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_decode_str_tiers() {
        for len in [1, 31, 32, 255, 256, 65535, 65536] {
            let s = String::from_utf8(vec![b'y'; len]).unwrap();
            let out = encoded(&s);
            let mut dec = Decoder::from_slice(&out);
            assert_eq!(dec.decode_str_dup_equ(len).unwrap(), s);
            assert_eq!(dec.data_left(), 0);
        }
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_decode_str_oversized_announcement() {
        // a length beyond the limit is skipped if present
        let mut input = vec![0xdb, 0x00, 0x40, 0x00, 0x01];
        input.resize(input.len() + crate::config::STRLEN_MAX + 1, b'z');
        let mut dec = Decoder::from_slice(&input);
        assert_eq!(dec.decode_str_dup(), Err(Error::SizeMismatch));
        assert_eq!(dec.data_left(), 0);
        // without allocating the claimed size otherwise
        let mut dec = Decoder::from_slice(b"\xdb\x00\x10\x00\x00abc");
        assert_eq!(dec.decode_str_dup(), Err(Error::CorruptPayload));
    }
}
