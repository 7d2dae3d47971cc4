//! Opaque byte blobs.
#[cfg(feature = "std")]
use std::vec::Vec;
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::vec::Vec;

use dpack_io::{PackRead, PackWrite};

use crate::config::BINSZ_MAX;
use crate::dec::Decoder;
use crate::enc::Encoder;
use crate::error::{Error, Result};
use crate::tag::{BIN_8, BIN_16, BIN_32, Tag, Tier};

impl<W: PackWrite> Encoder<W> {
    /// Encode a bin.
    ///
    /// An empty blob or one longer than [`BINSZ_MAX`] bytes is a contract
    /// violation.
    pub fn encode_bin(&mut self, v: &[u8]) -> Result<()> {
        let len = v.len();
        debug_assert!(len > 0, "empty bin");
        debug_assert!(len <= BINSZ_MAX, "bin too long");
        let tier = Tier::bin(len);
        let tag = match tier {
            Tier::Inline|Tier::Len8 => BIN_8,
            Tier::Len16 => BIN_16,
            Tier::Len32 => BIN_32
        };
        if tier.head_size() + len > self.space_left() {
            self.fail();
            return Err(Error::NotEnoughSpace)
        }
        self.write_head(tag, tier, len as u32)?;
        self.write(v)?;
        self.commit();
        Ok(())
    }
}

impl<R: PackRead> Decoder<R> {
    fn decode_bin_len(&mut self, min: usize, max: usize) -> Result<usize> {
        match self.fetch_tag()? {
            Tag::Bin(tier) => {
                let len = self.fetch_len(tier, 0)?;
                self.check_payload(len, min, max)
            }
            tag => Err(self.reject(tag))
        }
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    fn decode_bin_vec(&mut self, min: usize, max: usize) -> Result<Vec<u8>> {
        let len = self.decode_bin_len(min, max)?;
        self.fetch_payload_vec(len)
    }

    /// Decode a bin of any size into a new `Vec`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_bin_dup(&mut self) -> Result<Vec<u8>> {
        self.decode_bin_vec(1, BINSZ_MAX)
    }
    /// Decode a bin of exactly `size` bytes into a new `Vec`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_bin_dup_equ(&mut self, size: usize) -> Result<Vec<u8>> {
        debug_assert!(size > 0 && size <= BINSZ_MAX);
        self.decode_bin_vec(size, size)
    }
    /// Decode a bin of `min_sz` bytes at least into a new `Vec`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_bin_dup_min(&mut self, min_sz: usize) -> Result<Vec<u8>> {
        debug_assert!(min_sz > 0 && min_sz < BINSZ_MAX);
        self.decode_bin_vec(min_sz, BINSZ_MAX)
    }
    /// Decode a bin of `max_sz` bytes at most into a new `Vec`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_bin_dup_max(&mut self, max_sz: usize) -> Result<Vec<u8>> {
        debug_assert!(max_sz > 0 && max_sz <= BINSZ_MAX);
        self.decode_bin_vec(1, max_sz)
    }
    /// Decode a bin of `min_sz..=max_sz` bytes into a new `Vec`.
    #[cfg(any(feature = "std", feature = "alloc"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
    pub fn decode_bin_dup_range(&mut self, min_sz: usize, max_sz: usize) -> Result<Vec<u8>> {
        debug_assert!(min_sz > 0);
        debug_assert!(min_sz < max_sz);
        debug_assert!(max_sz <= BINSZ_MAX);
        self.decode_bin_vec(min_sz, max_sz)
    }

    fn decode_bin_into<'d>(&mut self, min: usize, dest: &'d mut [u8]) -> Result<&'d [u8]> {
        let max = dest.len().min(BINSZ_MAX);
        let len = self.decode_bin_len(min, max)?;
        let bytes = self.fetch_payload_into(len, dest)?;
        Ok(bytes)
    }

    /// Decode a bin into `dest`, returning the filled part.
    ///
    /// A bin larger than `dest` is `Err(Error::SizeMismatch)`.
    pub fn decode_bin_copy<'d>(&mut self, dest: &'d mut [u8]) -> Result<&'d [u8]> {
        debug_assert!(!dest.is_empty());
        self.decode_bin_into(1, dest)
    }
    /// Decode a bin filling the whole of `dest`.
    pub fn decode_bin_copy_equ<'d>(&mut self, dest: &'d mut [u8]) -> Result<&'d [u8]> {
        debug_assert!(!dest.is_empty() && dest.len() <= BINSZ_MAX);
        let size = dest.len();
        self.decode_bin_into(size, dest)
    }
    /// Decode a bin of `min_sz` bytes at least into `dest`, returning the filled part.
    pub fn decode_bin_copy_range<'d>(&mut self, min_sz: usize, dest: &'d mut [u8]) -> Result<&'d [u8]> {
        debug_assert!(min_sz > 0);
        debug_assert!(min_sz < dest.len());
        self.decode_bin_into(min_sz, dest)
    }
}
