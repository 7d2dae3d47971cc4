/// Implementation for foreign types
#[cfg(feature = "std")]
use std::{vec::Vec, collections::VecDeque, io::Cursor};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{vec::Vec, collections::VecDeque};

#[allow(unused_imports)]
use super::*;

/// Growable containers report the largest size an allocation may reach.
#[cfg(any(feature = "std", feature = "alloc", feature = "smallvec"))]
#[inline]
fn growable_space_left(len: usize) -> usize {
    (isize::MAX as usize).saturating_sub(len)
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl PackWrite for Vec<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        self.try_reserve(buf.len()).map_err(|_| BackendError::BufferFull)?;
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn space_used(&self) -> usize {
        self.len()
    }
    #[inline]
    fn space_left(&self) -> usize {
        growable_space_left(self.len())
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl PackWrite for VecDeque<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        self.try_reserve(buf.len()).map_err(|_| BackendError::BufferFull)?;
        self.extend(buf.iter().copied());
        Ok(())
    }
    #[inline]
    fn space_used(&self) -> usize {
        self.len()
    }
    #[inline]
    fn space_left(&self) -> usize {
        growable_space_left(self.len())
    }
}

/// Writes in place over the cursor's slice, starting at its current position.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T> PackWrite for Cursor<T>
    where T: AsMut<[u8]> + AsRef<[u8]>
{
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        let pos = self.space_used();
        let end = pos.checked_add(buf.len()).ok_or(BackendError::BufferFull)?;
        let chunk = self.get_mut().as_mut().get_mut(pos..end)
                        .ok_or(BackendError::BufferFull)?;
        chunk.copy_from_slice(buf);
        self.set_position(end as u64);
        Ok(())
    }
    #[inline]
    fn space_used(&self) -> usize {
        usize::try_from(self.position()).unwrap_or(usize::MAX)
    }
    #[inline]
    fn space_left(&self) -> usize {
        self.get_ref().as_ref().len().saturating_sub(self.space_used())
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T> PackRead for Cursor<T>
    where T: AsRef<[u8]>
{
    #[inline]
    fn data_left(&self) -> usize {
        let pos = usize::try_from(self.position()).unwrap_or(usize::MAX);
        self.get_ref().as_ref().len().saturating_sub(pos)
    }
    fn read(&mut self, buf: &mut [u8]) -> BackendResult<()> {
        if buf.len() > self.data_left() {
            return Err(BackendError::NoData)
        }
        let pos = self.position() as usize;
        buf.copy_from_slice(&self.get_ref().as_ref()[pos..pos + buf.len()]);
        self.set_position((pos + buf.len()) as u64);
        Ok(())
    }
    fn skip(&mut self, len: usize) -> BackendResult<()> {
        if len > self.data_left() {
            return Err(BackendError::NoData)
        }
        self.set_position(self.position() + len as u64);
        Ok(())
    }
}

/// Reading from a byte slice consumes it from the front.
impl PackRead for &'_ [u8] {
    #[inline]
    fn data_left(&self) -> usize {
        self.len()
    }
    fn read(&mut self, buf: &mut [u8]) -> BackendResult<()> {
        if buf.len() > self.len() {
            return Err(BackendError::NoData)
        }
        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }
    fn skip(&mut self, len: usize) -> BackendResult<()> {
        match self.get(len..) {
            Some(tail) => {
                *self = tail;
                Ok(())
            }
            None => Err(BackendError::NoData)
        }
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<const CAP: usize> PackWrite for arrayvec::ArrayVec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        self.try_extend_from_slice(buf).map_err(|_| BackendError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> BackendResult<()> {
        self.try_push(byte).map_err(|_| BackendError::BufferFull)
    }
    #[inline]
    fn space_used(&self) -> usize {
        self.len()
    }
    #[inline]
    fn space_left(&self) -> usize {
        self.remaining_capacity()
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<const CAP: usize> PackWrite for heapless::Vec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        self.extend_from_slice(buf).map_err(|_| BackendError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> BackendResult<()> {
        self.push(byte).map_err(|_| BackendError::BufferFull)
    }
    #[inline]
    fn space_used(&self) -> usize {
        self.len()
    }
    #[inline]
    fn space_left(&self) -> usize {
        self.capacity() - self.len()
    }
}

#[cfg(feature = "smallvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "smallvec")))]
impl<A> PackWrite for smallvec::SmallVec<A>
    where A: smallvec::Array<Item = u8>
{
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        self.try_reserve(buf.len()).map_err(|_| BackendError::BufferFull)?;
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn space_used(&self) -> usize {
        self.len()
    }
    #[inline]
    fn space_left(&self) -> usize {
        growable_space_left(self.len())
    }
}

#[cfg(feature = "tinyvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "tinyvec")))]
impl<A> PackWrite for tinyvec::ArrayVec<A>
    where A: tinyvec::Array<Item = u8>
{
    fn write(&mut self, buf: &[u8]) -> BackendResult<()> {
        if buf.len() > self.capacity() - self.len() {
            return Err(BackendError::BufferFull)
        }
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> BackendResult<()> {
        match self.try_push(byte) {
            None => Ok(()),
            Some(_) => Err(BackendError::BufferFull)
        }
    }
    #[inline]
    fn space_used(&self) -> usize {
        self.len()
    }
    #[inline]
    fn space_left(&self) -> usize {
        self.capacity() - self.len()
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_pack_write_vec() {
        let mut writer = Vec::<u8>::new();
        writer.write(b"\x92\xc2").unwrap();
        writer.write_byte(0xc3).unwrap();
        assert_eq!(&writer, b"\x92\xc2\xc3");
        assert_eq!(writer.space_used(), 3);
        assert_eq!(writer.space_left(), isize::MAX as usize - 3);
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_pack_write_vec_deque() {
        let mut writer = VecDeque::<u8>::new();
        writer.write(b"\x92\xc2").unwrap();
        writer.write_byte(0xc3).unwrap();
        assert_eq!(&writer, b"\x92\xc2\xc3");
        assert_eq!(writer.space_used(), 3);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_pack_write_cursor() {
        let mut writer = Cursor::new([0u8;4]);
        writer.write(b"\x92\xc2").unwrap();
        writer.write_byte(0xc3).unwrap();
        assert_eq!(writer.space_left(), 1);
        assert_eq!(writer.write(b"\xc0\xc0").unwrap_err(), BackendError::BufferFull);
        assert_eq!(writer.space_used(), 3);
        writer.write_byte(0xc0).unwrap();
        assert_eq!(writer.get_ref(), b"\x92\xc2\xc3\xc0");
        assert_eq!(writer.write_byte(0xc0).unwrap_err(), BackendError::BufferFull);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_pack_read_cursor() {
        let mut reader = Cursor::new(&b"\x92\xc2\xc3"[..]);
        assert_eq!(reader.read_byte(), Ok(0x92));
        assert_eq!(reader.skip(3), Err(BackendError::NoData));
        assert_eq!(reader.data_left(), 2);
        assert_eq!(reader.read_array::<2>(), Ok([0xc2, 0xc3]));
        assert_eq!(reader.read_byte(), Err(BackendError::NoData));
    }

    #[test]
    fn test_pack_read_slice() {
        let mut reader: &[u8] = b"\x01\x02\x03";
        reader.skip(1).unwrap();
        let mut buf = [0u8;3];
        assert_eq!(reader.read(&mut buf), Err(BackendError::NoData));
        assert_eq!(reader.read(&mut buf[..2]), Ok(()));
        assert_eq!(&buf, &[2, 3, 0]);
        assert_eq!(reader.data_left(), 0);
        assert_eq!(reader.skip(1), Err(BackendError::NoData));
    }

    #[cfg(feature = "arrayvec")]
    #[test]
    fn test_pack_write_arrayvec() {
        let mut writer = arrayvec::ArrayVec::<u8,3>::new();
        writer.write(b"\x92\xc2").unwrap();
        writer.write_byte(0xc3).unwrap();
        assert_eq!(writer.as_slice(), b"\x92\xc2\xc3");
        assert_eq!(writer.space_left(), 0);
        assert_eq!(writer.write_byte(0xc0).unwrap_err(), BackendError::BufferFull);
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_pack_write_heapless() {
        let mut writer = heapless::Vec::<u8,3>::new();
        writer.write(b"\x92\xc2").unwrap();
        writer.write_byte(0xc3).unwrap();
        assert_eq!(writer.as_slice(), b"\x92\xc2\xc3");
        assert_eq!(writer.space_left(), 0);
        assert_eq!(writer.write_byte(0xc0).unwrap_err(), BackendError::BufferFull);
    }

    #[cfg(feature = "smallvec")]
    #[test]
    fn test_pack_write_smallvec() {
        let mut writer = smallvec::SmallVec::<[u8;2]>::new();
        writer.write(b"\x92\xc2").unwrap();
        writer.write_byte(0xc3).unwrap();
        assert_eq!(writer.as_slice(), b"\x92\xc2\xc3");
        assert_eq!(writer.space_used(), 3);
    }

    #[cfg(feature = "tinyvec")]
    #[test]
    fn test_pack_write_tinyvec() {
        let mut writer = tinyvec::ArrayVec::<[u8;3]>::new();
        writer.write(b"\x92\xc2").unwrap();
        assert_eq!(writer.write(b"\xc3\xc0").unwrap_err(), BackendError::BufferFull);
        writer.write_byte(0xc3).unwrap();
        assert_eq!(writer.as_slice(), b"\x92\xc2\xc3");
        assert_eq!(writer.write_byte(0xc0).unwrap_err(), BackendError::BufferFull);
    }
}
