use std::ops::Range;

use bytemuck::{AnyBitPattern, Pod};

use super::{ByteOrder, ByteRangeOutOfBounds, LittleEndian, PcmFormat};
use crate::util::result::ResultExtension;

/// Typed, offset-addressed decoding shared by [`ByteVector`](super::ByteVector) and
/// [`ByteView`](super::ByteView).
///
/// Every offset is in bytes from the start of the buffer. A read that would reach past the end
/// panics; reading is never allowed to run into whatever lies after the buffer.
pub trait ByteRead {
    /// The bytes being decoded.
    fn bytes(&self) -> &[u8];

    /// Decodes a `T` stored little-endian at `offset`. There is no alignment requirement.
    ///
    /// # Panics
    /// Panics if `offset + size_of::<T>()` exceeds the length of the buffer.
    #[track_caller]
    fn read_as<T: Pod>(&self, offset: usize) -> T {
        self.read_as_in::<LittleEndian, T>(offset)
    }

    /// Decodes a `T` stored in the byte order `O` at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + size_of::<T>()` exceeds the length of the buffer.
    ///
    /// # Examples
    /// ```
    /// # use fst::bytes::{BigEndian, ByteRead, ByteView};
    /// let view = ByteView::new(&[0xff, 0x00, 0x01]);
    /// assert_eq!(view.read_as_in::<BigEndian, u16>(1), 1);
    /// ```
    #[track_caller]
    fn read_as_in<O: ByteOrder, T: Pod>(&self, offset: usize) -> T {
        let bytes = self.bytes();
        let range = checked_range(bytes.len(), offset, size_of::<T>());
        let mut value = T::zeroed();
        O::copy_value(&bytes[range], bytemuck::bytes_of_mut(&mut value));
        value
    }

    /// Decodes the `n`th `T` of a packed little-endian run starting at `offset`.
    ///
    /// # Panics
    /// Panics if the value lies outside of the buffer.
    #[track_caller]
    fn read_nth_as<T: Pod>(&self, offset: usize, n: usize) -> T {
        self.read_nth_as_in::<LittleEndian, T>(offset, n)
    }

    /// Decodes the `n`th `T` of a packed run in the byte order `O` starting at `offset`.
    ///
    /// # Panics
    /// Panics if the value lies outside of the buffer.
    #[track_caller]
    fn read_nth_as_in<O: ByteOrder, T: Pod>(&self, offset: usize, n: usize) -> T {
        let start = n
            .checked_mul(size_of::<T>())
            .and_then(|skip| skip.checked_add(offset))
            .ok_or(ByteRangeOutOfBounds {
                offset,
                size: usize::MAX,
                len: self.bytes().len(),
            })
            .throw();
        self.read_as_in::<O, T>(start)
    }

    /// Fills `dst` with the packed little-endian run of `T`s starting at `offset`.
    ///
    /// # Panics
    /// Panics if the run lies outside of the buffer.
    #[track_caller]
    fn copy_as<T: Pod>(&self, offset: usize, dst: &mut [T]) {
        self.copy_as_in::<LittleEndian, T>(offset, dst);
    }

    /// Fills `dst` with the packed run of `T`s in the byte order `O` starting at `offset`.
    ///
    /// # Panics
    /// Panics if the run lies outside of the buffer.
    ///
    /// # Examples
    /// ```
    /// # use fst::bytes::{ByteRead, ByteVector};
    /// let mut bytes = ByteVector::new();
    /// bytes.push([1_u16, 2, 3]);
    /// let mut out = [0_u16; 2];
    /// bytes.copy_as(2, &mut out);
    /// assert_eq!(out, [2, 3]);
    /// ```
    #[track_caller]
    fn copy_as_in<O: ByteOrder, T: Pod>(&self, offset: usize, dst: &mut [T]) {
        let bytes = self.bytes();
        let size = size_of_val(dst);
        let range = checked_range(bytes.len(), offset, size);
        O::copy_values(&bytes[range], bytemuck::cast_slice_mut(dst), size_of::<T>());
    }

    /// Borrows the `T` at `offset` in place, in the target's byte order.
    ///
    /// # Panics
    /// Panics if the value lies outside of the buffer, or if the address at `offset` isn't
    /// aligned for `T`.
    #[track_caller]
    fn view<T: AnyBitPattern>(&self, offset: usize) -> &T {
        let bytes = self.bytes();
        let range = checked_range(bytes.len(), offset, size_of::<T>());
        bytemuck::from_bytes(&bytes[range])
    }

    /// Decodes the little-endian PCM sample at `offset` into a float in `[-1, 1)`.
    ///
    /// # Panics
    /// Panics if the sample lies outside of the buffer.
    #[track_caller]
    fn read_pcm(&self, offset: usize, format: PcmFormat) -> f32 {
        self.read_pcm_in::<LittleEndian>(offset, format)
    }

    /// Decodes the PCM sample in the byte order `O` at `offset`.
    ///
    /// # Panics
    /// Panics if the sample lies outside of the buffer.
    #[track_caller]
    fn read_pcm_in<O: ByteOrder>(&self, offset: usize, format: PcmFormat) -> f32 {
        let bytes = self.bytes();
        let width = format.width();
        let range = checked_range(bytes.len(), offset, width);
        let mut repr = [0_u8; 4];
        O::copy_value(&bytes[range], &mut repr[..width]);
        format.decode(repr)
    }

    /// Returns the offset of the first occurrence of `needle`, if any.
    ///
    /// # Examples
    /// ```
    /// # use fst::bytes::{ByteRead, ByteView};
    /// let view = ByteView::new(b"RIFF....WAVEfmt ");
    /// assert_eq!(view.find(b"WAVE"), Some(8));
    /// assert_eq!(view.find(b"data"), None);
    /// ```
    fn find(&self, needle: &[u8]) -> Option<usize> {
        self.find_from(0, needle)
    }

    /// Returns the offset of the first occurrence of `needle` at or after `from`. An empty
    /// needle is found immediately, as long as `from` is within the buffer.
    fn find_from(&self, from: usize, needle: &[u8]) -> Option<usize> {
        let haystack = self.bytes().get(from..)?;
        if needle.is_empty() {
            return Some(from);
        }
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|pos| pos + from)
    }
}

/// Returns `offset..offset + size`, or panics if that range doesn't fit in `len` bytes.
#[track_caller]
pub(crate) fn checked_range(len: usize, offset: usize, size: usize) -> Range<usize> {
    match offset.checked_add(size) {
        Some(end) if end <= len => offset..end,
        _ => Err(ByteRangeOutOfBounds { offset, size, len }).throw(),
    }
}
