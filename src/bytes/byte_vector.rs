use std::alloc::{self, Layout};
use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::io;
use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use bytemuck::{NoUninit, Pod};

use super::read::checked_range;
use super::{
    ByteCapacityOverflow, ByteOrder, ByteRead, ByteView, Encode, LittleEndian, PcmFormat,
};
use crate::util::result::ResultExtension;

/// The alignment of every ByteVector allocation, so that values written at naturally aligned
/// offsets can be borrowed in place with [`ByteVector::view_mut`].
pub const BYTE_VECTOR_ALIGN: usize = 16;

const MIN_CAP: usize = 64;
const MAX_CAP: usize = isize::MAX as usize - (BYTE_VECTOR_ALIGN - 1);

const GROWTH_FACTOR: usize = 2;

/// A growable buffer of bytes for building binary payloads out of typed values.
///
/// Values are appended with [`push`](ByteVector::push) and friends and decoded again with the
/// [`ByteRead`] methods, addressed by byte offset. Little-endian is used unless another
/// [`ByteOrder`] is named through the `*_in` variants.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the ByteVector.
/// - `m`: The number of bytes being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(m)`*, `O(n+m)` |
/// | `read_as` | `O(1)` |
/// | `view_mut` | `O(1)` |
/// | `find` | `O(n*m)` |
///
/// \* If the ByteVector doesn't have enough capacity for the new bytes, it grows in `O(n)`.
///
/// # Examples
/// ```
/// # use fst::bytes::{ByteRead, ByteVector};
/// let mut bytes = ByteVector::new();
/// bytes.push(32_i32);
/// bytes.push(64_i32);
/// assert_eq!(bytes.len(), 8);
/// assert_eq!(bytes.read_as::<i32>(0), 32);
/// assert_eq!(bytes.read_as::<i32>(4), 64);
/// ```
pub struct ByteVector {
    ptr: NonNull<u8>,
    len: usize,
    cap: usize,
}

impl ByteVector {
    /// Creates an empty ByteVector. No memory is allocated until bytes are added.
    pub const fn new() -> ByteVector {
        ByteVector {
            ptr: Self::dangling(),
            len: 0,
            cap: 0,
        }
    }

    /// Creates an empty ByteVector with room for exactly `cap` bytes.
    ///
    /// # Panics
    /// Panics if `cap` exceeds the maximum allocation size.
    pub fn with_capacity(cap: usize) -> ByteVector {
        let mut bytes = ByteVector::new();
        bytes.realloc(cap);
        bytes
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bytes that can be held without reallocating.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    pub const fn as_slice(&self) -> &[u8] {
        // SAFETY: The pointer is nonnull and valid for len initialized bytes.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub const fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: As for as_slice, with uniqueness guaranteed by the &mut self borrow.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub const fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Borrows the contents as a [`ByteView`].
    pub const fn as_view(&self) -> ByteView<'_> {
        ByteView::new(self.as_slice())
    }

    /// Shortens the buffer to `len` bytes. Has no effect if `len` is not less than the current
    /// length.
    pub const fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    pub const fn clear(&mut self) {
        self.len = 0;
    }

    /// Ensures that `additional` more bytes can be added without reallocating.
    ///
    /// # Panics
    /// Panics if the required capacity exceeds the maximum allocation size.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.checked_add(additional).ok_or(ByteCapacityOverflow).throw();
        if required <= self.cap {
            return;
        }

        let grown = cmp::max(self.cap.saturating_mul(GROWTH_FACTOR), MIN_CAP);
        self.realloc(cmp::max(required, cmp::min(grown, MAX_CAP)));
    }

    /// Appends raw bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        // SAFETY: There is room for bytes.len() more bytes after len, and the source is a
        // borrowed slice, so it can't overlap the uninitialized tail.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.ptr.as_ptr().add(self.len), bytes.len());
        }
        self.len += bytes.len();
    }

    /// Returns the uninitialized capacity after the current contents.
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: The allocation is valid for cap bytes and len <= cap. Uninitialized bytes are
        // only exposed as MaybeUninit.
        unsafe {
            slice::from_raw_parts_mut(
                self.ptr.as_ptr().add(self.len).cast(),
                self.cap - self.len,
            )
        }
    }

    /// Sets the length of the buffer.
    ///
    /// # Safety
    /// `new_len` must not exceed the capacity, and every byte below it must be initialized.
    pub const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.cap);
        self.len = new_len;
    }

    /// Appends `count` zero bytes and returns them for writing.
    pub(crate) fn extend_zeroed(&mut self, count: usize) -> &mut [u8] {
        self.reserve(count);
        let start = self.len;
        // SAFETY: There is room for count more bytes after len.
        unsafe { ptr::write_bytes(self.ptr.as_ptr().add(start), 0, count) };
        self.len += count;
        &mut self.as_mut_slice()[start..]
    }

    /// Appends `value` in little-endian order. Containers are encoded element by element, see
    /// [`Encode`].
    ///
    /// # Examples
    /// ```
    /// # use fst::bytes::{ByteRead, ByteVector};
    /// let samples = vec![0.5_f32, -1.0, 2.0];
    /// let mut bytes = ByteVector::new();
    /// bytes.push(&samples);
    /// bytes.push(7_u8);
    /// assert_eq!(bytes.len(), 13);
    /// assert_eq!(bytes.read_nth_as::<f32>(0, 1), -1.0);
    /// ```
    pub fn push<T: Encode>(&mut self, value: T) {
        value.encode::<LittleEndian>(self);
    }

    /// Appends `value` in the byte order `O`.
    ///
    /// # Examples
    /// ```
    /// # use fst::bytes::{BigEndian, ByteVector};
    /// let mut bytes = ByteVector::new();
    /// bytes.push_in::<BigEndian, _>(0x0102_u16);
    /// assert_eq!(bytes.as_slice(), &[1, 2]);
    /// ```
    pub fn push_in<O: ByteOrder, T: Encode>(&mut self, value: T) {
        value.encode::<O>(self);
    }

    /// Appends the whole representation of `value` in little-endian order. Use this for plain
    /// structs, which aren't [`Encode`] themselves.
    pub fn push_raw<T: NoUninit>(&mut self, value: T) {
        self.push_raw_in::<LittleEndian, T>(value);
    }

    /// Appends the whole representation of `value` in the byte order `O`. For a struct, this
    /// reverses the struct as a whole, not each of its fields.
    pub fn push_raw_in<O: ByteOrder, T: NoUninit>(&mut self, value: T) {
        let src = bytemuck::bytes_of(&value);
        O::copy_value(src, self.extend_zeroed(src.len()));
    }

    /// Appends a packed run of values in little-endian order, with a single block copy.
    pub fn push_slice<T: NoUninit>(&mut self, values: &[T]) {
        self.push_slice_in::<LittleEndian, T>(values);
    }

    /// Appends a packed run of values in the byte order `O`, reordering each value separately.
    pub fn push_slice_in<O: ByteOrder, T: NoUninit>(&mut self, values: &[T]) {
        let src: &[u8] = bytemuck::cast_slice(values);
        if O::REVERSED {
            O::copy_values(src, self.extend_zeroed(src.len()), size_of::<T>());
        } else {
            self.extend_from_slice(src);
        }
    }

    /// Appends a normalized audio sample in `[-1, 1]` as little-endian PCM. See [`PcmFormat`].
    pub fn push_pcm(&mut self, sample: f32, format: PcmFormat) {
        self.push_pcm_in::<LittleEndian>(sample, format);
    }

    /// Appends a normalized audio sample in `[-1, 1]` as PCM in the byte order `O`.
    pub fn push_pcm_in<O: ByteOrder>(&mut self, sample: f32, format: PcmFormat) {
        let (repr, width) = format.encode(sample);
        O::copy_value(&repr[..width], self.extend_zeroed(width));
    }

    /// Borrows the value at `offset` in place, allowing a previously pushed value to be modified.
    /// There is no byte order here, the value is always in the target's order.
    ///
    /// # Panics
    /// Panics if the value doesn't fit within the buffer, or if `offset` isn't aligned for `T`.
    /// The allocation itself is aligned to [`BYTE_VECTOR_ALIGN`].
    ///
    /// # Examples
    /// ```
    /// # use fst::bytes::{ByteRead, ByteVector};
    /// let mut bytes = ByteVector::new();
    /// bytes.push(0_u32);
    /// bytes.push(10_u32);
    /// *bytes.view_mut::<u32>(4) += 5;
    /// assert_eq!(bytes.read_as::<u32>(4), 15);
    /// ```
    #[track_caller]
    pub fn view_mut<T: Pod>(&mut self, offset: usize) -> &mut T {
        let size = size_of::<T>();
        let range = checked_range(self.len, offset, size);
        bytemuck::from_bytes_mut(&mut self.as_mut_slice()[range])
    }

    /// Reallocates to exactly `new_cap` bytes, which must not be less than len.
    ///
    /// # Panics
    /// Panics if `new_cap` exceeds the maximum allocation size.
    fn realloc(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        if new_cap == self.cap {
            return;
        }

        let new_layout = Self::make_layout(new_cap);
        let new_ptr = if self.cap == 0 {
            // SAFETY: new_cap != cap == 0, so the layout isn't zero-sized.
            unsafe { alloc::alloc(new_layout) }
        } else if new_cap == 0 {
            // SAFETY: The pointer was allocated with the layout for cap bytes.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), Self::make_layout(self.cap)) };
            Self::dangling().as_ptr()
        } else {
            // SAFETY: The pointer was allocated with the layout for cap bytes, and new_cap is
            // nonzero and fits in isize::MAX once rounded up to the alignment.
            unsafe { alloc::realloc(self.ptr.as_ptr(), Self::make_layout(self.cap), new_cap) }
        };

        self.ptr = NonNull::new(new_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout));
        self.cap = new_cap;
    }

    /// # Panics
    /// Panics if the layout size exceeds the maximum allocation size.
    fn make_layout(cap: usize) -> Layout {
        Layout::from_size_align(cap, BYTE_VECTOR_ALIGN)
            .map_err(|_| ByteCapacityOverflow)
            .throw()
    }

    const fn dangling() -> NonNull<u8> {
        // SAFETY: BYTE_VECTOR_ALIGN is nonzero.
        unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(BYTE_VECTOR_ALIGN)) }
    }
}

impl ByteRead for ByteVector {
    fn bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Drop for ByteVector {
    fn drop(&mut self) {
        if self.cap != 0 {
            // SAFETY: The pointer was allocated with the layout for cap bytes and is freed once.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), Self::make_layout(self.cap)) }
        }
    }
}

// SAFETY: ByteVector uniquely owns its allocation of plain bytes.
unsafe impl Send for ByteVector {}
// SAFETY: Shared access only hands out shared references to the bytes.
unsafe impl Sync for ByteVector {}

impl Default for ByteVector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ByteVector {
    fn clone(&self) -> Self {
        ByteVector::from(self.as_slice())
    }
}

impl From<&[u8]> for ByteVector {
    fn from(value: &[u8]) -> Self {
        let mut bytes = ByteVector::with_capacity(value.len());
        bytes.extend_from_slice(value);
        bytes
    }
}

impl<const N: usize> From<&[u8; N]> for ByteVector {
    fn from(value: &[u8; N]) -> Self {
        ByteVector::from(value.as_slice())
    }
}

impl From<ByteView<'_>> for ByteVector {
    fn from(value: ByteView<'_>) -> Self {
        ByteVector::from(value.as_slice())
    }
}

impl Extend<u8> for ByteVector {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for byte in iter {
            self.extend_from_slice(&[byte]);
        }
    }
}

impl FromIterator<u8> for ByteVector {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut bytes = ByteVector::new();
        bytes.extend(iter);
        bytes
    }
}

impl io::Write for ByteVector {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Deref for ByteVector {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for ByteVector {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for ByteVector {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for ByteVector {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl Borrow<[u8]> for ByteVector {
    fn borrow(&self) -> &[u8] {
        self.as_slice()
    }
}

impl BorrowMut<[u8]> for ByteVector {
    fn borrow_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl PartialEq for ByteVector {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteVector {}

impl PartialEq<[u8]> for ByteVector {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for ByteVector {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other
    }
}

impl Hash for ByteVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl Debug for ByteVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteVector")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}
