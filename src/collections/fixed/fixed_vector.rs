use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr;
use std::slice;

use crate::collections::aligned::{HeapBuffer, InlineBuffer, Natural, Storage};
use crate::collections::error::{CapacityOverflow, EmptyCollection, IndexOutOfBounds};
use crate::collections::macros::impl_slice_traits;
use crate::util::result::ResultExtension;

/// A contiguous collection holding up to `N` elements, with storage chosen by `S`.
///
/// The length varies at runtime but the capacity never does: the storage is created once, with
/// room for exactly `N` elements, and is never reallocated. Slots `0..len` hold live values and
/// slots `len..N` are uninitialized.
///
/// By default the elements live inline, inside the FixedVector itself. [`HeapFixedVector`] keeps
/// them behind a single allocation instead, and [`AlignedFixedVector`] raises the alignment of the
/// inline storage.
///
/// # Contracts
/// Pushing onto a full FixedVector, popping from an empty one or indexing past `len` panics. The
/// checked [`at`](FixedVector::at) accessor returns an error instead, and
/// [`push_unchecked`](FixedVector::push_unchecked) skips the capacity check outside of debug
/// builds.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the FixedVector.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `swap_remove` | `O(1)` |
/// | `truncate` | `O(n)`*, `O(1)` |
/// | `take` | `O(n)`**, `O(1)` |
///
/// \* Truncation is `O(1)` for types without drop glue.
///
/// \** Taking the contents of a heap-backed FixedVector only moves its pointer.
pub struct FixedVector<T, const N: usize, S: Storage<T> = InlineBuffer<T, N>> {
    buf: S,
    len: usize,
    _phantom: PhantomData<T>,
}

/// A [`FixedVector`] with its elements stored behind a single allocation, aligned to `A`.
pub type HeapFixedVector<T, const N: usize, A = Natural> = FixedVector<T, N, HeapBuffer<T, N, A>>;

/// A [`FixedVector`] with inline storage aligned to `A`.
pub type AlignedFixedVector<T, const N: usize, A> = FixedVector<T, N, InlineBuffer<T, N, A>>;

impl<T, const N: usize, S: Storage<T>> FixedVector<T, N, S> {
    const VALID: () = assert!(
        S::CAPACITY == N,
        "storage capacity must match the capacity of the FixedVector"
    );

    /// Creates an empty FixedVector. Heap-backed variants allocate their full capacity here.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let vec: FixedVector<u8, 4> = FixedVector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn new() -> FixedVector<T, N, S> {
        let () = Self::VALID;
        FixedVector {
            buf: S::uninit(),
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of live elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the FixedVector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed capacity, `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if no more elements can be added.
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the number of elements that can still be added.
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Pushes the provided value onto the end of the FixedVector.
    ///
    /// # Panics
    /// Panics if the FixedVector is already full.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec = FixedVector::<f32, 2>::new();
    /// vec.push(3.0);
    /// vec.push(4.0);
    /// assert_eq!(vec, [3.0, 4.0]);
    /// ```
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.check_capacity(self.len + 1);
        // SAFETY: There is room for one more element.
        unsafe { self.push_unchecked(value) }
    }

    /// Pushes the provided value onto the end of the FixedVector, returning it back if there is
    /// no room.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec = FixedVector::<char, 1>::new();
    /// assert_eq!(vec.try_push('a'), Ok(()));
    /// assert_eq!(vec.try_push('b'), Err('b'));
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        // SAFETY: There is room for one more element.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Pushes the provided value onto the end of the FixedVector, assuming that there is room to
    /// do so. This is only checked in debug builds.
    ///
    /// # Safety
    /// The FixedVector must not be full. Pushing onto a full FixedVector writes past the end of its
    /// storage.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < N, "push_unchecked called on a full FixedVector");
        // SAFETY: The caller guarantees that len < N, so the slot at len is in bounds and
        // uninitialized.
        unsafe { self.buf.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Constructs a new element at the end of the FixedVector from the result of `make`, returning
    /// a reference to it. The value is written straight into its slot.
    ///
    /// # Panics
    /// Panics if the FixedVector is already full. `make` isn't called in that case.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec = FixedVector::<String, 2>::new();
    /// vec.push_with(String::new).push_str("built in place");
    /// assert_eq!(vec[0], "built in place");
    /// ```
    #[track_caller]
    pub fn push_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        self.check_capacity(self.len + 1);
        // SAFETY: len < N, so the slot is in bounds and uninitialized.
        let slot = unsafe { self.buf.as_mut_ptr().add(self.len) };
        // SAFETY: As above. If make panics, nothing has been written and len is unchanged.
        unsafe { slot.write(make()) };
        self.len += 1;
        // SAFETY: The slot was just initialized and is borrowed through &mut self.
        unsafe { &mut *slot }
    }

    /// Removes the last element and returns it.
    ///
    /// # Panics
    /// Panics if the FixedVector is empty. See [`try_pop`](FixedVector::try_pop) for a
    /// non-panicking version.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec: FixedVector<_, 3> = [1, 2].into_iter().collect();
    /// assert_eq!(vec.pop(), 2);
    /// assert_eq!(vec, [1]);
    /// ```
    #[track_caller]
    pub fn pop(&mut self) -> T {
        self.check_not_empty();
        // SAFETY: The FixedVector isn't empty.
        unsafe { self.pop_unchecked() }
    }

    /// Removes the last element and returns it, or None if the FixedVector is empty.
    pub fn try_pop(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: The FixedVector isn't empty.
            Some(unsafe { self.pop_unchecked() })
        }
    }

    /// # Safety
    /// The FixedVector must not be empty.
    unsafe fn pop_unchecked(&mut self) -> T {
        // Decrement len before reading, so the moved-out slot is no longer considered live.
        self.len -= 1;
        // SAFETY: The slot at the old last index is initialized and is now outside of 0..len, so
        // it won't be read or dropped again.
        unsafe { self.buf.as_ptr().add(self.len).read() }
    }

    /// Inserts the provided value at `index`, shifting all following elements one slot to the
    /// right.
    ///
    /// # Panics
    /// Panics if `index > len` or if the FixedVector is already full.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec: FixedVector<_, 5> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(4, 200);
    /// assert_eq!(vec, [0, 100, 1, 2, 200]);
    /// ```
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
        self.check_capacity(self.len + 1);

        let ptr = self.buf.as_mut_ptr();
        // SAFETY: index <= len < N, so both the source range index..len and the destination
        // range index+1..len+1 are in bounds. ptr::copy handles the overlap.
        unsafe {
            ptr::copy(ptr.add(index), ptr.add(index + 1), self.len - index);
            ptr.add(index).write(value);
        }
        self.len += 1;
    }

    /// Removes the element at `index`, shifting all following elements one slot to the left. The
    /// relative order of the remaining elements is preserved.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec: FixedVector<_, 8> = "abcde".chars().collect();
    /// assert_eq!(vec.remove(1), 'b');
    /// assert_eq!(vec, ['a', 'c', 'd', 'e']);
    /// ```
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        let ptr = self.buf.as_mut_ptr();
        // SAFETY: index < len, so the slot is initialized. The shifted range index+1..len is
        // initialized and the copy leaves the old last slot as a stale duplicate, which falls
        // outside of 0..len once len is decremented.
        unsafe {
            let value = ptr.add(index).read();
            ptr::copy(ptr.add(index + 1), ptr.add(index), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes the element at `index` by moving the last element into its place. This is `O(1)`
    /// but doesn't preserve the order of the remaining elements.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec: FixedVector<_, 4> = [1, 2, 3, 4].into_iter().collect();
    /// assert_eq!(vec.swap_remove(0), 1);
    /// assert_eq!(vec, [4, 2, 3]);
    /// ```
    #[track_caller]
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.check_index(index);

        let ptr = self.buf.as_mut_ptr();
        self.len -= 1;
        // SAFETY: index and the old last index are both initialized. After the read, the last
        // element is moved into the vacated slot unless they are the same slot.
        unsafe {
            let value = ptr.add(index).read();
            if index != self.len {
                ptr::copy_nonoverlapping(ptr.add(self.len), ptr.add(index), 1);
            }
            value
        }
    }

    /// Replaces the element at `index` with `value`, returning the old element.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    #[track_caller]
    pub fn replace(&mut self, index: usize, value: T) -> T {
        self.check_index(index);
        mem::replace(&mut self.as_mut_slice()[index], value)
    }

    /// Shortens the FixedVector to `len` elements, dropping the rest. Has no effect if `len` is
    /// not less than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: len < self.len <= N, so the offset is in bounds.
            unsafe { self.buf.as_mut_ptr().add(len) },
            self.len - len,
        );
        // Shrink first so that a panicking drop can't cause the tail to be dropped twice.
        self.len = len;

        if mem::needs_drop::<T>() {
            // SAFETY: The tail was initialized and is no longer considered live.
            unsafe { ptr::drop_in_place(tail) };
        }
    }

    /// Drops every element, leaving the FixedVector empty.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the FixedVector to `new_len`, calling `fill` to create any new elements.
    ///
    /// # Panics
    /// Panics if `new_len` exceeds the capacity.
    #[track_caller]
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut fill: F) {
        self.check_capacity(new_len);
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        while self.len < new_len {
            // SAFETY: len < new_len <= N.
            unsafe { self.push_unchecked(fill()) };
        }
    }

    /// Moves the contents out into a new FixedVector, leaving `self` empty.
    ///
    /// Inline contents are moved element by element as part of the move of the storage. For
    /// heap-backed storage, the existing allocation is handed over as is and `self` receives a
    /// fresh one.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::HeapFixedVector;
    /// let mut vec: HeapFixedVector<u32, 16> = (0..4).collect();
    /// let ptr = vec.as_ptr();
    ///
    /// let moved = vec.take();
    /// assert!(vec.is_empty());
    /// assert_eq!(moved.as_ptr(), ptr);
    /// assert_eq!(moved, [0, 1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> FixedVector<T, N, S> {
        mem::replace(self, FixedVector::new())
    }

    /// Returns a reference to the element at `index`, or an error if it is out of bounds.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// # use fst::collections::error::IndexOutOfBounds;
    /// let vec: FixedVector<_, 4> = [10, 20].into_iter().collect();
    /// assert_eq!(vec.at(1), Ok(&20));
    /// assert_eq!(vec.at(2), Err(IndexOutOfBounds { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.as_slice().get(index).ok_or(IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Returns a mutable reference to the element at `index`, or an error if it is out of bounds.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns the first element.
    ///
    /// # Panics
    /// Panics if the FixedVector is empty.
    #[track_caller]
    pub fn front(&self) -> &T {
        self.check_not_empty();
        &self.as_slice()[0]
    }

    /// Returns the first element mutably.
    ///
    /// # Panics
    /// Panics if the FixedVector is empty.
    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        self.check_not_empty();
        &mut self.as_mut_slice()[0]
    }

    /// Returns the last element.
    ///
    /// # Panics
    /// Panics if the FixedVector is empty.
    #[track_caller]
    pub fn back(&self) -> &T {
        self.check_not_empty();
        &self.as_slice()[self.len - 1]
    }

    /// Returns the last element mutably.
    ///
    /// # Panics
    /// Panics if the FixedVector is empty.
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        self.check_not_empty();
        let last = self.len - 1;
        &mut self.as_mut_slice()[last]
    }

    /// Returns a pointer to the first slot, aligned to the alignment of the storage.
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Returns a mutable pointer to the first slot, aligned to the alignment of the storage.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Returns the live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The pointer is nonnull and aligned, and slots 0..len are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As for as_slice, with uniqueness guaranteed by the &mut self borrow.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Consumes the FixedVector, returning its storage and the number of live elements in it.
    /// The caller becomes responsible for dropping those elements.
    pub fn into_raw_parts(self) -> (S, usize) {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: this is never dropped, so buf is moved out exactly once.
        (unsafe { ptr::read(&this.buf) }, this.len)
    }

    /// Checks that the FixedVector can hold `required` elements.
    ///
    /// # Panics
    /// Panics if `required` exceeds the capacity.
    #[track_caller]
    pub(crate) fn check_capacity(&self, required: usize) {
        if required > N {
            Err(CapacityOverflow {
                requested: required,
                capacity: N,
            }).throw()
        }
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    #[track_caller]
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }

    /// # Panics
    /// Panics if the FixedVector is empty.
    #[track_caller]
    pub(crate) fn check_not_empty(&self) {
        if self.is_empty() {
            Err(EmptyCollection).throw()
        }
    }
}

impl<T: Clone, const N: usize, S: Storage<T>> FixedVector<T, N, S> {
    /// Resizes the FixedVector to `new_len`, filling any new slots with clones of `value`.
    ///
    /// # Panics
    /// Panics if `new_len` exceeds the capacity.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let mut vec: FixedVector<_, 6> = FixedVector::new();
    /// vec.resize(3, "a");
    /// assert_eq!(vec, ["a", "a", "a"]);
    /// vec.resize(1, "b");
    /// assert_eq!(vec, ["a"]);
    /// ```
    #[track_caller]
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }

    /// Clones every element of `other` onto the end of the FixedVector.
    ///
    /// # Panics
    /// Panics if the elements don't fit. Nothing is appended in that case.
    #[track_caller]
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.check_capacity(self.len + other.len());
        for item in other {
            // SAFETY: The capacity check above covers every item.
            unsafe { self.push_unchecked(item.clone()) };
        }
    }
}

impl<T: Default, const N: usize, S: Storage<T>> FixedVector<T, N, S> {
    /// Resizes the FixedVector to `new_len`, filling any new slots with `T::default()`.
    ///
    /// # Panics
    /// Panics if `new_len` exceeds the capacity.
    #[track_caller]
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Copy, const N: usize, S: Storage<T>> FixedVector<T, N, S> {
    /// Creates a FixedVector holding a copy of `items`, made with a single block copy.
    ///
    /// # Panics
    /// Panics if `items` doesn't fit.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::fixed::FixedVector;
    /// let vec: FixedVector<u16, 8> = FixedVector::from_copy_slice(&[1, 2, 3]);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[track_caller]
    pub fn from_copy_slice(items: &[T]) -> FixedVector<T, N, S> {
        let mut vec = FixedVector::new();
        vec.extend_from_copy_slice(items);
        vec
    }

    /// Appends a copy of `items` with a single block copy.
    ///
    /// # Panics
    /// Panics if the items don't fit. Nothing is appended in that case.
    #[track_caller]
    pub fn extend_from_copy_slice(&mut self, items: &[T]) {
        self.check_capacity(self.len + items.len());
        // SAFETY: The destination len..len+items.len() is in bounds and uninitialized, so it can't
        // overlap with the borrowed source. T: Copy, so a bitwise copy is a valid copy.
        unsafe {
            ptr::copy_nonoverlapping(
                items.as_ptr(),
                self.buf.as_mut_ptr().add(self.len),
                items.len(),
            );
        }
        self.len += items.len();
    }
}

impl_slice_traits!([T, const N: usize, S: Storage<T>] FixedVector<T, N, S>);

impl<T, const N: usize, S: Storage<T>> Drop for FixedVector<T, N, S> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            // SAFETY: All values less than len are initialized and safe to drop.
            unsafe { ptr::drop_in_place(self.as_mut_slice()) }
        }
        // The storage is dropped implicitly afterwards, releasing only memory.
    }
}

impl<T, const N: usize, S: Storage<T>> Default for FixedVector<T, N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize, S: Storage<T>> Clone for FixedVector<T, N, S> {
    fn clone(&self) -> Self {
        let mut vec = FixedVector::new();
        for item in self.iter() {
            // SAFETY: vec has the same capacity as self and len <= N.
            unsafe { vec.push_unchecked(item.clone()) };
        }
        vec
    }
}

impl<T, const N: usize, S: Storage<T>> Extend<T> for FixedVector<T, N, S> {
    /// # Panics
    /// Panics once the FixedVector is full and the iterator still has items.
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, const N: usize, S: Storage<T>> Extend<&'a T> for FixedVector<T, N, S> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(*item);
        }
    }
}

impl<T, const N: usize, S: Storage<T>> FromIterator<T> for FixedVector<T, N, S> {
    /// # Panics
    /// Panics if the iterator yields more than `N` items.
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = FixedVector::new();
        vec.extend(iter);
        vec
    }
}

impl<T: Clone, const N: usize, S: Storage<T>> TryFrom<&[T]> for FixedVector<T, N, S> {
    type Error = CapacityOverflow;

    fn try_from(value: &[T]) -> Result<Self, Self::Error> {
        if value.len() > N {
            return Err(CapacityOverflow {
                requested: value.len(),
                capacity: N,
            });
        }
        let mut vec = FixedVector::new();
        vec.extend_from_slice(value);
        Ok(vec)
    }
}

impl<T: Debug, const N: usize, S: Storage<T>> Debug for FixedVector<T, N, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedVector")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &N)
            .finish()
    }
}
