use std::fmt::{self, Debug, Formatter};
use std::mem::{self, ManuallyDrop};
use std::ptr;
use std::slice;

use crate::collections::aligned::{InlineBuffer, IntoIter, Storage};
use crate::collections::error::{CapacityOverflow, EmptyCollection, IndexOutOfBounds};
use crate::collections::macros::impl_slice_traits;
use crate::util::result::ResultExtension;

/// An inline collection of up to `N` elements which makes no promise about their order.
///
/// Giving up order makes removal `O(1)`: the last element is moved into the vacated slot instead
/// of shifting everything after it. This makes UnorderedArray a good fit for pools of live
/// objects that are added and retired in no particular order.
///
/// The elements are stored in a plain inline array with their natural alignment.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `remove` | `O(1)` |
/// | `erase_if` | `O(n)` |
/// | `erase_first_if` | `O(n)` |
/// | `apply_if` | `O(n)` |
pub struct UnorderedArray<T, const N: usize> {
    buf: InlineBuffer<T, N>,
    len: usize,
}

impl<T, const N: usize> UnorderedArray<T, N> {
    /// Creates an empty UnorderedArray.
    pub const fn new() -> UnorderedArray<T, N> {
        UnorderedArray {
            buf: InlineBuffer::new(),
            len: 0,
        }
    }

    /// Returns the number of elements in the UnorderedArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the UnorderedArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the UnorderedArray can hold, which is always `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if the UnorderedArray holds `N` elements.
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Pushes the provided value into the UnorderedArray.
    ///
    /// # Panics
    /// Panics if the UnorderedArray is already full.
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.check_capacity();
        // SAFETY: len < N, so the slot is in bounds and uninitialized.
        unsafe { self.buf.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Pushes the provided value, returning it back if there is no room.
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            Err(value)
        } else {
            self.push(value);
            Ok(())
        }
    }

    /// Constructs a new element in place from the result of `make`, returning a reference to it.
    ///
    /// # Panics
    /// Panics if the UnorderedArray is already full. `make` isn't called in that case.
    #[track_caller]
    pub fn push_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        self.check_capacity();
        // SAFETY: len < N, so the slot is in bounds and uninitialized.
        let slot = unsafe { self.buf.as_mut_ptr().add(self.len) };
        // SAFETY: As above. A panic in make leaves len unchanged.
        unsafe { slot.write(make()) };
        self.len += 1;
        // SAFETY: The slot was just initialized and is borrowed through &mut self.
        unsafe { &mut *slot }
    }

    /// Removes the last element and returns it.
    ///
    /// # Panics
    /// Panics if the UnorderedArray is empty.
    #[track_caller]
    pub fn pop(&mut self) -> T {
        if self.is_empty() {
            Err(EmptyCollection).throw()
        }
        self.len -= 1;
        // SAFETY: The old last slot is initialized and now outside of 0..len.
        unsafe { self.buf.as_ptr().add(self.len).read() }
    }

    /// Removes the last element and returns it, or None if the UnorderedArray is empty.
    pub fn try_pop(&mut self) -> Option<T> {
        (!self.is_empty()).then(|| self.pop())
    }

    /// Removes the element at `index`, moving the last element into its place unless `index` was
    /// already the last slot. Every other element keeps its position.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::unordered::UnorderedArray;
    /// let mut arr: UnorderedArray<_, 5> = (1..=5).collect();
    /// assert_eq!(arr.remove(1), 2);
    /// assert_eq!(arr, [1, 5, 3, 4]);
    /// ```
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }

        let ptr = self.buf.as_mut_ptr();
        self.len -= 1;
        // SAFETY: index and the old last slot are initialized and distinct unless index is the
        // last slot, in which case there is nothing to move.
        unsafe {
            let value = ptr.add(index).read();
            if index != self.len {
                ptr::copy_nonoverlapping(ptr.add(self.len), ptr.add(index), 1);
            }
            value
        }
    }

    /// Drops every element for which `pred` returns true, returning the number dropped.
    ///
    /// Each removal pulls the current last element into the vacated slot, which is then tested
    /// again, so every element is visited exactly once.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::unordered::UnorderedArray;
    /// let mut arr: UnorderedArray<_, 8> = (0..8).collect();
    /// assert_eq!(arr.erase_if(|n| n % 2 == 0), 4);
    /// assert!(arr.iter().all(|n| n % 2 == 1));
    /// ```
    pub fn erase_if<F: FnMut(&T) -> bool>(&mut self, mut pred: F) -> usize {
        let before = self.len;
        let mut index = 0;
        while index < self.len {
            if pred(&self.as_slice()[index]) {
                drop(self.remove(index));
            } else {
                index += 1;
            }
        }
        before - self.len
    }

    /// Removes and returns the first element for which `pred` returns true.
    pub fn erase_first_if<F: FnMut(&T) -> bool>(&mut self, pred: F) -> Option<T> {
        let index = self.iter().position(pred)?;
        Some(self.remove(index))
    }

    /// Calls `op` on every element.
    pub fn apply<F: FnMut(&mut T)>(&mut self, op: F) {
        self.iter_mut().for_each(op);
    }

    /// Calls `op` on every element for which `pred` returns true, returning how many there were.
    pub fn apply_if<P, F>(&mut self, mut pred: P, mut op: F) -> usize
    where
        P: FnMut(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut count = 0;
        for item in self.iter_mut() {
            if pred(item) {
                op(item);
                count += 1;
            }
        }
        count
    }

    /// Calls `op` on the first element for which `pred` returns true. Returns false if there was
    /// no such element.
    pub fn apply_first_if<P, F>(&mut self, mut pred: P, op: F) -> bool
    where
        P: FnMut(&T) -> bool,
        F: FnOnce(&mut T),
    {
        match self.iter_mut().find(|item| pred(item)) {
            Some(item) => {
                op(item);
                true
            },
            None => false,
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), self.len);
        self.len = 0;
        // SAFETY: Slots 0..len were initialized and are no longer considered live.
        unsafe { ptr::drop_in_place(live) };
    }

    /// Moves the contents out into a new UnorderedArray, leaving `self` empty.
    ///
    /// # Examples
    /// ```
    /// # use fst::collections::unordered::UnorderedArray;
    /// let mut arr: UnorderedArray<_, 2> = [1, 2].into_iter().collect();
    /// let moved = arr.take();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(moved.len(), 2);
    /// ```
    pub fn take(&mut self) -> UnorderedArray<T, N> {
        mem::replace(self, UnorderedArray::new())
    }

    /// Returns a slice of the elements, in their current unspecified order.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots 0..len are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns a mutable slice of the elements, in their current unspecified order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Slots 0..len are initialized and borrowed uniquely.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    #[track_caller]
    fn check_capacity(&self) {
        if self.is_full() {
            Err(CapacityOverflow {
                requested: self.len + 1,
                capacity: N,
            }).throw()
        }
    }
}

impl_slice_traits!([T, const N: usize] UnorderedArray<T, N>);

impl<T, const N: usize> Drop for UnorderedArray<T, N> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            // SAFETY: All values less than len are initialized and safe to drop.
            unsafe { ptr::drop_in_place(self.as_mut_slice()) }
        }
    }
}

impl<T, const N: usize> Default for UnorderedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for UnorderedArray<T, N> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T, const N: usize> Extend<T> for UnorderedArray<T, N> {
    /// # Panics
    /// Panics once the UnorderedArray is full and the iterator still has items.
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for UnorderedArray<T, N> {
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = UnorderedArray::new();
        arr.extend(iter);
        arr
    }
}

impl<T, const N: usize> IntoIterator for UnorderedArray<T, N> {
    type Item = T;

    type IntoIter = IntoIter<T, InlineBuffer<T, N>>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        // SAFETY: this is never dropped, so the buffer is moved out exactly once, and its first
        // len slots are initialized.
        unsafe { IntoIter::new(ptr::read(&this.buf), this.len) }
    }
}

impl<T: Debug, const N: usize> Debug for UnorderedArray<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnorderedArray")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &N)
            .finish()
    }
}
