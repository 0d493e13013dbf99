use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr;
use std::slice;

use super::Storage;

/// An owned iterator over the live elements of a [`Storage`]. Returned by the `into_iter`
/// implementations of [`FixedVector`](crate::collections::fixed::FixedVector) and
/// [`UnorderedArray`](crate::collections::unordered::UnorderedArray).
pub struct IntoIter<T, S: Storage<T>> {
    buf: S,
    start: usize,
    end: usize,
    _phantom: PhantomData<T>,
}

impl<T, S: Storage<T>> IntoIter<T, S> {
    /// Takes ownership of the first `len` slots of `buf`.
    ///
    /// # Safety
    /// The first `len` slots of `buf` must be initialized and `len` must not exceed its capacity.
    /// The caller must not drop those elements itself.
    pub(crate) const unsafe fn new(buf: S, len: usize) -> IntoIter<T, S> {
        IntoIter {
            buf,
            start: 0,
            end: len,
            _phantom: PhantomData,
        }
    }

    /// Returns the elements that haven't been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots in start..end are initialized and owned by this iterator.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, S: Storage<T>> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start is an initialized slot. Advancing start afterwards means the value is
            // never read or dropped again, so the bitwise copy is a move.
            let value = unsafe { self.buf.as_ptr().add(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, S: Storage<T>> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: end has just been decremented onto an initialized slot, which is now outside
            // of the live range.
            Some(unsafe { self.buf.as_ptr().add(self.end).read() })
        } else {
            None
        }
    }
}

impl<T, S: Storage<T>> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: Storage<T>> FusedIterator for IntoIter<T, S> {}

impl<T, S: Storage<T>> Drop for IntoIter<T, S> {
    fn drop(&mut self) {
        // SAFETY: Slots in start..end are initialized and nothing else will drop them. The buffer
        // itself is dropped afterwards, releasing only memory.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.start),
                self.end - self.start,
            ));
        }
    }
}

impl<T: Debug, S: Storage<T>> Debug for IntoIter<T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
