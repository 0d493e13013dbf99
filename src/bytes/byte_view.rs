use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

use super::ByteRead;
use super::read::checked_range;

/// A read-only window over bytes owned by something else.
///
/// A ByteView decodes exactly like a [`ByteVector`](super::ByteVector) but never owns or copies
/// what it looks at. The borrow keeps it from outliving the underlying memory.
///
/// # Examples
/// ```
/// # use fst::bytes::{ByteRead, ByteVector, ByteView};
/// let mut bytes = ByteVector::new();
/// bytes.push([10_u32, 20, 30]);
///
/// let tail: ByteView<'_> = bytes.as_view().subview(4, 8);
/// assert_eq!(tail.len(), 8);
/// assert_eq!(tail.read_as::<u32>(0), 20);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub const fn new(bytes: &'a [u8]) -> ByteView<'a> {
        ByteView { bytes }
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Narrows the view to `len` bytes starting at `offset`.
    ///
    /// # Panics
    /// Panics if the range lies outside of this view.
    #[track_caller]
    pub fn subview(&self, offset: usize, len: usize) -> ByteView<'a> {
        ByteView::new(&self.bytes[checked_range(self.bytes.len(), offset, len)])
    }
}

impl ByteRead for ByteView<'_> {
    fn bytes(&self) -> &[u8] {
        self.bytes
    }
}

impl Deref for ByteView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(value: &'a [u8]) -> Self {
        ByteView::new(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteView<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        ByteView::new(value)
    }
}

impl<'a> From<&'a super::ByteVector> for ByteView<'a> {
    fn from(value: &'a super::ByteVector) -> Self {
        value.as_view()
    }
}

impl PartialEq<[u8]> for ByteView<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl Debug for ByteView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("contents", &self.bytes)
            .field("len", &self.bytes.len())
            .finish()
    }
}
