use super::FixedVector;
use crate::collections::aligned::{IntoIter, Storage};

impl<T, const N: usize, S: Storage<T>> IntoIterator for FixedVector<T, N, S> {
    type Item = T;

    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_raw_parts();
        // SAFETY: The first len slots of buf are initialized and ownership of them passes to the
        // iterator along with the storage.
        unsafe { IntoIter::new(buf, len) }
    }
}
