/// Implements the traits that every slice-backed fixed collection gets for free from its
/// `as_slice`/`as_mut_slice` pair: Deref, borrowing, comparison, hashing and borrowed iteration.
///
/// The generic parameter list is passed in brackets and must name the element type `T`.
macro_rules! impl_slice_traits {
    ([$($gen:tt)*] $name:ty) => {
        impl<$($gen)*> std::ops::Deref for $name {
            type Target = [T];

            #[inline]
            fn deref(&self) -> &[T] {
                self.as_slice()
            }
        }

        impl<$($gen)*> std::ops::DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut [T] {
                self.as_mut_slice()
            }
        }

        impl<$($gen)*> AsRef<[T]> for $name {
            fn as_ref(&self) -> &[T] {
                self.as_slice()
            }
        }

        impl<$($gen)*> AsMut<[T]> for $name {
            fn as_mut(&mut self) -> &mut [T] {
                self.as_mut_slice()
            }
        }

        impl<$($gen)*> std::borrow::Borrow<[T]> for $name {
            fn borrow(&self) -> &[T] {
                self.as_slice()
            }
        }

        impl<$($gen)*> std::borrow::BorrowMut<[T]> for $name {
            fn borrow_mut(&mut self) -> &mut [T] {
                self.as_mut_slice()
            }
        }

        impl<$($gen)*> PartialEq for $name
        where
            T: PartialEq,
        {
            fn eq(&self, other: &Self) -> bool {
                self.as_slice() == other.as_slice()
            }
        }

        impl<$($gen)*> Eq for $name where T: Eq {}

        impl<U, $($gen)*> PartialEq<[U]> for $name
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &[U]) -> bool {
                self.as_slice() == other
            }
        }

        impl<'s, U, $($gen)*> PartialEq<&'s [U]> for $name
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &&'s [U]) -> bool {
                self.as_slice() == *other
            }
        }

        impl<U, const M: usize, $($gen)*> PartialEq<[U; M]> for $name
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &[U; M]) -> bool {
                self.as_slice() == other.as_slice()
            }
        }

        impl<$($gen)*> std::hash::Hash for $name
        where
            T: std::hash::Hash,
        {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.as_slice().hash(state);
            }
        }

        impl<'a, $($gen)*> IntoIterator for &'a $name {
            type Item = &'a T;
            type IntoIter = std::slice::Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.as_slice().iter()
            }
        }

        impl<'a, $($gen)*> IntoIterator for &'a mut $name {
            type Item = &'a mut T;
            type IntoIter = std::slice::IterMut<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.as_mut_slice().iter_mut()
            }
        }
    };
}

pub(crate) use impl_slice_traits;
