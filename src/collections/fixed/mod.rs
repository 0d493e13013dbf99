//! A module containing [`FixedVector`] and its storage-specific aliases.
//!
//! Owned iteration uses the shared [`IntoIter`](crate::collections::aligned::IntoIter), while
//! [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from [`std::slice`] are used
//! for borrowed iteration.

mod fixed_vector;
mod iter;

pub use fixed_vector::*;
