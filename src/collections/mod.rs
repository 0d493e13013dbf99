//! Fixed-capacity collection types.
//!
//! # Purpose
//! These are containers whose capacity is part of their type. They never reallocate, so element
//! addresses stay put for as long as the element does, and the inline variants need no allocation
//! at all.
//!
//! # Method
//! Storage is separated from bookkeeping: [`aligned`] provides raw, uninitialized, aligned slots
//! (either inline or behind a single allocation), and the containers on top track how many of
//! those slots hold live values. Applicable types implement [`Deref<Target = [T]>`](std::ops::Deref)
//! (and DerefMut), which covers the repetitive slice functionality.
//!
//! # Contracts
//! Exceeding capacity or removing from an empty collection is a programming error and always
//! panics. Unsafe `*_unchecked` variants only check these contracts with `debug_assert!`.

#[cfg(feature = "aligned")]
pub mod aligned;
pub mod error;
#[cfg(feature = "fixed")]
pub mod fixed;
#[cfg(feature = "unordered")]
pub mod unordered;

#[allow(unused)]
mod macros;
