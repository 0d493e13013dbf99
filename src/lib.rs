//! Fixed-capacity containers over aligned storage, and a byte buffer for binary payloads.
//!
//! # Purpose
//! The containers here trade growth for predictability: capacity is part of the type, storage is
//! allocated at most once, and the alignment of the first element can be raised to any power of
//! two up to 4096 bytes. They suit real-time code such as audio processing, where reallocating
//! in the middle of a callback is not an option.
//!
//! # Contents
//! - [`collections::aligned`]: Raw, uninitialized, aligned storage, inline or on the heap.
//! - [`collections::fixed`]: [`FixedVector`](collections::fixed::FixedVector), an ordered vector
//!   with a fixed capacity.
//! - [`collections::unordered`]: [`UnorderedArray`](collections::unordered::UnorderedArray), an
//!   inline array with `O(1)` removal that doesn't preserve order.
//! - [`bytes`]: [`ByteVector`](bytes::ByteVector) and [`ByteView`](bytes::ByteView), for encoding
//!   and decoding typed values in either byte order.
//! - [`fs`]: The thin file layer used to load and store whole ByteVectors.
//!
//! # Error Handling
//! Broken contracts, like pushing into a full container or reading past the end of a buffer,
//! always panic, in release builds as well as debug ones. The few `*_unchecked` methods are the
//! only exception. Conditions the caller can reasonably handle, such as a missing file or an
//! out of range index passed to `at`, are returned as strongly typed [`Result`]s, using enums of
//! small error structs.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its syscall wrappers. `bytemuck` decides which types
//! can be safely reinterpreted as bytes, `derive_more` removes the boilerplate from error types
//! and `log` reports file activity.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
#[cfg(feature = "bytes")]
pub mod bytes;
#[cfg(all(feature = "fs", unix))]
pub mod fs;

pub(crate) mod util;
