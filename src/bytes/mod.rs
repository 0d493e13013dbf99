//! A growable byte buffer for building and decoding binary payloads.
//!
//! [`ByteVector`] owns its bytes and [`ByteView`] borrows someone else's. Both decode through the
//! [`ByteRead`] trait, by byte offset, in either [`ByteOrder`]. Values are written with the
//! [`Encode`] trait, which packs containers element by element with no framing, and with the PCM
//! helpers described by [`PcmFormat`].
//!
//! With the `fs` feature, a ByteVector can also be filled from, or written out to, a whole file.

mod byte_vector;
mod byte_view;
mod encode;
mod error;
#[cfg(all(feature = "fs", unix))]
mod file;
mod order;
mod pcm;
mod read;
mod tests;

pub use byte_vector::*;
pub use byte_view::*;
pub use encode::*;
pub use error::*;
pub use order::*;
pub use pcm::*;
pub use read::ByteRead;
