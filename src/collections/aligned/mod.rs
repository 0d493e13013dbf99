//! Aligned, uninitialized element storage.
//!
//! [`Storage`] is the seam between memory and bookkeeping: it hands out `CAPACITY` slots on an
//! `ALIGN` boundary and nothing more. [`InlineBuffer`] keeps the slots inside the owning value,
//! [`HeapBuffer`] keeps them behind one allocation. Alignment is chosen with the [`Alignment`]
//! marker types.
//!
//! [`IntoIter`] is the owned iterator shared by every container built on a Storage.

mod alignment;
mod buffer;
mod iter;
mod tests;

pub use alignment::*;
pub use buffer::*;
pub use iter::*;
