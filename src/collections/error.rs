//! Errors shared by the fixed-capacity collections.
//!
//! Only [`IndexOutOfBounds`] is ever returned to callers (from the checked `at` accessors). The
//! others describe broken contracts and surface as panic messages.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("index {index} out of bounds for collection with {len} elements")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow: {requested} elements requested of a fixed capacity of {capacity}")]
pub struct CapacityOverflow {
    pub requested: usize,
    pub capacity: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("operation requires a non-empty collection")]
pub struct EmptyCollection;
