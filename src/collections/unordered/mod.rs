//! A module containing [`UnorderedArray`], a fixed-capacity collection with `O(1)` removal.

mod tests;
mod unordered_array;

pub use unordered_array::*;
