#![warn(missing_docs)]

#[cfg(test)]
pub mod alloc;
pub mod panic;
pub mod result;
#[cfg(all(feature = "fs", unix))]
pub mod syscall;
