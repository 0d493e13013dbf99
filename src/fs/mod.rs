//! Whole-file reads and writes over thin `libc` syscall wrappers.
//!
//! Every syscall error is mapped to a typed condition from [`error`]. Conditions that only a bug
//! could cause, such as a corrupted file descriptor, panic instead.

pub mod error;
mod fd;
mod file;
pub mod panic;
mod tests;

pub use error::*;
pub use file::*;
