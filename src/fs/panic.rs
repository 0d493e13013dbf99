use std::error::Error;

use derive_more::{Display, Error};

/// An error condition that can only arise from a bug in this crate, and is raised as a panic.
pub trait Panic: Error {
    #[track_caller]
    fn panic(&self) -> ! {
        panic!("{}", self)
    }
}

#[derive(Debug, Display, Error)]
#[display("file descriptor corruption")]
pub struct BadFdPanic;
impl Panic for BadFdPanic {}

#[derive(Debug, Display, Error)]
#[display("buffer lies outside of the accessible address space")]
pub struct BadBufferPanic;
impl Panic for BadBufferPanic {}
