use derive_more::{Display, Error};

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("byte range {offset}..{offset}+{size} out of bounds for buffer of {len} bytes")]
pub struct ByteRangeOutOfBounds {
    pub offset: usize,
    pub size: usize,
    pub len: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow: a byte buffer can't exceed isize::MAX bytes")]
pub struct ByteCapacityOverflow;
