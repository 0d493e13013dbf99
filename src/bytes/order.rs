use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// The order in which the bytes of a value are written to, and read from, a byte buffer.
///
/// Values are handled in their in-memory representation: whichever order matches the target is a
/// plain copy and the other one reverses each value's bytes. Little-endian is the default
/// everywhere an order isn't named.
pub trait ByteOrder: sealed::Sealed + Copy + Default + Debug + 'static {
    /// True if this order differs from the target's, so each value's bytes must be reversed.
    const REVERSED: bool;

    /// Copies the representation of one value from `src` into `dst`, applying this order.
    ///
    /// # Panics
    /// Panics if the slices have different lengths.
    #[inline]
    fn copy_value(src: &[u8], dst: &mut [u8]) {
        if Self::REVERSED {
            assert_eq!(src.len(), dst.len(), "source and destination differ in length");
            for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
                *d = *s;
            }
        } else {
            dst.copy_from_slice(src);
        }
    }

    /// Copies a packed run of `width`-byte values from `src` into `dst`, applying this order to
    /// each value separately.
    ///
    /// # Panics
    /// Panics if the slices have different lengths or aren't a multiple of `width`.
    #[inline]
    fn copy_values(src: &[u8], dst: &mut [u8], width: usize) {
        if Self::REVERSED && width > 1 {
            assert_eq!(src.len(), dst.len(), "source and destination differ in length");
            assert_eq!(src.len() % width, 0, "byte run isn't a whole number of values");
            for (d, s) in dst.chunks_exact_mut(width).zip(src.chunks_exact(width)) {
                Self::copy_value(s, d);
            }
        } else {
            dst.copy_from_slice(src);
        }
    }
}

/// Least significant byte first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LittleEndian;

/// Most significant byte first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigEndian;

impl sealed::Sealed for LittleEndian {}
impl sealed::Sealed for BigEndian {}

impl ByteOrder for LittleEndian {
    const REVERSED: bool = cfg!(target_endian = "big");
}

impl ByteOrder for BigEndian {
    const REVERSED: bool = cfg!(target_endian = "little");
}

/// Network byte order.
pub type NetworkEndian = BigEndian;
