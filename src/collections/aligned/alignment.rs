use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A byte boundary for [`Storage`](super::Storage), encoded as a zero-sized marker type.
///
/// Each marker is a `#[repr(align(N))]` ZST, so embedding `[A; 0]` in a struct raises the struct's
/// alignment to `N` without changing its size. The set of markers is sealed and only contains
/// powers of two, which makes an invalid alignment unrepresentable.
///
/// A requested alignment below `align_of::<T>()` is raised to `align_of::<T>()`; see
/// [`effective_align`].
pub trait Alignment: sealed::Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// The requested boundary in bytes.
    const BYTES: usize;
}

macro_rules! alignment_markers {
    ($($name:ident => $bytes:literal),* $(,)?) => {
        $(
            #[doc = concat!("Aligns storage to ", stringify!($bytes), " bytes.")]
            #[repr(align($bytes))]
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl Alignment for $name {
                const BYTES: usize = $bytes;
            }
        )*
    };
}

alignment_markers! {
    Align1 => 1,
    Align2 => 2,
    Align4 => 4,
    Align8 => 8,
    Align16 => 16,
    Align32 => 32,
    Align64 => 64,
    Align128 => 128,
    Align256 => 256,
    Align512 => 512,
    Align1024 => 1024,
    Align2048 => 2048,
    Align4096 => 4096,
}

/// The natural alignment of the element type, i.e. no extra alignment requested.
pub type Natural = Align1;

/// One cache line on most current hardware.
pub type CacheLine = Align64;

/// The alignment actually used for `T` when `A` is requested: the larger of the two.
pub const fn effective_align<T, A: Alignment>() -> usize {
    if A::BYTES > align_of::<T>() {
        A::BYTES
    } else {
        align_of::<T>()
    }
}

/// Returns true if `addr` lies on an `alignment` boundary.
///
/// # Examples
/// ```
/// # use fst::collections::aligned::is_aligned;
/// assert!(is_aligned(0, 16));
/// assert!(is_aligned(48, 16));
/// assert!(!is_aligned(50, 16));
/// ```
///
/// # Panics
/// Panics in debug builds if `alignment` isn't a power of two.
#[inline]
pub const fn is_aligned(addr: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    addr & (alignment - 1) == 0
}
