use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

use super::{Alignment, Natural, effective_align, is_aligned};

/// Raw, uninitialized, aligned room for a fixed number of `T`s.
///
/// A Storage never constructs or drops elements. Whoever owns it tracks which slots are live and
/// is responsible for dropping them; the Storage only releases its memory. This is what lets
/// [`FixedVector`](crate::collections::fixed::FixedVector) pick inline or heap storage without
/// changing its element handling.
///
/// # Safety
/// Containers write to and read from the slots through raw pointers, trusting this contract:
/// - [`as_ptr`](Storage::as_ptr) and [`as_mut_ptr`](Storage::as_mut_ptr) return a nonnull pointer
///   that is valid for reads and writes of [`CAPACITY`](Storage::CAPACITY) consecutive `T`s.
/// - That pointer is aligned to [`ALIGN`](Storage::ALIGN), which is a power of two no less than
///   `align_of::<T>()`.
/// - The pointer stays the same, and the slots keep their contents, for as long as the Storage
///   isn't moved. Moving it may relocate the slots but must carry their contents with them.
/// - [`uninit`](Storage::uninit) never reads or drops a slot.
///
/// ```compile_fail
/// # use fst::collections::aligned::Storage;
/// struct Bogus;
///
/// impl Storage<u64> for Bogus {
///     const CAPACITY: usize = 4;
///     const ALIGN: usize = 8;
///
///     fn uninit() -> Self {
///         Bogus
///     }
///
///     fn as_ptr(&self) -> *const u64 {
///         std::ptr::null()
///     }
///
///     fn as_mut_ptr(&mut self) -> *mut u64 {
///         std::ptr::null_mut()
///     }
/// }
/// ```
pub unsafe trait Storage<T>: Sized {
    /// The number of `T` slots, fixed by the type.
    const CAPACITY: usize;

    /// The alignment of the first slot in bytes. Always a power of two and never less than
    /// `align_of::<T>()`.
    const ALIGN: usize;

    /// Creates a Storage with every slot uninitialized.
    fn uninit() -> Self;

    /// Returns a pointer to the first slot, aligned to [`Storage::ALIGN`].
    fn as_ptr(&self) -> *const T;

    /// Returns a mutable pointer to the first slot, aligned to [`Storage::ALIGN`].
    fn as_mut_ptr(&mut self) -> *mut T;

    /// Returns every slot, initialized or not.
    fn slots(&self) -> &[MaybeUninit<T>] {
        // SAFETY: The pointer is nonnull, aligned and valid for CAPACITY slots. MaybeUninit<T> has
        // the same layout as T and places no requirements on the contained bytes.
        unsafe { slice::from_raw_parts(self.as_ptr().cast(), Self::CAPACITY) }
    }

    /// Returns every slot mutably, initialized or not.
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: As for slots, with uniqueness guaranteed by the &mut self borrow.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr().cast(), Self::CAPACITY) }
    }
}

/// Storage embedded directly in the owning value.
///
/// No allocation takes place; the slots live and move with whatever contains the buffer. The
/// struct's own alignment is raised to the requested boundary, so the first slot stays aligned
/// even when buffers are laid out back to back in an array.
///
/// # Examples
/// ```
/// # use fst::collections::aligned::{Align64, InlineBuffer, Storage};
/// let buf: InlineBuffer<u8, 3, Align64> = InlineBuffer::new();
/// assert_eq!(buf.as_ptr() as usize % 64, 0);
/// assert_eq!(size_of::<[InlineBuffer<u8, 3, Align64>; 2]>(), 128);
/// ```
#[repr(C)]
pub struct InlineBuffer<T, const N: usize, A: Alignment = Natural> {
    _align: [A; 0],
    slots: [MaybeUninit<T>; N],
}

impl<T, const N: usize, A: Alignment> InlineBuffer<T, N, A> {
    const VALID: () = {
        assert!(N > 0, "storage capacity must be greater than zero");
        assert!(effective_align::<T, A>().is_power_of_two());
    };

    /// Creates a buffer with all `N` slots uninitialized.
    pub const fn new() -> InlineBuffer<T, N, A> {
        let () = Self::VALID;
        InlineBuffer {
            _align: [],
            slots: [const { MaybeUninit::uninit() }; N],
        }
    }
}

// SAFETY: The slots are an inline array of N MaybeUninit<T>, and the zero-length [A; 0] field
// together with the VALID assertions raises the struct's alignment to ALIGN.
unsafe impl<T, const N: usize, A: Alignment> Storage<T> for InlineBuffer<T, N, A> {
    const CAPACITY: usize = N;
    const ALIGN: usize = effective_align::<T, A>();

    fn uninit() -> Self {
        Self::new()
    }

    fn as_ptr(&self) -> *const T {
        self.slots.as_ptr().cast()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.slots.as_mut_ptr().cast()
    }

    fn slots(&self) -> &[MaybeUninit<T>] {
        &self.slots
    }

    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        &mut self.slots
    }
}

impl<T, const N: usize, A: Alignment> Default for InlineBuffer<T, N, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage behind a single allocation owned by the buffer.
///
/// The full capacity is allocated once, in [`HeapBuffer::new`], and released once when the
/// buffer is dropped. Moving a HeapBuffer only moves the pointer, which is what makes moving a
/// heap-backed container O(1) regardless of its capacity.
///
/// # Examples
/// ```
/// # use fst::collections::aligned::{Align32, HeapBuffer, Storage};
/// let buf: HeapBuffer<f32, 10, Align32> = HeapBuffer::new();
/// assert_eq!(buf.as_ptr() as usize % 32, 0);
/// assert_eq!(buf.slots().len(), 10);
/// ```
pub struct HeapBuffer<T, const N: usize, A: Alignment = Natural> {
    ptr: NonNull<MaybeUninit<T>>,
    _phantom: PhantomData<(MaybeUninit<T>, A)>,
}

impl<T, const N: usize, A: Alignment> HeapBuffer<T, N, A> {
    const VALID: () = {
        assert!(N > 0, "storage capacity must be greater than zero");
        assert!(effective_align::<T, A>().is_power_of_two());
    };

    /// Allocates a buffer for `N` uninitialized slots.
    ///
    /// # Panics
    /// Panics if the size of the allocation would exceed [`isize::MAX`].
    ///
    /// # Errors
    /// Calls [`alloc::handle_alloc_error`] if the allocator fails, rather than panicking.
    pub fn new() -> HeapBuffer<T, N, A> {
        let () = Self::VALID;
        let layout = Self::layout();

        let ptr = if layout.size() == 0 {
            // SAFETY: ALIGN is a power of two and therefore nonzero. A zero-sized region needs no
            // allocation, only a pointer with the right alignment.
            unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(layout.align())) }
        } else {
            // SAFETY: Zero-sized layouts have been guarded against.
            NonNull::new(unsafe { alloc::alloc(layout) }.cast())
                .unwrap_or_else(|| alloc::handle_alloc_error(layout))
        };
        debug_assert!(is_aligned(ptr.as_ptr() as usize, layout.align()));

        HeapBuffer {
            ptr,
            _phantom: PhantomData,
        }
    }

    /// The layout of the whole block: `N` slots of `T` on an `ALIGN` boundary.
    ///
    /// # Panics
    /// Panics if the size of the layout would exceed [`isize::MAX`].
    fn layout() -> Layout {
        match Layout::array::<T>(N).and_then(|l| l.align_to(effective_align::<T, A>())) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow: {N} elements exceed the maximum allocation size"),
        }
    }
}

// SAFETY: The pointer comes from an allocation of layout(), which holds N slots on an ALIGN
// boundary and is only released on drop. Moving the buffer only moves the pointer.
unsafe impl<T, const N: usize, A: Alignment> Storage<T> for HeapBuffer<T, N, A> {
    const CAPACITY: usize = N;
    const ALIGN: usize = effective_align::<T, A>();

    fn uninit() -> Self {
        Self::new()
    }

    fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr().cast_const().cast()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr().cast()
    }
}

impl<T, const N: usize, A: Alignment> Default for HeapBuffer<T, N, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize, A: Alignment> Drop for HeapBuffer<T, N, A> {
    fn drop(&mut self) {
        let layout = Self::layout();
        if layout.size() != 0 {
            // SAFETY: The pointer was allocated in new with this exact layout and hasn't been
            // freed. Any live elements are the owner's responsibility and have already been
            // dropped, because the owner is dropped before its fields.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

// SAFETY: HeapBuffer uniquely owns its allocation, so sending it is sending the slots.
unsafe impl<T: Send, const N: usize, A: Alignment> Send for HeapBuffer<T, N, A> {}
// SAFETY: Shared access only hands out shared references into the allocation.
unsafe impl<T: Sync, const N: usize, A: Alignment> Sync for HeapBuffer<T, N, A> {}

macro_rules! impl_slot_access {
    ($name:ident) => {
        impl<T, const N: usize, A: Alignment> Index<usize> for $name<T, N, A> {
            type Output = MaybeUninit<T>;

            /// Returns the slot at `index`, which may or may not hold a live `T`.
            fn index(&self, index: usize) -> &Self::Output {
                &self.slots()[index]
            }
        }

        impl<T, const N: usize, A: Alignment> IndexMut<usize> for $name<T, N, A> {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.slots_mut()[index]
            }
        }

        impl<T, const N: usize, A: Alignment> Debug for $name<T, N, A> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("ptr", &self.as_ptr())
                    .field("capacity", &N)
                    .field("align", &<Self as Storage<T>>::ALIGN)
                    .finish()
            }
        }
    };
}

impl_slot_access!(InlineBuffer);
impl_slot_access!(HeapBuffer);
