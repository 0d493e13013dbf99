#![cfg(test)]

use std::mem::MaybeUninit;

use super::*;
use crate::util::alloc::ZeroSizedType;

#[test]
fn test_heap_alignment_across_instances() {
    let buffers: [HeapBuffer<f32, 2, Align4>; 4] = std::array::from_fn(|_| HeapBuffer::new());

    for buf in &buffers {
        assert_eq!(
            buf.as_ptr() as usize % 4,
            0,
            "Every independently allocated buffer should be aligned."
        );
    }

    let wide: [HeapBuffer<u8, 5, Align256>; 4] = std::array::from_fn(|_| HeapBuffer::new());
    for buf in &wide {
        assert!(is_aligned(buf.as_ptr() as usize, 256));
    }
}

#[test]
fn test_inline_alignment_without_drift() {
    let buffers: [InlineBuffer<u8, 3, Align64>; 5] = std::array::from_fn(|_| InlineBuffer::new());

    assert_eq!(
        size_of::<InlineBuffer<u8, 3, Align64>>(),
        64,
        "Padding should round each buffer up to its alignment."
    );
    for buf in &buffers {
        assert!(
            is_aligned(buf.as_ptr() as usize, 64),
            "Contiguous buffers shouldn't drift off their boundary."
        );
    }
}

#[test]
fn test_effective_alignment() {
    assert_eq!(<InlineBuffer<u64, 2, Align1> as Storage<u64>>::ALIGN, align_of::<u64>());
    assert_eq!(<InlineBuffer<u8, 2, Align16> as Storage<u8>>::ALIGN, 16);
    assert_eq!(<HeapBuffer<u16, 2, CacheLine> as Storage<u16>>::ALIGN, 64);
    assert_eq!(align_of::<InlineBuffer<u64, 1>>(), align_of::<u64>());
}

#[test]
fn test_slot_access() {
    let mut buf: HeapBuffer<String, 3> = HeapBuffer::new();
    assert_eq!(buf.slots().len(), 3);

    buf[1] = MaybeUninit::new(String::from("slot"));
    // SAFETY: Slot 1 was just initialized.
    let value = unsafe { buf[1].assume_init_read() };
    assert_eq!(value, "slot");

    let mut inline: InlineBuffer<u32, 4, Align16> = InlineBuffer::new();
    inline.slots_mut()[3].write(7);
    // SAFETY: Slot 3 was just initialized.
    assert_eq!(unsafe { inline[3].assume_init() }, 7);
}

#[test]
fn test_zst_storage() {
    let buf: HeapBuffer<ZeroSizedType, 8, Align32> = HeapBuffer::new();
    assert!(
        is_aligned(buf.as_ptr() as usize, 32),
        "A dangling ZST pointer should still be aligned."
    );
    assert_eq!(buf.slots().len(), 8);
    drop(buf);
}

#[test]
fn test_align_math() {
    assert!(is_aligned(4096, 4096));
    assert!(!is_aligned(4097, 2));
    assert_eq!(effective_align::<u8, Natural>(), 1);
    assert_eq!(effective_align::<u32, Align2>(), 4);
}
