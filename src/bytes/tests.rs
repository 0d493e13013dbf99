#![cfg(test)]

use bytemuck::{Pod, Zeroable};

use super::*;
use crate::util::panic::assert_panics;

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Vertex {
    x: f32,
    y: f32,
    id: u32,
}

#[test]
fn test_push_sequential_ints() {
    let mut bytes = ByteVector::new();
    bytes.push(32_i32);
    bytes.push(64_i32);

    assert_eq!(bytes.len(), 8);
    assert_eq!(bytes.read_as::<i32>(0), 32);
    assert_eq!(bytes.read_as::<i32>(4), 64);
    assert_eq!(bytes, [32, 0, 0, 0, 64, 0, 0, 0]);
}

#[test]
fn test_push_vec_twice() {
    let values: Vec<i32> = (0..10).map(|i| i * 3 - 7).collect();
    let mut bytes = ByteVector::new();
    bytes.push(&values);
    bytes.push(values.clone());

    assert_eq!(bytes.len(), 80);
    for half in [0, 40] {
        for (i, value) in values.iter().enumerate() {
            assert_eq!(bytes.read_nth_as::<i32>(half, i), *value);
        }
    }
}

#[test]
fn test_nested_containers_are_packed() {
    let nested = vec![vec![1_u16, 2], vec![], vec![3]];
    let mut bytes = ByteVector::new();
    bytes.push(&nested);
    bytes.push(("ab", 'c', true));

    assert_eq!(bytes.len(), 6 + 2 + 4 + 1);
    assert_eq!(bytes.read_nth_as::<u16>(0, 2), 3);
    assert_eq!(&bytes[6..8], b"ab");
    assert_eq!(bytes.read_as::<u32>(8), u32::from('c'));
    assert_eq!(bytes[12], 1);
}

#[test]
fn test_byte_order() {
    let mut bytes = ByteVector::new();
    bytes.push(0x1122_3344_u32);
    bytes.push_in::<BigEndian, _>(0x1122_3344_u32);
    assert_eq!(bytes, [0x44, 0x33, 0x22, 0x11, 0x11, 0x22, 0x33, 0x44]);

    assert_eq!(bytes.read_as_in::<BigEndian, u32>(4), 0x1122_3344);
    assert_eq!(bytes.read_as_in::<BigEndian, u32>(0), 0x4433_2211);
    assert_eq!(bytes.read_as_in::<NetworkEndian, u32>(4), 0x1122_3344);

    let mut floats = ByteVector::new();
    floats.push_in::<BigEndian, _>([1.5_f64, -2.25]);
    let mut out = [0.0; 2];
    floats.copy_as_in::<BigEndian, f64>(0, &mut out);
    assert_eq!(out, [1.5, -2.25]);
    assert_eq!(floats.read_nth_as_in::<BigEndian, f64>(0, 1), -2.25);
}

#[test]
fn test_push_slice() {
    let mut little = ByteVector::new();
    little.push_slice(&[0x0102_u16, 0x0304]);
    assert_eq!(little, [2, 1, 4, 3]);

    let mut big = ByteVector::new();
    big.push_slice_in::<BigEndian, u16>(&[0x0102, 0x0304]);
    assert_eq!(big, [1, 2, 3, 4], "Each value should be reversed on its own.");
}

#[test]
fn test_raw_structs() {
    let vertex = Vertex { x: 1.0, y: -1.0, id: 7 };
    let mut bytes = ByteVector::new();
    bytes.push_raw(vertex);
    bytes.push(Raw(vertex));

    assert_eq!(bytes.len(), 2 * size_of::<Vertex>());
    assert_eq!(bytes.read_as::<Vertex>(0), vertex);
    assert_eq!(bytes.read_nth_as::<Vertex>(0, 1), vertex);

    let mut big = ByteVector::new();
    big.push_raw_in::<BigEndian, Vertex>(vertex);
    assert_eq!(big.read_as_in::<BigEndian, Vertex>(0), vertex);
}

#[test]
fn test_unaligned_reads() {
    let mut bytes = ByteVector::new();
    bytes.push(1_u8);
    bytes.push(0xdead_beef_u32);
    bytes.push(2.5_f64);

    assert_eq!(bytes.read_as::<u32>(1), 0xdead_beef);
    assert_eq!(bytes.read_as::<f64>(5), 2.5);
}

#[test]
fn test_out_of_range_reads_panic() {
    let mut bytes = ByteVector::new();
    bytes.push(1_u32);

    assert_panics!({
        bytes.read_as::<u64>(0);
    });
    assert_panics!({
        bytes.read_as::<u8>(4);
    });
    assert_panics!({
        bytes.read_nth_as::<u32>(0, usize::MAX);
    });
    assert_panics!({
        let mut out = [0_u16; 3];
        bytes.copy_as(0, &mut out);
    });
    assert_panics!({
        bytes.as_view().subview(2, 3);
    });
    assert_eq!(bytes.read_as::<u8>(3), 0);
}

#[test]
fn test_view_mut() {
    let mut bytes = ByteVector::new();
    bytes.push(Raw(Vertex { x: 0.0, y: 0.0, id: 1 }));
    bytes.push(Raw(Vertex { x: 0.0, y: 0.0, id: 2 }));

    let second = bytes.view_mut::<Vertex>(size_of::<Vertex>());
    second.x = 4.0;
    second.id += 10;

    assert_eq!(bytes.read_nth_as::<Vertex>(0, 1), Vertex { x: 4.0, y: 0.0, id: 12 });
    assert_eq!(bytes.view::<u32>(8), &1);

    assert_panics!({
        bytes.view_mut::<u32>(1);
    }, "Misaligned views should panic.");
    assert_panics!({
        bytes.view_mut::<u32>(24);
    });
}

#[test]
fn test_alignment_and_growth() {
    let mut bytes = ByteVector::new();
    assert_eq!(bytes.capacity(), 0);

    for i in 0..1000_u32 {
        bytes.push(i);
        assert_eq!(bytes.as_ptr() as usize % BYTE_VECTOR_ALIGN, 0);
    }
    assert_eq!(bytes.len(), 4000);
    assert!(bytes.capacity() >= 4000);
    assert_eq!(bytes.read_nth_as::<u32>(0, 999), 999);

    bytes.truncate(8);
    assert_eq!(bytes.len(), 8);
    bytes.clear();
    assert!(bytes.is_empty());

    let reserved = ByteVector::with_capacity(10);
    assert_eq!(reserved.capacity(), 10);
}

#[test]
fn test_find() {
    let mut bytes = ByteVector::from(b"RIFF\0\0\0\0WAVEfmt data");
    bytes.push(0_u32);

    assert_eq!(bytes.find(b"RIFF"), Some(0));
    assert_eq!(bytes.find(b"fmt "), Some(12));
    assert_eq!(bytes.find(b"data"), Some(16));
    assert_eq!(bytes.find(b"LIST"), None);
    assert_eq!(bytes.find_from(1, b"RIFF"), None);
    assert_eq!(bytes.find_from(12, b"data"), Some(16));
    assert_eq!(bytes.find(b""), Some(0));
    assert_eq!(bytes.find_from(bytes.len() + 1, b""), None);

    let view = bytes.as_view().subview(8, 4);
    assert_eq!(view.find(b"WAVE"), Some(0));
    assert_eq!(view.find(b"WAVEf"), None, "A view shouldn't match past its end.");
}

#[test]
fn test_pcm_round_trip() {
    let samples = [-1.0_f32, -0.75, -0.1, 0.0, 0.3, 0.999, 1.0];
    let formats = [
        (PcmFormat::I8, 1.0 / 128.0),
        (PcmFormat::I16, 1.0 / 32768.0),
        (PcmFormat::I24, 1.0 / 8_388_608.0),
        // Bounded by the precision of f32 rather than by quantization.
        (PcmFormat::I32, 1e-7),
        (PcmFormat::F32, 0.0),
    ];

    for (format, tolerance) in formats {
        let mut little = ByteVector::new();
        let mut big = ByteVector::new();
        for sample in samples {
            little.push_pcm(sample, format);
            big.push_pcm_in::<BigEndian>(sample, format);
        }
        assert_eq!(little.len(), samples.len() * format.width());

        for (i, sample) in samples.into_iter().enumerate() {
            let offset = i * format.width();
            let decoded = little.read_pcm(offset, format);
            assert!(
                (decoded - sample).abs() <= tolerance,
                "{format:?}: {sample} decoded as {decoded}"
            );
            assert_eq!(big.read_pcm_in::<BigEndian>(offset, format), decoded);
        }
    }
}

#[test]
fn test_pcm_i16_within_one_step() {
    let step = 1.0 / 32768.0;
    let near_full_scale = 32000.49 / 32767.0;
    let sweep = (0..=40_000).map(|i| i as f32 / 20_000.0 - 1.0);

    for sample in sweep.chain([near_full_scale, -near_full_scale]) {
        let mut bytes = ByteVector::new();
        bytes.push_pcm(sample, PcmFormat::I16);
        let decoded = bytes.read_pcm(0, PcmFormat::I16);
        assert!(
            (decoded - sample).abs() <= step,
            "{sample} decoded as {decoded}, off by {} steps",
            (decoded - sample).abs() / step
        );
    }
}

#[test]
fn test_pcm_scaling() {
    let mut bytes = ByteVector::new();
    bytes.push_pcm(1.0, PcmFormat::I16);
    bytes.push_pcm(-1.0, PcmFormat::I16);
    bytes.push_pcm(3.0, PcmFormat::I8);
    bytes.push_pcm(f32::NAN, PcmFormat::I8);
    assert_eq!(bytes.read_as::<i16>(0), 32767);
    assert_eq!(bytes.read_as::<i16>(2), i16::MIN);
    assert_eq!(bytes.read_as::<i8>(4), 127, "Samples should be clamped.");
    assert_eq!(bytes.read_as::<i8>(5), 0);

    // -2 in 24 bits.
    let raw = ByteView::new(&[0xfe, 0xff, 0xff, 0x00, 0x00, 0x80]);
    assert_eq!(raw.read_pcm(0, PcmFormat::I24), -2.0 / 8_388_608.0);
    assert_eq!(raw.read_pcm(3, PcmFormat::I24), -1.0);
    assert_eq!(
        raw.read_pcm_in::<BigEndian>(0, PcmFormat::I24),
        (0xfe_ffff - 0x100_0000) as f32 / 8_388_608.0
    );
}

#[test]
fn test_view_borrows() {
    let owned: Vec<u8> = vec![1, 0, 2, 0];
    let view = ByteView::from(owned.as_slice());
    assert_eq!(view.len(), 4);
    assert_eq!(view.read_nth_as::<u16>(0, 1), 2);

    let copy = ByteVector::from(view);
    assert_eq!(copy.as_view(), view);
    assert!(ByteView::default().is_empty());
}

#[test]
fn test_traits() {
    use std::io::Write;

    let mut bytes = ByteVector::new();
    write!(bytes, "{}-{}", 1, 2).unwrap();
    assert_eq!(bytes, *b"1-2");

    let clone = bytes.clone();
    assert_eq!(clone, bytes);
    bytes.extend([b'!']);
    assert_ne!(clone, bytes);

    let collected: ByteVector = (0..4).collect();
    assert_eq!(collected, [0, 1, 2, 3]);
    assert_eq!(
        format!("{:?}", ByteVector::from(&[7])),
        "ByteVector { contents: [7], len: 1, cap: 1 }"
    );
}

#[cfg(all(feature = "fixed", feature = "unordered"))]
#[test]
fn test_push_fixed_collections() {
    use crate::collections::fixed::FixedVector;
    use crate::collections::unordered::UnorderedArray;

    let vec: FixedVector<u16, 4> = [1, 2, 3].into_iter().collect();
    let arr: UnorderedArray<u16, 2> = [9].into_iter().collect();
    let mut bytes = ByteVector::new();
    bytes.push(&vec);
    bytes.push(&arr);
    assert_eq!(bytes, [1, 0, 2, 0, 3, 0, 9, 0]);
}

#[cfg(all(feature = "fs", unix))]
mod file {
    use std::fs;

    use super::*;
    use crate::fs::{MissingComponentError, OpenError, ReadFileError};

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.bin");

        let mut bytes = ByteVector::new();
        bytes.push((0..5000).map(|i| i as f32 / 5000.0).collect::<Vec<_>>());
        bytes.write_to_file(&path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 20000);

        let loaded = ByteVector::from_file(&path).unwrap();
        assert_eq!(loaded, bytes);
        assert_eq!(loaded.read_nth_as::<f32>(0, 2500), 0.5);

        let mut appended = ByteVector::from(b"head");
        assert_eq!(appended.read_file(&path), Ok(20000));
        assert_eq!(appended.len(), 20004);
        assert_eq!(&appended[4..], bytes.as_slice());
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");

        ByteVector::new().write_to_file(&path).unwrap();
        let loaded = ByteVector::from_file(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_file_capacity_fits_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.bin");
        let contents: Vec<u8> = (0..100_000_u32).map(|i| (i % 253) as u8).collect();
        fs::write(&path, &contents).unwrap();

        let loaded = ByteVector::from_file(&path).unwrap();
        assert_eq!(loaded.len(), 100_000);
        assert_eq!(loaded.as_slice(), contents.as_slice());
        assert!(
            loaded.capacity() < 2 * loaded.len(),
            "Loading a file shouldn't grow past its size, got capacity {}.",
            loaded.capacity()
        );

        let mut appended = ByteVector::from(b"head");
        assert_eq!(appended.read_file(&path), Ok(100_000));
        assert!(appended.capacity() < 2 * appended.len());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = ByteVector::from(b"keep");

        let result = bytes.read_file(dir.path().join("missing"));
        assert_eq!(
            result,
            Err(ReadFileError::Open(OpenError::MissingComponent(MissingComponentError)))
        );
        assert_eq!(bytes, *b"keep", "A failed read should leave the buffer as it was.");

        let result = ByteVector::from_file(dir.path());
        assert!(result.is_err(), "Reading a directory should fail.");
    }
}
