/// A sample encoding for normalized audio in `[-1, 1]`.
///
/// Integer formats scale by `2^(bits - 1)` in both directions, rounding to the nearest level and
/// saturating at the format's largest value, so a round trip stays within one quantization step
/// (half a step everywhere but the top of the range). Samples outside of `[-1, 1]` are clamped
/// before encoding; `NaN` encodes as silence.
///
/// # Examples
/// ```
/// # use fst::bytes::{ByteRead, ByteVector, PcmFormat};
/// let mut bytes = ByteVector::new();
/// bytes.push_pcm(1.0, PcmFormat::I16);
/// bytes.push_pcm(-0.5, PcmFormat::I24);
/// assert_eq!(bytes.len(), 5);
/// assert_eq!(bytes.read_as::<i16>(0), i16::MAX);
/// assert_eq!(bytes.read_pcm(2, PcmFormat::I24), -0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcmFormat {
    I8,
    I16,
    /// Signed 24-bit, packed into 3 bytes.
    I24,
    I32,
    /// Passed through as a 32-bit float, without clamping.
    F32,
}

impl PcmFormat {
    /// The number of bytes taken by one sample.
    pub const fn width(self) -> usize {
        match self {
            PcmFormat::I8 => 1,
            PcmFormat::I16 => 2,
            PcmFormat::I24 => 3,
            PcmFormat::I32 | PcmFormat::F32 => 4,
        }
    }

    /// Converts `sample` into its target-order representation, returned along with the number of
    /// bytes used from the front of the array.
    pub(crate) fn encode(self, sample: f32) -> ([u8; 4], usize) {
        if self == PcmFormat::F32 {
            return (sample.to_ne_bytes(), 4);
        }

        let clamped = if sample.is_nan() {
            0.0
        } else {
            sample.clamp(-1.0, 1.0)
        };

        // The value fits in width bytes, so only its low bytes are kept.
        let width = self.width();
        let value = scale(clamped, self.full_scale());
        let mut repr = [0; 4];
        if cfg!(target_endian = "little") {
            repr[..width].copy_from_slice(&value.to_le_bytes()[..width]);
        } else {
            repr[..width].copy_from_slice(&value.to_be_bytes()[4 - width..]);
        }
        (repr, width)
    }

    /// Converts a target-order representation, as produced by `encode`, back into a sample.
    pub(crate) fn decode(self, repr: [u8; 4]) -> f32 {
        if self == PcmFormat::F32 {
            return f32::from_ne_bytes(repr);
        }

        let width = self.width();
        let mut wide = [0; 4];
        if cfg!(target_endian = "little") {
            wide[4 - width..].copy_from_slice(&repr[..width]);
        } else {
            wide[..width].copy_from_slice(&repr[..width]);
        }
        // The sample now occupies the high bytes, shifting back down extends its sign.
        let shift = 32 - 8 * width as u32;
        let value = if cfg!(target_endian = "little") {
            i32::from_le_bytes(wide) >> shift
        } else {
            i32::from_be_bytes(wide) >> shift
        };

        (f64::from(value) / self.full_scale()) as f32
    }

    /// The magnitude of the smallest representable integer, `2^(bits - 1)`.
    fn full_scale(self) -> f64 {
        f64::from(1_u32 << (8 * self.width() as u32 - 1))
    }
}

/// Scales a clamped sample by `full_scale` and rounds to the nearest level, saturating at the
/// largest one.
fn scale(sample: f32, full_scale: f64) -> i32 {
    (f64::from(sample) * full_scale).round().min(full_scale - 1.0) as i32
}
