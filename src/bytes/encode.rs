use bytemuck::NoUninit;

use super::{ByteOrder, ByteVector};

/// A value that can be appended to a [`ByteVector`].
///
/// Primitives are written as their raw representation in the requested byte order. Containers
/// and tuples encode each of their elements in turn, recursively, with no length prefix or
/// padding, so a `Vec<Vec<u16>>` becomes one packed run of `u16`s.
///
/// Plain structs can be pushed through [`Raw`], or with
/// [`ByteVector::push_raw`](ByteVector::push_raw).
pub trait Encode {
    /// Appends `self` to `out` in the byte order `O`.
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector);
}

macro_rules! impl_encode_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
                    out.push_raw_in::<O, $ty>(*self);
                }
            }
        )*
    };
}

impl_encode_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Encode for bool {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        out.push_raw_in::<O, u8>(u8::from(*self));
    }
}

/// Written as its 32-bit scalar value.
impl Encode for char {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        out.push_raw_in::<O, u32>(u32::from(*self));
    }
}

/// Written as its UTF-8 bytes, without a terminator.
impl Encode for str {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl Encode for String {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        self.as_str().encode::<O>(out);
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        (**self).encode::<O>(out);
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        (**self).encode::<O>(out);
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        for item in self {
            item.encode::<O>(out);
        }
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        self.as_slice().encode::<O>(out);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        self.as_slice().encode::<O>(out);
    }
}

#[cfg(feature = "fixed")]
impl<T, const N: usize, S> Encode for crate::collections::fixed::FixedVector<T, N, S>
where
    T: Encode,
    S: crate::collections::aligned::Storage<T>,
{
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        self.as_slice().encode::<O>(out);
    }
}

#[cfg(feature = "unordered")]
impl<T: Encode, const N: usize> Encode for crate::collections::unordered::UnorderedArray<T, N> {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        self.as_slice().encode::<O>(out);
    }
}

macro_rules! impl_encode_tuple {
    ($($name:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
                let ($($name,)+) = self;
                $($name.encode::<O>(out);)+
            }
        }
    };
}

impl_encode_tuple!(A);
impl_encode_tuple!(A, B);
impl_encode_tuple!(A, B, C);
impl_encode_tuple!(A, B, C, D);

/// Encodes the wrapped value as one opaque block of bytes, reversed as a whole for a foreign byte
/// order.
///
/// # Examples
/// ```
/// # use fst::bytes::{ByteRead, ByteVector, Raw};
/// #[derive(Clone, Copy, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Header {
///     channels: u16,
///     bits: u16,
///     rate: u32,
/// }
///
/// let header = Header { channels: 2, bits: 16, rate: 44100 };
/// let mut bytes = ByteVector::new();
/// bytes.push(Raw(header));
/// assert_eq!(bytes.len(), 8);
/// assert_eq!(bytes.read_as::<Header>(0), header);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Raw<T: NoUninit>(pub T);

impl<T: NoUninit> Encode for Raw<T> {
    fn encode<O: ByteOrder>(&self, out: &mut ByteVector) {
        out.push_raw_in::<O, T>(self.0);
    }
}
