//! The scalar codec: fixed-size values copied byte for byte.
//!
//! A scalar is written as exactly `size_of::<T>()` bytes of its in-memory
//! representation and read back into the same storage. No byte-order
//! conversion takes place, so the bytes are only meaningful on a host with
//! the same layout.
//!
//! Plain-old-data user types join this category through [`scalar!`]. The
//! type must derive `zerocopy`'s `IntoBytes`, `FromBytes` and `Immutable`,
//! which guarantees every byte pattern is a valid value:
//!
//! ```ignore
//! use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
//!
//! #[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
//! #[repr(C)]
//! struct Rect {
//!     left: i32,
//!     top: i32,
//!     right: i32,
//!     bottom: i32,
//! }
//!
//! compact_archive::scalar!(Rect);
//! ```
//!
//! `bool` and `char` are scalars too, but not every bit pattern is a valid
//! `bool` or `char`; decoding one of those is reported as
//! [`io::ErrorKind::InvalidData`].

use std::{io, mem::size_of};

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{
    category::{Category, Classify},
    channel::{Decoder, Encoder},
    container::capacity_hint,
    decode::Decode,
    encode::Encode,
};

/// A type whose in-memory bytes are its wire form.
///
/// Implemented through [`scalar!`](crate::scalar), which also implements
/// [`Classify`], [`Encode`] and [`Decode`] with the bulk-copy paths.
pub trait Scalar: Copy + IntoBytes + FromBytes + Immutable {}

/// Decodes `len` scalars with as few reads as possible.
///
/// When the channel knows its remaining size the vector is sized up front
/// and filled with a single read. Otherwise it grows in blocks of at most
/// [`PREALLOCATION_BUDGET`](crate::container::PREALLOCATION_BUDGET) bytes,
/// one read per block, so a truncated stream fails before a bogus length
/// is ever allocated.
///
/// # Errors
///
/// Returns [`io::ErrorKind::UnexpectedEof`] without allocating when the
/// channel knows it holds fewer than `len` elements, otherwise propagates
/// the channel's error.
pub fn decode_scalar_vec<T: Scalar, D: Decoder + ?Sized>(
    len: usize,
    decoder: &mut D,
) -> io::Result<Vec<T>> {
    if len == 0 {
        return Ok(Vec::new());
    }

    let needed = len.saturating_mul(size_of::<T>());
    if let Some(remaining) = decoder.remaining() {
        if needed > remaining {
            tracing::debug!(len, needed, remaining, "scalar run exceeds input");
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{len} elements need {needed} bytes but only {remaining} \
                     remain"
                ),
            ));
        }
    }

    let block = capacity_hint::<T, D>(len, decoder).max(1);
    let mut items = Vec::with_capacity(block);
    while items.len() < len {
        let start = items.len();
        items.resize_with(len.min(start + block), T::new_zeroed);
        decoder.read_scalars(&mut items[start..])?;
    }
    Ok(items)
}

/// Marks one or more plain-old-data types as [`Scalar`] and implements the
/// codec traits for them.
///
/// Each type must implement `Copy` and `zerocopy`'s `IntoBytes`,
/// `FromBytes` and `Immutable`. Generic types are not supported.
#[macro_export]
macro_rules! scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Scalar for $ty {}

            impl $crate::Classify for $ty {
                const CATEGORY: $crate::Category = $crate::Category::Scalar;
            }

            impl $crate::Encode for $ty {
                fn encode<__E: $crate::Encoder + ?Sized>(
                    &self,
                    encoder: &mut __E,
                ) -> ::std::io::Result<()> {
                    encoder.emit_scalar(self)
                }

                fn encode_slice<__E: $crate::Encoder + ?Sized>(
                    items: &[Self],
                    encoder: &mut __E,
                ) -> ::std::io::Result<()> {
                    encoder.emit_scalars(items)
                }
            }

            impl $crate::Decode for $ty {
                fn decode<__D: $crate::Decoder + ?Sized>(
                    decoder: &mut __D,
                ) -> ::std::io::Result<Self> {
                    decoder.read_scalar()
                }

                fn decode_in_place<__D: $crate::Decoder + ?Sized>(
                    &mut self,
                    decoder: &mut __D,
                ) -> ::std::io::Result<()> {
                    decoder.read_scalars(::std::slice::from_mut(self))
                }

                fn decode_vec<__D: $crate::Decoder + ?Sized>(
                    len: usize,
                    decoder: &mut __D,
                ) -> ::std::io::Result<::std::vec::Vec<Self>> {
                    $crate::scalar::decode_scalar_vec(len, decoder)
                }

                fn decode_slice<__D: $crate::Decoder + ?Sized>(
                    items: &mut [Self],
                    decoder: &mut __D,
                ) -> ::std::io::Result<()> {
                    decoder.read_scalars(items)
                }
            }
        )+
    };
}

scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

// =============================================================================
// Scalars with invalid bit patterns
// =============================================================================

impl Classify for bool {
    const CATEGORY: Category = Category::Scalar;
}

impl Encode for bool {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encoder.emit_scalar(&u8::from(*self))
    }
}

impl Decode for bool {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        match decoder.read_scalar::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid bool byte: {byte:#04x}"),
            )),
        }
    }
}

impl Classify for char {
    const CATEGORY: Category = Category::Scalar;
}

impl Encode for char {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encoder.emit_scalar(&u32::from(*self))
    }
}

impl Decode for char {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        let code = decoder.read_scalar::<u32>()?;
        Self::from_u32(code).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid Unicode scalar value: {code:#x}"),
            )
        })
    }
}

// =============================================================================
// Fixed-size arrays
// =============================================================================

// An array of scalars is a scalar: its bytes are the elements' bytes back to
// back. Any other array is a fixed-arity tuple of identical elements. Either
// way there is no length prefix.
impl<T: Classify, const N: usize> Classify for [T; N] {
    const CATEGORY: Category = if T::CATEGORY.is_scalar() {
        Category::Scalar
    } else {
        Category::Tuple
    };
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        T::encode_slice(self, encoder)
    }

    fn encode_slice<E: Encoder + ?Sized>(
        items: &[Self],
        encoder: &mut E,
    ) -> io::Result<()> {
        T::encode_slice(items.as_flattened(), encoder)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        let items = T::decode_vec(N, decoder)?;
        items.try_into().map_err(|items: Vec<T>| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {N} array elements, decoded {}", items.len()),
            )
        })
    }

    fn decode_in_place<D: Decoder + ?Sized>(
        &mut self,
        decoder: &mut D,
    ) -> io::Result<()> {
        T::decode_slice(self, decoder)
    }

    fn decode_slice<D: Decoder + ?Sized>(
        items: &mut [Self],
        decoder: &mut D,
    ) -> io::Result<()> {
        T::decode_slice(items.as_flattened_mut(), decoder)
    }
}

#[cfg(test)]
mod test;
