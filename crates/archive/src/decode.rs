//! The decoding half of the codec.
//!
//! Decoding is the structural mirror of [`Encode`](crate::Encode): the same
//! static type drives the same sequence of reads. Nothing on the wire says
//! what was written, so decoding into a differently shaped type silently
//! produces a wrong value; only channel failures and values Rust cannot
//! represent (an invalid `bool`, `char` or UTF-8 string) are reported.

use std::io;

use crate::{category::Classify, channel::Decoder};

/// A type that can be read from a [`Decoder`].
///
/// Besides constructing a fresh value, a decodable type can be decoded into
/// existing storage with [`Decode::decode_in_place`]. Aggregates use this to
/// fill each declared field through a mutable reference.
pub trait Decode: Classify + Sized {
    /// Reads a fresh value from `decoder`.
    ///
    /// # Errors
    ///
    /// Returns the channel's error when it runs out of bytes, or
    /// [`io::ErrorKind::InvalidData`] when the bytes cannot form a value of
    /// this type.
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self>;

    /// Reads a value from `decoder` into `self`.
    ///
    /// The default decodes a fresh value and assigns it. Every container
    /// keeps that default, so decoding into a non-empty container replaces
    /// its contents; a map or set is never merged with what it held before.
    ///
    /// # Errors
    ///
    /// Same as [`Decode::decode`]. On error `self` may be partially updated.
    fn decode_in_place<D: Decoder + ?Sized>(
        &mut self,
        decoder: &mut D,
    ) -> io::Result<()> {
        *self = Self::decode(decoder)?;
        Ok(())
    }

    /// Reads `len` values into a freshly allocated vector.
    ///
    /// This is the decode side of [`Encode::encode_slice`](crate::Encode):
    /// the default decodes one element at a time, scalars pre-size the
    /// vector and fill it with one copy.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by an element.
    fn decode_vec<D: Decoder + ?Sized>(
        len: usize,
        decoder: &mut D,
    ) -> io::Result<Vec<Self>> {
        let mut items = Vec::with_capacity(
            crate::container::capacity_hint::<Self, D>(len, decoder),
        );
        for _ in 0..len {
            items.push(Self::decode(decoder)?);
        }
        Ok(items)
    }

    /// Reads `items.len()` values into existing storage, with no length
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by an element.
    fn decode_slice<D: Decoder + ?Sized>(
        items: &mut [Self],
        decoder: &mut D,
    ) -> io::Result<()> {
        for item in items {
            item.decode_in_place(decoder)?;
        }
        Ok(())
    }
}
