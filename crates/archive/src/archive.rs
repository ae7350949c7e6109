//! The archive façade and the chunk API.
//!
//! [`Archive`] pairs a byte channel with the codec traits. It keeps no state
//! of its own beyond the channel's cursors: each call encodes or decodes one
//! complete value, driven only by the static type named at the call site.
//!
//! # Example
//!
//! ```ignore
//! use std::collections::BTreeMap;
//!
//! use compact_archive::Archive;
//!
//! let numbers = [1, 2, 3, 4, 5];
//! let words = vec!["abc".to_string(), "def".to_string()];
//! let table = BTreeMap::from([("a".to_string(), 1u64)]);
//!
//! let mut archive = Archive::new();
//! archive.encode(&numbers)?.encode(&words)?.encode(&table)?;
//!
//! let mut numbers_out = [0; 5];
//! let mut words_out = Vec::<String>::new();
//! let mut table_out = BTreeMap::<String, u64>::new();
//! archive
//!     .decode(&mut numbers_out)?
//!     .decode(&mut words_out)?
//!     .decode(&mut table_out)?;
//! ```

use std::io;

use crate::{
    channel::{Decoder, Encoder, MemoryChannel},
    decode::Decode,
    encode::Encode,
};

/// A byte channel together with the encode/decode entry points.
///
/// `Archive::new()` owns a fresh [`MemoryChannel`]; [`Archive::with_channel`]
/// wraps a channel supplied by the caller. An archive is meant to either
/// produce one value graph or consume one, in exactly the order it was
/// produced. It is not synchronized; share it across threads only behind a
/// lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive<C = MemoryChannel> {
    channel: C,
}

impl Archive<MemoryChannel> {
    /// Creates an archive over an owned, empty in-memory buffer.
    #[must_use]
    pub const fn new() -> Self { Self { channel: MemoryChannel::new() } }

    /// Creates an archive that decodes from a copy of `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { channel: MemoryChannel::from_bytes(bytes.into()) }
    }

    /// Consumes the archive and returns every byte written to it.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> { self.channel.into_bytes() }
}

impl<C> Archive<C> {
    /// Creates an archive over a caller-supplied channel.
    #[must_use]
    pub const fn with_channel(channel: C) -> Self { Self { channel } }

    /// Returns a reference to the channel.
    #[must_use]
    pub const fn get_ref(&self) -> &C { &self.channel }

    /// Returns a mutable reference to the channel.
    #[must_use]
    pub const fn get_mut(&mut self) -> &mut C { &mut self.channel }

    /// Consumes the archive and returns the channel.
    #[must_use]
    pub fn into_inner(self) -> C { self.channel }
}

impl<C: Encoder> Archive<C> {
    /// Encodes `value`, advancing the write cursor by exactly the bytes its
    /// category produces.
    ///
    /// # Errors
    ///
    /// Returns the channel's write error, or
    /// [`io::ErrorKind::InvalidInput`] for a container too large for its
    /// length prefix.
    pub fn encode<T: Encode + ?Sized>(
        &mut self,
        value: &T,
    ) -> io::Result<&mut Self> {
        value.encode(&mut self.channel)?;
        Ok(self)
    }

    /// Encodes each element of `items` with no length prefix.
    ///
    /// Scalars are written with a single copy. Read them back with
    /// [`Archive::decode_slice`] into storage of the same length.
    ///
    /// # Errors
    ///
    /// Same as [`Archive::encode`].
    pub fn encode_slice<T: Encode>(
        &mut self,
        items: &[T],
    ) -> io::Result<&mut Self> {
        T::encode_slice(items, &mut self.channel)?;
        Ok(self)
    }
}

impl<C: Decoder> Archive<C> {
    /// Decodes into `value` in place, advancing the read cursor.
    ///
    /// # Errors
    ///
    /// Returns the channel's failure (such as
    /// [`io::ErrorKind::UnexpectedEof`] for truncated input) or
    /// [`io::ErrorKind::InvalidData`] when the bytes cannot form a `T`.
    pub fn decode<T: Decode>(
        &mut self,
        value: &mut T,
    ) -> io::Result<&mut Self> {
        value.decode_in_place(&mut self.channel)?;
        Ok(self)
    }

    /// Decodes and returns a fresh `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Archive::decode`].
    pub fn decode_value<T: Decode>(&mut self) -> io::Result<T> {
        T::decode(&mut self.channel)
    }

    /// Decodes `items.len()` elements into `items`, with no length prefix.
    ///
    /// # Errors
    ///
    /// Same as [`Archive::decode`].
    pub fn decode_slice<T: Decode>(
        &mut self,
        items: &mut [T],
    ) -> io::Result<&mut Self> {
        T::decode_slice(items, &mut self.channel)?;
        Ok(self)
    }
}

/// Encodes `value` into a standalone byte buffer.
///
/// # Errors
///
/// Fails only when a container is too large for its length prefix.
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(ty = std::any::type_name::<T>())
)]
pub fn chunk_encode<T: Encode + ?Sized>(value: &T) -> io::Result<Vec<u8>> {
    let mut archive = Archive::new();
    archive.encode(value)?;

    let chunk = archive.into_bytes();
    tracing::trace!(len = chunk.len(), "encoded chunk");

    Ok(chunk)
}

/// Decodes a `T` from a buffer produced by [`chunk_encode`].
///
/// Bytes past the end of the value are ignored.
///
/// # Errors
///
/// Returns [`io::ErrorKind::UnexpectedEof`] if `chunk` is too short, or
/// [`io::ErrorKind::InvalidData`] when the bytes cannot form a `T`.
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(ty = std::any::type_name::<T>(), len = chunk.len())
)]
pub fn chunk_decode<T: Decode>(chunk: &[u8]) -> io::Result<T> {
    let mut input = chunk;
    let value = T::decode(&mut input)?;

    if !input.is_empty() {
        tracing::trace!(trailing = input.len(), "chunk has trailing bytes");
    }

    Ok(value)
}

#[cfg(test)]
mod test;
