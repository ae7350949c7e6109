//! Baselines the benchmarks compare the bulk-copy path against.

#![allow(missing_docs)]

use std::io;

use compact_archive::{
    Decode, Decoder, Encode, MemoryChannel, container::encode_items,
};

/// Encodes `items` as a sequence, one element at a time.
///
/// # Errors
///
/// Fails if `items` is too long for the length prefix.
pub fn encode_element_wise<T: Encode>(items: &[T]) -> io::Result<Vec<u8>> {
    let mut channel = MemoryChannel::with_capacity(
        compact_archive::LENGTH_PREFIX_SIZE + size_of_val(items),
    );
    encode_items(items.len(), items, &mut channel)?;
    Ok(channel.into_bytes())
}

/// Decodes a sequence one element at a time.
///
/// # Errors
///
/// Fails on truncated input.
pub fn decode_element_wise<T: Decode>(mut chunk: &[u8]) -> io::Result<Vec<T>> {
    let len = chunk.read_len()?;
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(T::decode(&mut chunk)?);
    }
    Ok(items)
}
