//! The container codec.
//!
//! A container is written as a [`LengthPrefix`](crate::channel::LengthPrefix)
//! holding its element count, followed by each element in iteration order.
//! The count is of elements, never bytes.
//!
//! Decoding reads the count and rebuilds the container through one of two
//! capabilities:
//!
//! - [`AppendSequence`]: elements are pushed at the end, so the decoded
//!   order is the encoded order.
//! - [`KeyedContainer`]: elements are inserted by key and the container
//!   imposes its own order. Only the set of elements survives a round trip,
//!   never their positions. When the same key appears more than once the
//!   last occurrence wins.
//!
//! Contiguous containers of scalars (`Vec<T>`, `VecDeque<T>`, `String`,
//! slices) skip the per-element recursion: the whole element block is moved
//! with one copy in each direction. The bytes are identical to what the
//! element-wise path would produce.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    hash::{BuildHasher, Hash},
    io,
};

use crate::{
    category::{Category, Classify},
    channel::{Decoder, Encoder},
    decode::Decode,
    encode::Encode,
};

/// A container rebuilt by appending decoded elements at its end.
pub trait AppendSequence: Default {
    /// The element type.
    type Item;

    /// Makes room for `additional` more elements.
    fn reserve_items(&mut self, additional: usize) { let _ = additional; }

    /// Appends `item` after the current last element.
    fn append_item(&mut self, item: Self::Item);
}

/// A container rebuilt by inserting decoded elements by key.
///
/// Decoding always starts from [`Default::default`]. Decoding in place into
/// an existing container replaces it instead of inserting into it.
pub trait KeyedContainer: Default {
    /// The element type; `(key, value)` for maps.
    type Item;

    /// Makes room for `additional` more elements.
    fn reserve_items(&mut self, additional: usize) { let _ = additional; }

    /// Inserts `item`, replacing any element with an equal key.
    fn insert_item(&mut self, item: Self::Item);
}

/// Writes `len` followed by every element of `items`.
///
/// `len` must equal the number of elements `items` yields.
///
/// # Errors
///
/// Fails if `len` does not fit the length prefix or an element fails to
/// encode.
pub fn encode_items<I, E>(
    len: usize,
    items: I,
    encoder: &mut E,
) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: Encode,
    E: Encoder + ?Sized,
{
    encoder.emit_len(len)?;
    for item in items {
        item.encode(encoder)?;
    }
    Ok(())
}

/// Upper bound, in bytes, on what decoding reserves ahead of reading when
/// the channel cannot say how much input is left.
pub const PREALLOCATION_BUDGET: usize = 64 * 1024;

/// Number of `T` elements worth reserving before decoding `len` of them.
///
/// Bounded by the bytes the channel has left, or by
/// [`PREALLOCATION_BUDGET`] when that is unknown, so a corrupt length prefix
/// cannot force a huge allocation.
pub(crate) fn capacity_hint<T, D: Decoder + ?Sized>(
    len: usize,
    decoder: &D,
) -> usize {
    let limit = decoder.remaining().unwrap_or_else(|| {
        PREALLOCATION_BUDGET / std::mem::size_of::<T>().max(1)
    });
    len.min(limit)
}

/// Reads a length prefix and that many elements, appending each one.
///
/// # Errors
///
/// Propagates failures from the prefix or any element.
pub fn decode_appending<C, D>(decoder: &mut D) -> io::Result<C>
where
    C: AppendSequence,
    C::Item: Decode,
    D: Decoder + ?Sized,
{
    let len = decoder.read_len()?;
    let mut container = C::default();
    container.reserve_items(capacity_hint::<C::Item, D>(len, decoder));
    for _ in 0..len {
        container.append_item(C::Item::decode(decoder)?);
    }
    Ok(container)
}

/// Reads a length prefix and that many elements, inserting each one by key.
///
/// # Errors
///
/// Propagates failures from the prefix or any element.
pub fn decode_keyed<C, D>(decoder: &mut D) -> io::Result<C>
where
    C: KeyedContainer,
    C::Item: Decode,
    D: Decoder + ?Sized,
{
    let len = decoder.read_len()?;
    let mut container = C::default();
    container.reserve_items(capacity_hint::<C::Item, D>(len, decoder));
    for _ in 0..len {
        container.insert_item(C::Item::decode(decoder)?);
    }
    Ok(container)
}

// =============================================================================
// Contiguous sequences
// =============================================================================

impl<T: Classify> Classify for [T] {
    const CATEGORY: Category = Category::Sequence;
}

impl<T: Encode> Encode for [T] {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encoder.emit_len(self.len())?;
        T::encode_slice(self, encoder)
    }
}

impl<T: Classify> Classify for Vec<T> {
    const CATEGORY: Category = Category::Sequence;
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        let len = decoder.read_len()?;
        T::decode_vec(len, decoder)
    }
}

impl<T> AppendSequence for Vec<T> {
    type Item = T;

    fn reserve_items(&mut self, additional: usize) { self.reserve(additional); }

    fn append_item(&mut self, item: T) { self.push(item); }
}

impl<T: Classify> Classify for VecDeque<T> {
    const CATEGORY: Category = Category::Sequence;
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encoder.emit_len(self.len())?;
        let (front, back) = self.as_slices();
        T::encode_slice(front, encoder)?;
        T::encode_slice(back, encoder)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        let len = decoder.read_len()?;
        T::decode_vec(len, decoder).map(Self::from)
    }
}

impl<T> AppendSequence for VecDeque<T> {
    type Item = T;

    fn reserve_items(&mut self, additional: usize) { self.reserve(additional); }

    fn append_item(&mut self, item: T) { self.push_back(item); }
}

impl Classify for str {
    const CATEGORY: Category = Category::Sequence;
}

impl Encode for str {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        self.as_bytes().encode(encoder)
    }
}

impl Classify for String {
    const CATEGORY: Category = Category::Sequence;
}

impl Encode for String {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        self.as_str().encode(encoder)
    }
}

impl Decode for String {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        let bytes = Vec::<u8>::decode(decoder)?;
        Self::from_utf8(bytes).map_err(|e| {
            tracing::debug!(error = %e, "decoded string is not UTF-8");
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {e}"),
            )
        })
    }
}

// =============================================================================
// Node-based sequences
// =============================================================================

impl<T: Classify> Classify for LinkedList<T> {
    const CATEGORY: Category = Category::Sequence;
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encode_items(self.len(), self, encoder)
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        decode_appending(decoder)
    }
}

impl<T> AppendSequence for LinkedList<T> {
    type Item = T;

    fn append_item(&mut self, item: T) { self.push_back(item); }
}

// =============================================================================
// Keyed containers
// =============================================================================

impl<T: Classify> Classify for BTreeSet<T> {
    const CATEGORY: Category = Category::Associative;
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encode_items(self.len(), self, encoder)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        decode_keyed(decoder)
    }
}

impl<T: Ord> KeyedContainer for BTreeSet<T> {
    type Item = T;

    fn insert_item(&mut self, item: T) { self.replace(item); }
}

impl<T: Classify, S> Classify for HashSet<T, S> {
    const CATEGORY: Category = Category::Associative;
}

impl<T: Encode, S: BuildHasher> Encode for HashSet<T, S> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encode_items(self.len(), self, encoder)
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        decode_keyed(decoder)
    }
}

impl<T: Eq + Hash, S: BuildHasher + Default> KeyedContainer for HashSet<T, S> {
    type Item = T;

    fn reserve_items(&mut self, additional: usize) { self.reserve(additional); }

    fn insert_item(&mut self, item: T) { self.replace(item); }
}

impl<K: Classify, V: Classify> Classify for BTreeMap<K, V> {
    const CATEGORY: Category = Category::Associative;
}

// Map entries travel as `(key, value)` pairs.
impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encode_items(self.len(), self, encoder)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        decode_keyed(decoder)
    }
}

impl<K: Ord, V> KeyedContainer for BTreeMap<K, V> {
    type Item = (K, V);

    fn insert_item(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}

impl<K: Classify, V: Classify, S> Classify for HashMap<K, V, S> {
    const CATEGORY: Category = Category::Associative;
}

impl<K: Encode, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        encode_items(self.len(), self, encoder)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode<D: Decoder + ?Sized>(decoder: &mut D) -> io::Result<Self> {
        decode_keyed(decoder)
    }
}

impl<K, V, S> KeyedContainer for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    type Item = (K, V);

    fn reserve_items(&mut self, additional: usize) { self.reserve(additional); }

    fn insert_item(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}
