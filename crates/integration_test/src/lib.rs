//! Common fixture types shared by the `compact_archive` integration tests
//! and benchmarks.
//!
//! Each fixture exercises one codec category end to end: a derived
//! aggregate with a nested pair, a field-list aggregate declared with
//! `aggregate!`, an enum, and a plain-old-data scalar.

#![allow(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]

use std::{
    collections::{BTreeMap, HashMap},
    io,
};

use compact_archive::{Decode, Decoder, Encode};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

// ============================================================================
// Aggregates
// ============================================================================

/// A derived aggregate holding a string and a nested pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct Custom {
    pub text: String,
    pub inner: (i32, i32),
}

impl Custom {
    pub fn new(text: impl Into<String>, a: i32, b: i32) -> Self {
        Self { text: text.into(), inner: (a, b) }
    }
}

/// A record whose archived members are declared with `aggregate!`.
///
/// `hits` is bookkeeping only and never archived.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inventory {
    pub owner: Custom,
    pub counts: HashMap<String, u32>,
    pub history: Vec<Sample>,
    pub hits: usize,
}

compact_archive::aggregate!(Inventory { owner, counts, history });

/// Commands travel as a `u32` variant index followed by the fields.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub enum Command {
    Noop,
    Move { to: Sample },
    Rename(String),
    Tag(BTreeMap<String, Vec<u8>>),
}

// ============================================================================
// Scalars
// ============================================================================

/// A plain-old-data measurement copied byte for byte.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Default,
    FromBytes,
    IntoBytes,
    Immutable,
    KnownLayout,
)]
#[repr(C)]
pub struct Sample {
    pub timestamp: u64,
    pub value: f64,
}

compact_archive::scalar!(Sample);

impl Sample {
    pub fn new(timestamp: u64, value: f64) -> Self { Self { timestamp, value } }
}

/// Builds `count` samples with predictable contents.
pub fn samples(count: usize) -> Vec<Sample> {
    (0..count as u64)
        .map(|i| Sample::new(i, i as f64 * 0.5))
        .collect()
}

/// Builds a populated [`Inventory`].
pub fn inventory() -> Inventory {
    Inventory {
        owner: Custom::new("warehouse", 4, -2),
        counts: HashMap::from([
            ("b".to_string(), 2),
            ("a".to_string(), 1),
            ("c".to_string(), 3),
        ]),
        history: samples(16),
        hits: 99,
    }
}

// ============================================================================
// Channels
// ============================================================================

/// A decoder that counts how many reads reach the underlying channel.
#[derive(Debug)]
pub struct ReadCounter<D> {
    inner: D,
    reads: usize,
    bytes: usize,
}

impl<D> ReadCounter<D> {
    pub fn new(inner: D) -> Self { Self { inner, reads: 0, bytes: 0 } }

    /// Number of `read_raw_bytes` calls so far.
    pub fn reads(&self) -> usize { self.reads }

    /// Total bytes requested so far.
    pub fn bytes(&self) -> usize { self.bytes }
}

impl<D: Decoder> Decoder for ReadCounter<D> {
    fn read_raw_bytes(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.reads += 1;
        self.bytes += buf.len();
        self.inner.read_raw_bytes(buf)
    }

    fn remaining(&self) -> Option<usize> { self.inner.remaining() }
}
