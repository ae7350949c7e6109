//! Compact binary archive.
//!
//! This crate turns values into a flat byte stream and back. The stream has
//! no type tags, no version, no magic number and no self-description: the
//! bytes mean something only when they are read back with the same static
//! types, in the same order, on a host with the same memory layout. In
//! exchange the output is as small as the values themselves plus one length
//! prefix per container, and contiguous runs of plain data move with a
//! single copy.
//!
//! # Overview
//!
//! Every participating type has exactly one [`Category`] (see
//! [`Classify`]), which picks its codec:
//!
//! - **Scalar**: `size_of::<T>()` raw bytes. Integers, floats, `bool`,
//!   `char`, arrays of scalars, and POD types declared with [`scalar!`].
//! - **Sequence / Associative**: an `i32` element count followed by the
//!   elements. `Vec`, `VecDeque`, `LinkedList`, `String`, `BTreeSet`,
//!   `HashSet`, `BTreeMap`, `HashMap`.
//! - **Pair / Tuple**: fields in index order, no prefix.
//! - **Aggregate**: a user type's declared fields in declaration order,
//!   through `#[derive(Encode, Decode)]` or [`aggregate!`].
//!
//! The [`Encoder`] and [`Decoder`] traits are the byte channel the codec
//! runs on. [`Archive`] combines a channel with the codec, and
//! [`chunk_encode`] / [`chunk_decode`] convert a single value to and from a
//! standalone buffer.
//!
//! # Derive Macros
//!
//! ```ignore
//! use compact_archive::{Decode, Encode, chunk_decode, chunk_encode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Custom {
//!     text: String,
//!     inner: (i32, i32),
//!     #[archive(skip)]
//!     cache: Vec<u8>, // Uses Default::default() when decoding
//! }
//!
//! let value = Custom { text: "abc".into(), inner: (1, 2), cache: vec![] };
//! let chunk = chunk_encode(&value)?;
//! assert_eq!(chunk_decode::<Custom>(&chunk)?, value);
//! ```
//!
//! # Errors
//!
//! All operations return [`std::io::Result`]. Decoding into the wrong type
//! is not detected. What is reported:
//!
//! - the channel running out of bytes ([`std::io::ErrorKind::UnexpectedEof`]),
//! - bytes no value of the requested type can have, such as a `bool` other
//!   than 0 or 1, invalid UTF-8, a negative length prefix or an unknown enum
//!   variant ([`std::io::ErrorKind::InvalidData`]),
//! - a container longer than `i32::MAX` elements
//!   ([`std::io::ErrorKind::InvalidInput`]).

// Allow derive macros to reference this crate as `compact_archive` internally
extern crate self as compact_archive;

pub mod aggregate;
pub mod archive;
pub mod category;
pub mod channel;
pub mod container;
pub mod decode;
pub mod encode;
pub mod scalar;
pub mod tuple;

// Re-export main traits and types at the crate root for convenience
pub use archive::{Archive, chunk_decode, chunk_encode};
pub use category::{Category, Classify, category_of};
// Re-export derive macros
pub use compact_archive_derive::{Decode, Encode};
pub use channel::{
    Decoder, Encoder, LENGTH_PREFIX_SIZE, LengthPrefix, MemoryChannel,
    StreamDecoder, StreamEncoder,
};
pub use container::{AppendSequence, KeyedContainer};
pub use decode::Decode;
pub use encode::Encode;
pub use scalar::Scalar;
