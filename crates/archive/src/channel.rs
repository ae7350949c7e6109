//! Byte channels the codec reads from and writes to.
//!
//! The codec needs exactly two capabilities from its environment: "write
//! these bytes" ([`Encoder::emit_raw_bytes`]) and "fill this buffer with the
//! next bytes" ([`Decoder::read_raw_bytes`]). Everything else on the two
//! traits is a provided helper built on top of them.
//!
//! Three channels ship with the crate:
//!
//! - [`StreamEncoder`] / [`StreamDecoder`] wrap any external
//!   [`std::io::Write`] / [`std::io::Read`] (files, sockets, `&[u8]`).
//! - [`MemoryChannel`] owns a growable buffer with an append cursor and an
//!   independent read cursor, so the same channel can be written and then
//!   read back.
//! - `&[u8]` is itself a [`Decoder`] that consumes the slice from the front.
//!
//! # Truncation
//!
//! A channel that cannot supply the requested bytes fails with
//! [`io::ErrorKind::UnexpectedEof`]. The codec never retries and never
//! returns a partially decoded value as a success.

use std::io::{self, Read, Write};

use zerocopy::IntoBytes;

use crate::{decode::Decode, encode::Encode, scalar::Scalar};

/// The on-wire type of a container's element count.
pub type LengthPrefix = i32;

/// Number of bytes occupied by a container's element count.
pub const LENGTH_PREFIX_SIZE: usize = std::mem::size_of::<LengthPrefix>();

/// The write side of a byte channel.
///
/// Only [`Encoder::emit_raw_bytes`] is required; the other methods are
/// helpers the codec uses and should rarely need overriding.
///
/// # Example
///
/// ```ignore
/// use compact_archive::Encoder;
/// use std::io;
///
/// struct Counting(usize);
///
/// impl Encoder for Counting {
///     fn emit_raw_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
///         self.0 += bytes.len();
///         Ok(())
///     }
/// }
/// ```
pub trait Encoder {
    /// Appends `bytes` to the channel.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying sink reports.
    fn emit_raw_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Writes the in-memory representation of a scalar.
    ///
    /// # Errors
    ///
    /// Propagates [`Encoder::emit_raw_bytes`] failures.
    fn emit_scalar<T: Scalar>(&mut self, value: &T) -> io::Result<()> {
        self.emit_raw_bytes(value.as_bytes())
    }

    /// Writes a contiguous run of scalars with one call.
    ///
    /// An empty run touches the channel not at all.
    ///
    /// # Errors
    ///
    /// Propagates [`Encoder::emit_raw_bytes`] failures.
    fn emit_scalars<T: Scalar>(&mut self, items: &[T]) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.emit_raw_bytes(items.as_bytes())
    }

    /// Writes a container's element count as a [`LengthPrefix`].
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] if `len` does not fit in the
    /// prefix; nothing is written in that case.
    fn emit_len(&mut self, len: usize) -> io::Result<()> {
        let prefix = LengthPrefix::try_from(len).map_err(|_| {
            tracing::debug!(len, "container length exceeds the length prefix");
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "container length {len} exceeds the maximum of {}",
                    LengthPrefix::MAX
                ),
            )
        })?;
        self.emit_scalar(&prefix)
    }

    /// Encodes `value` into this channel.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Encode::encode`].
    fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        value.encode(self)
    }
}

/// The read side of a byte channel.
pub trait Decoder {
    /// Fills `buf` with the next `buf.len()` bytes of the channel.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] if fewer bytes remain, or any
    /// error the underlying source reports.
    fn read_raw_bytes(&mut self, buf: &mut [u8]) -> io::Result<()>;

    /// Number of bytes still available, if the channel knows it.
    ///
    /// Bulk decoding consults this before allocating so that a corrupt
    /// length prefix reports end-of-data instead of reserving memory that
    /// could never be filled.
    fn remaining(&self) -> Option<usize> { None }

    /// Reads one scalar.
    ///
    /// # Errors
    ///
    /// Propagates [`Decoder::read_raw_bytes`] failures.
    fn read_scalar<T: Scalar>(&mut self) -> io::Result<T> {
        let mut value = T::new_zeroed();
        self.read_raw_bytes(value.as_mut_bytes())?;
        Ok(value)
    }

    /// Fills a contiguous run of scalars with one call.
    ///
    /// An empty run touches the channel not at all.
    ///
    /// # Errors
    ///
    /// Propagates [`Decoder::read_raw_bytes`] failures.
    fn read_scalars<T: Scalar>(&mut self, items: &mut [T]) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.read_raw_bytes(items.as_mut_bytes())
    }

    /// Reads a container's element count.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidData`] for a negative count, or the
    /// channel's error when the prefix itself is truncated.
    fn read_len(&mut self) -> io::Result<usize> {
        let prefix: LengthPrefix = self.read_scalar()?;
        usize::try_from(prefix).map_err(|_| {
            tracing::debug!(prefix, "negative container length prefix");
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("negative container length prefix: {prefix}"),
            )
        })
    }

    /// Decodes a fresh `T` from this channel.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Decode::decode`].
    fn decode<T: Decode>(&mut self) -> io::Result<T> { T::decode(self) }
}

impl Decoder for &[u8] {
    fn read_raw_bytes(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.read_exact(buf)
    }

    fn remaining(&self) -> Option<usize> { Some(self.len()) }
}

// =============================================================================
// Stream channels
// =============================================================================

/// An [`Encoder`] over any [`Write`] implementation.
///
/// ```ignore
/// use compact_archive::StreamEncoder;
///
/// let file = std::fs::File::create("values.bin")?;
/// let encoder = StreamEncoder::new(std::io::BufWriter::new(file));
/// ```
#[derive(Debug)]
pub struct StreamEncoder<W> {
    writer: W,
}

impl<W> StreamEncoder<W> {
    /// Creates a new encoder wrapping the given writer.
    #[must_use]
    pub const fn new(writer: W) -> Self { Self { writer } }

    /// Returns a reference to the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W { &self.writer }

    /// Returns a mutable reference to the underlying writer.
    #[must_use]
    pub const fn get_mut(&mut self) -> &mut W { &mut self.writer }

    /// Consumes the encoder and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write> Encoder for StreamEncoder<W> {
    fn emit_raw_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }
}

/// A [`Decoder`] over any [`Read`] implementation.
#[derive(Debug)]
pub struct StreamDecoder<R> {
    reader: R,
}

impl<R> StreamDecoder<R> {
    /// Creates a new decoder wrapping the given reader.
    #[must_use]
    pub const fn new(reader: R) -> Self { Self { reader } }

    /// Returns a reference to the underlying reader.
    #[must_use]
    pub const fn get_ref(&self) -> &R { &self.reader }

    /// Returns a mutable reference to the underlying reader.
    #[must_use]
    pub const fn get_mut(&mut self) -> &mut R { &mut self.reader }

    /// Consumes the decoder and returns the underlying reader.
    #[must_use]
    pub fn into_inner(self) -> R { self.reader }
}

impl<R: Read> Decoder for StreamDecoder<R> {
    fn read_raw_bytes(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.reader.read_exact(buf)
    }
}

// =============================================================================
// MemoryChannel
// =============================================================================

/// An owned in-memory channel.
///
/// Writes append to the end of the buffer; reads consume from a separate
/// cursor that starts at the beginning. Reading never removes bytes, so
/// [`MemoryChannel::as_bytes`] always returns everything written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryChannel {
    buffer: Vec<u8>,
    read_pos: usize,
}

impl MemoryChannel {
    /// Creates an empty channel.
    #[must_use]
    pub const fn new() -> Self { Self { buffer: Vec::new(), read_pos: 0 } }

    /// Creates an empty channel that can hold `capacity` bytes before
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: Vec::with_capacity(capacity), read_pos: 0 }
    }

    /// Creates a channel whose read cursor is positioned at the start of
    /// `bytes`.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { buffer: bytes, read_pos: 0 }
    }

    /// Everything written so far, including bytes already read.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.buffer }

    /// The bytes not yet consumed by the read cursor.
    #[must_use]
    pub fn unread(&self) -> &[u8] { &self.buffer[self.read_pos..] }

    /// Position of the read cursor.
    #[must_use]
    pub const fn position(&self) -> usize { self.read_pos }

    /// Total number of bytes written.
    #[must_use]
    pub const fn len(&self) -> usize { self.buffer.len() }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Consumes the channel and returns the whole buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> { self.buffer }
}

impl Encoder for MemoryChannel {
    fn emit_raw_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

impl Decoder for MemoryChannel {
    fn read_raw_bytes(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let end = self.read_pos + buf.len();
        let Some(source) = self.buffer.get(self.read_pos..end) else {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "requested {} bytes but only {} remain",
                    buf.len(),
                    self.buffer.len() - self.read_pos
                ),
            ));
        };
        buf.copy_from_slice(source);
        self.read_pos = end;
        Ok(())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.buffer.len() - self.read_pos)
    }
}

#[cfg(test)]
mod test;
