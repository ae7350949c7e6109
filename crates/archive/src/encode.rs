//! The encoding half of the codec.
//!
//! [`Encode`] is implemented once per type and always in terms of its
//! [`Category`](crate::Category): scalars copy their bytes, containers write
//! a count and recurse, tuples and aggregates recurse field by field. The
//! recursion bottoms out in [`Encoder::emit_raw_bytes`](crate::Encoder).

use std::io;

use crate::{category::Classify, channel::Encoder};

/// A type that can be written to an [`Encoder`].
///
/// # Example
///
/// ```ignore
/// use compact_archive::{Category, Classify, Encode, Encoder};
/// use std::io;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Classify for Point {
///     const CATEGORY: Category = Category::Aggregate;
/// }
///
/// impl Encode for Point {
///     fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
///         self.x.encode(encoder)?;
///         self.y.encode(encoder)?;
///         Ok(())
///     }
/// }
/// ```
pub trait Encode: Classify {
    /// Writes this value to `encoder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel fails to accept the bytes or if a
    /// container is too large for its length prefix.
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()>;

    /// Writes a contiguous run of values with no length prefix.
    ///
    /// The default writes each element in turn. Scalars override it with a
    /// single copy of the whole run; the produced bytes are identical.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by an element.
    fn encode_slice<E: Encoder + ?Sized>(
        items: &[Self],
        encoder: &mut E,
    ) -> io::Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E) -> io::Result<()> {
        (**self).encode(encoder)
    }
}
