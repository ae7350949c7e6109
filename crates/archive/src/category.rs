//! Static classification of archivable types.
//!
//! Every type that takes part in encoding or decoding carries exactly one
//! [`Category`], fixed at compile time through the [`Classify`] trait. The
//! category names the codec strategy that moves the value over a channel:
//!
//! | Category        | Wire shape                                   |
//! |-----------------|----------------------------------------------|
//! | `Scalar`        | `size_of::<T>()` raw bytes, host layout      |
//! | `Sequence`      | `i32` element count, then the elements       |
//! | `Associative`   | `i32` element count, then the elements       |
//! | `Pair`          | first, then second                           |
//! | `Tuple`         | elements `0..N`, back to back                |
//! | `Aggregate`     | the declared fields, in declaration order    |
//!
//! A type without a [`Classify`] implementation cannot be handed to an
//! encoder or decoder at all, so an unclassifiable type is rejected by the
//! compiler before any I/O happens.
//!
//! When a type could structurally fit more than one category, the
//! implementation picks the first match in this order: `Scalar`, then
//! container (`Sequence` / `Associative`), then `Pair`, then `Tuple`, then
//! `Aggregate`. Fixed-size arrays are the case that exercises this: an array
//! of scalars is itself a `Scalar`, an array of anything else is a `Tuple`.

/// The codec strategy used for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Fixed-size, flat-layout value copied byte for byte.
    Scalar,

    /// Order-preserving container rebuilt by appending at the end.
    Sequence,

    /// Keyed container rebuilt by inserting each element by key.
    Associative,

    /// Two heterogeneous fields, first then second.
    Pair,

    /// Fixed-arity heterogeneous sequence.
    Tuple,

    /// User-defined composite with an ordered field list.
    Aggregate,
}

impl Category {
    /// Returns `true` if values of this category start with an element-count
    /// prefix on the wire.
    #[must_use]
    pub const fn has_length_prefix(self) -> bool {
        matches!(self, Self::Sequence | Self::Associative)
    }

    /// Returns `true` for [`Category::Scalar`].
    #[must_use]
    pub const fn is_scalar(self) -> bool { matches!(self, Self::Scalar) }
}

/// Attaches a [`Category`] to a type.
///
/// Implemented for every type that implements [`Encode`](crate::Encode) or
/// [`Decode`](crate::Decode); both traits require it. The derive macros and
/// the [`aggregate!`](crate::aggregate) and [`scalar!`](crate::scalar) macros
/// emit it for user types.
pub trait Classify {
    /// The codec strategy for this type.
    const CATEGORY: Category;
}

impl<T: Classify + ?Sized> Classify for &T {
    const CATEGORY: Category = T::CATEGORY;
}

impl<T: Classify + ?Sized> Classify for &mut T {
    const CATEGORY: Category = T::CATEGORY;
}

/// Returns the category of `T`.
///
/// ```ignore
/// use compact_archive::{Category, category_of};
///
/// assert_eq!(category_of::<u32>(), Category::Scalar);
/// assert_eq!(category_of::<Vec<String>>(), Category::Sequence);
/// assert_eq!(category_of::<(u8, String)>(), Category::Pair);
/// ```
#[must_use]
pub const fn category_of<T: Classify + ?Sized>() -> Category { T::CATEGORY }
