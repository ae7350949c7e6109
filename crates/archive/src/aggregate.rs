//! The aggregate codec.
//!
//! An aggregate is a user type that declares, once, which of its members
//! take part in archiving and in what order. Encoding visits those members
//! in order; decoding visits the same members in the same order and decodes
//! into each one in place. Keeping the two lists identical is the caller's
//! responsibility and is not checked.
//!
//! There are two ways to declare the field list:
//!
//! - `#[derive(Encode, Decode)]` on a struct or enum, which lists every field
//!   except those marked `#[archive(skip)]`.
//! - [`aggregate!`](crate::aggregate) for a type that implements
//!   [`Default`], naming the members explicitly. Members left out are never
//!   touched by decoding.
//!
//! Members may themselves be scalars, containers, tuples or other
//! aggregates. A type cannot contain itself except through a container;
//! anything else would be infinitely sized and rejected by the compiler.

/// Declares the ordered field list of a type and implements
/// [`Classify`](crate::Classify), [`Encode`](crate::Encode) and
/// [`Decode`](crate::Decode) for it.
///
/// Decoding a fresh value starts from [`Default::default`] and then decodes
/// each listed field in place. Tuple-struct fields are named by index.
///
/// ```ignore
/// #[derive(Default)]
/// struct Entry {
///     text: String,
///     data: i32,
///     scratch: Vec<u8>, // not archived
/// }
///
/// compact_archive::aggregate!(Entry { text, data });
///
/// #[derive(Default)]
/// struct Span(u32, u32);
///
/// compact_archive::aggregate!(Span { 0, 1 });
/// ```
#[macro_export]
macro_rules! aggregate {
    ($ty:ty { $($field:tt),* $(,)? }) => {
        impl $crate::Classify for $ty {
            const CATEGORY: $crate::Category = $crate::Category::Aggregate;
        }

        impl $crate::Encode for $ty {
            #[allow(unused_variables)]
            fn encode<__E: $crate::Encoder + ?Sized>(
                &self,
                encoder: &mut __E,
            ) -> ::std::io::Result<()> {
                $(
                    $crate::Encode::encode(&self.$field, encoder)?;
                )*
                Ok(())
            }
        }

        impl $crate::Decode for $ty {
            fn decode<__D: $crate::Decoder + ?Sized>(
                decoder: &mut __D,
            ) -> ::std::io::Result<Self> {
                let mut value = <Self as ::std::default::Default>::default();
                $crate::Decode::decode_in_place(&mut value, decoder)?;
                Ok(value)
            }

            #[allow(unused_variables)]
            fn decode_in_place<__D: $crate::Decoder + ?Sized>(
                &mut self,
                decoder: &mut __D,
            ) -> ::std::io::Result<()> {
                $(
                    $crate::Decode::decode_in_place(&mut self.$field, decoder)?;
                )*
                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod test;
