//! The pair and tuple codec.
//!
//! Tuples carry no length prefix: their arity is part of the static type.
//! Fields are written in index order and read back in the same order. A
//! two-element tuple is classified as a [`Category::Pair`]; map entries use
//! this shape.

use std::io;

use crate::{
    category::{Category, Classify},
    channel::{Decoder, Encoder},
    decode::Decode,
    encode::Encode,
};

impl Classify for () {
    const CATEGORY: Category = Category::Tuple;
}

impl Encode for () {
    fn encode<E: Encoder + ?Sized>(&self, _encoder: &mut E) -> io::Result<()> {
        Ok(())
    }
}

impl Decode for () {
    fn decode<D: Decoder + ?Sized>(_decoder: &mut D) -> io::Result<Self> {
        Ok(())
    }
}

macro_rules! impl_tuple {
    ($category:ident; $($name:ident $idx:tt),+) => {
        impl<$($name: Classify),+> Classify for ($($name,)+) {
            const CATEGORY: Category = Category::$category;
        }

        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode<__E: Encoder + ?Sized>(
                &self,
                encoder: &mut __E,
            ) -> io::Result<()> {
                $(
                    self.$idx.encode(encoder)?;
                )+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode<__D: Decoder + ?Sized>(
                decoder: &mut __D,
            ) -> io::Result<Self> {
                Ok(($(
                    $name::decode(decoder)?,
                )+))
            }

            fn decode_in_place<__D: Decoder + ?Sized>(
                &mut self,
                decoder: &mut __D,
            ) -> io::Result<()> {
                $(
                    self.$idx.decode_in_place(decoder)?;
                )+
                Ok(())
            }
        }
    };
}

impl_tuple!(Tuple; A 0);
impl_tuple!(Pair; A 0, B 1);
impl_tuple!(Tuple; A 0, B 1, C 2);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_tuple!(Tuple; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_tuple!(
    Tuple; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11
);
