//! Derive macros for the `Encode` and `Decode` traits.
//!
//! This crate provides derive macros that give a struct or enum an ordered
//! field list for the `compact_archive` aggregate codec. Fields are archived
//! in declaration order; the generated code contains no field names or type
//! tags, only the fields' own encodings back to back.
//!
//! # Supported Types
//!
//! The derive macros support:
//! - Structs with named fields
//! - Tuple structs
//! - Unit structs
//! - Enums with any combination of unit, tuple, and struct variants
//!
//! `#[derive(Encode)]` also implements `Classify` with the `Aggregate`
//! category, so `#[derive(Decode)]` is meant to be used alongside it.
//!
//! # Examples
//!
//! ```ignore
//! use compact_archive_derive::{Decode, Encode};
//!
//! #[derive(Encode, Decode)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(Encode, Decode)]
//! enum Message {
//!     Quit,
//!     Move { x: i32, y: i32 },
//!     Write(String),
//! }
//! ```
//!
//! # Field Attributes
//!
//! ## `#[archive(skip)]`
//!
//! Leave a field out of the archive. A freshly decoded value gets
//! `Default::default()` for it; decoding in place leaves it untouched.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Field, Fields, Generics, Index,
    parse_macro_input,
};

/// Parses one `#[archive(...)]` attribute, returning whether it asks for
/// the field to be skipped.
fn parse_archive_attr(attr: &syn::Attribute) -> syn::Result<bool> {
    let mut skip = false;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("skip") {
            skip = true;
            Ok(())
        } else {
            Err(meta.error("unknown archive attribute, expected `skip`"))
        }
    })?;
    Ok(skip)
}

/// Rejects every malformed `#[archive(...)]` attribute on the input's
/// fields, combining the errors into one.
fn validate_attributes(input: &DeriveInput) -> syn::Result<()> {
    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data_struct) => data_struct.fields.iter().collect(),
        Data::Enum(data_enum) => data_enum
            .variants
            .iter()
            .flat_map(|variant| variant.fields.iter())
            .collect(),
        Data::Union(_) => Vec::new(),
    };

    let mut errors: Option<syn::Error> = None;
    for attr in fields
        .iter()
        .flat_map(|field| field.attrs.iter())
        .filter(|attr| attr.path().is_ident("archive"))
    {
        if let Err(err) = parse_archive_attr(attr) {
            match &mut errors {
                Some(existing) => existing.combine(err),
                None => errors = Some(err),
            }
        }
    }

    errors.map_or(Ok(()), Err)
}

/// Checks if a field has the `#[archive(skip)]` attribute.
///
/// Attributes are validated by [`validate_attributes`] before any code is
/// generated.
fn should_skip(field: &Field) -> bool {
    field.attrs.iter().any(|attr| {
        attr.path().is_ident("archive")
            && parse_archive_attr(attr).unwrap_or(false)
    })
}

/// Adds `bound` for every generic type parameter to the where clause.
fn bounded_where_clause(
    generics: &Generics,
    bound: &proc_macro2::TokenStream,
) -> syn::WhereClause {
    let mut where_clause = generics
        .where_clause
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(where));

    for param in &generics.params {
        if let syn::GenericParam::Type(type_param) = param {
            let ident = &type_param.ident;
            where_clause.predicates.push(syn::parse_quote!(#ident: #bound));
        }
    }

    where_clause
}

/// Derive macro for `Encode`.
///
/// This macro implements `Classify` (as `Category::Aggregate`) and `Encode`
/// for structs and enums:
///
/// - For structs: all non-skipped fields are encoded in declaration order
/// - For enums: the variant index is encoded first (as a `u32` scalar),
///   followed by the variant's non-skipped fields
///
/// # Example
///
/// ```ignore
/// use compact_archive_derive::Encode;
///
/// #[derive(Encode)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
/// ```
#[proc_macro_derive(Encode, attributes(archive))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    if let Err(err) = validate_attributes(&input) {
        return err.to_compile_error().into();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    let encode_where = bounded_where_clause(
        &input.generics,
        &quote!(::compact_archive::Encode),
    );

    let encode_impl = match &input.data {
        Data::Struct(data_struct) => impl_encode_struct(data_struct),
        Data::Enum(data_enum) => impl_encode_enum(data_enum),
        Data::Union(_) => {
            return syn::Error::new_spanned(
                &input,
                "Encode cannot be derived for unions; declare a POD union \
                 with `compact_archive::scalar!` instead",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        impl #impl_generics ::compact_archive::Classify for #name #ty_generics #where_clause {
            const CATEGORY: ::compact_archive::Category =
                ::compact_archive::Category::Aggregate;
        }

        #[allow(clippy::trait_duplication_in_bounds)]
        impl #impl_generics ::compact_archive::Encode for #name #ty_generics #encode_where {
            #[allow(unused_variables)]
            fn encode<__E: ::compact_archive::Encoder + ?Sized>(
                &self,
                encoder: &mut __E,
            ) -> ::std::io::Result<()> {
                #encode_impl
            }
        }
    };

    TokenStream::from(expanded)
}

fn impl_encode_struct(data_struct: &DataStruct) -> proc_macro2::TokenStream {
    match &data_struct.fields {
        Fields::Named(fields) => {
            let field_encodes = fields
                .named
                .iter()
                .filter(|field| !should_skip(field))
                .map(|field| {
                    let field_name = &field.ident;
                    quote! {
                        ::compact_archive::Encode::encode(&self.#field_name, encoder)?;
                    }
                });

            quote! {
                #(#field_encodes)*
                Ok(())
            }
        }
        Fields::Unnamed(fields) => {
            let field_encodes = fields
                .unnamed
                .iter()
                .enumerate()
                .filter(|(_, field)| !should_skip(field))
                .map(|(i, _)| {
                    let index = Index::from(i);
                    quote! {
                        ::compact_archive::Encode::encode(&self.#index, encoder)?;
                    }
                });

            quote! {
                #(#field_encodes)*
                Ok(())
            }
        }
        Fields::Unit => quote! { Ok(()) },
    }
}

#[allow(clippy::cast_possible_truncation)]
fn impl_encode_enum(data_enum: &DataEnum) -> proc_macro2::TokenStream {
    let variant_matches =
        data_enum.variants.iter().enumerate().map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let idx = idx as u32;

            match &variant.fields {
                Fields::Named(fields) => {
                    let field_names: Vec<_> = fields
                        .named
                        .iter()
                        .map(|f| (&f.ident, should_skip(f)))
                        .collect();

                    let pattern_bindings = field_names.iter().map(|(name, skip)| {
                        if *skip {
                            quote! { #name: _ }
                        } else {
                            quote! { #name }
                        }
                    });

                    let field_encodes =
                        field_names.iter().filter(|(_, skip)| !skip).map(
                            |(field_name, _)| {
                                quote! {
                                    ::compact_archive::Encode::encode(#field_name, encoder)?;
                                }
                            },
                        );

                    quote! {
                        Self::#variant_name { #(#pattern_bindings),* } => {
                            encoder.emit_scalar(&#idx)?;
                            #(#field_encodes)*
                        }
                    }
                }
                Fields::Unnamed(fields) => {
                    let field_data: Vec<_> = fields
                        .unnamed
                        .iter()
                        .enumerate()
                        .map(|(i, f)| {
                            let binding = syn::Ident::new(
                                &format!("field_{i}"),
                                proc_macro2::Span::call_site(),
                            );
                            (binding, should_skip(f))
                        })
                        .collect();

                    let pattern_bindings = field_data.iter().map(|(binding, skip)| {
                        if *skip {
                            quote! { _ }
                        } else {
                            quote! { #binding }
                        }
                    });

                    let field_encodes =
                        field_data.iter().filter(|(_, skip)| !skip).map(
                            |(binding, _)| {
                                quote! {
                                    ::compact_archive::Encode::encode(#binding, encoder)?;
                                }
                            },
                        );

                    quote! {
                        Self::#variant_name(#(#pattern_bindings),*) => {
                            encoder.emit_scalar(&#idx)?;
                            #(#field_encodes)*
                        }
                    }
                }
                Fields::Unit => {
                    quote! {
                        Self::#variant_name => {
                            encoder.emit_scalar(&#idx)?;
                        }
                    }
                }
            }
        });

    quote! {
        match self {
            #(#variant_matches)*
        }
        Ok(())
    }
}

/// Derive macro for `Decode`.
///
/// This macro implements `Decode` for structs and enums, reading exactly what
/// `#[derive(Encode)]` writes:
///
/// - For structs: all non-skipped fields are decoded in declaration order;
///   skipped fields use `Default::default()`. Decoding in place decodes into
///   each non-skipped field and leaves skipped fields as they are.
/// - For enums: the `u32` variant index is decoded first, then the variant's
///   fields. An index with no variant is reported as `InvalidData`.
///
/// # Example
///
/// ```ignore
/// use compact_archive_derive::{Decode, Encode};
///
/// #[derive(Encode, Decode)]
/// enum Color {
///     Red,
///     Green,
///     Blue,
///     Rgb(u8, u8, u8),
///     Named { name: String },
/// }
/// ```
#[proc_macro_derive(Decode, attributes(archive))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    if let Err(err) = validate_attributes(&input) {
        return err.to_compile_error().into();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    let where_clause = bounded_where_clause(
        &input.generics,
        &quote!(::compact_archive::Decode),
    );

    let (decode_impl, decode_in_place_impl) = match &input.data {
        Data::Struct(data_struct) => (
            impl_decode_struct(data_struct),
            Some(impl_decode_struct_in_place(data_struct)),
        ),
        Data::Enum(data_enum) => (impl_decode_enum(name, data_enum), None),
        Data::Union(_) => {
            return syn::Error::new_spanned(
                &input,
                "Decode cannot be derived for unions; declare a POD union \
                 with `compact_archive::scalar!` instead",
            )
            .to_compile_error()
            .into();
        }
    };

    // Enums change shape with the variant, so they keep the default
    // decode-and-assign behavior.
    let decode_in_place = decode_in_place_impl.map(|body| {
        quote! {
            #[allow(unused_variables)]
            fn decode_in_place<__D: ::compact_archive::Decoder + ?Sized>(
                &mut self,
                decoder: &mut __D,
            ) -> ::std::io::Result<()> {
                #body
            }
        }
    });

    let expanded = quote! {
        #[allow(clippy::trait_duplication_in_bounds)]
        impl #impl_generics ::compact_archive::Decode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn decode<__D: ::compact_archive::Decoder + ?Sized>(
                decoder: &mut __D,
            ) -> ::std::io::Result<Self> {
                #decode_impl
            }

            #decode_in_place
        }
    };

    TokenStream::from(expanded)
}

fn decode_field(field: &Field) -> proc_macro2::TokenStream {
    let field_type = &field.ty;

    if should_skip(field) {
        quote! { <#field_type as ::std::default::Default>::default() }
    } else {
        quote! { <#field_type as ::compact_archive::Decode>::decode(decoder)? }
    }
}

fn impl_decode_struct(data_struct: &DataStruct) -> proc_macro2::TokenStream {
    match &data_struct.fields {
        Fields::Named(fields) => {
            let field_decodes = fields.named.iter().map(|field| {
                let field_name = &field.ident;
                let value = decode_field(field);
                quote! { #field_name: #value, }
            });

            quote! {
                Ok(Self {
                    #(#field_decodes)*
                })
            }
        }
        Fields::Unnamed(fields) => {
            let field_decodes = fields.unnamed.iter().map(|field| {
                let value = decode_field(field);
                quote! { #value, }
            });

            quote! {
                Ok(Self(#(#field_decodes)*))
            }
        }
        Fields::Unit => quote! { Ok(Self) },
    }
}

fn impl_decode_struct_in_place(
    data_struct: &DataStruct,
) -> proc_macro2::TokenStream {
    let field_decodes = data_struct
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !should_skip(field))
        .map(|(i, field)| {
            let member = field.ident.as_ref().map_or_else(
                || {
                    let index = Index::from(i);
                    quote! { #index }
                },
                |ident| quote! { #ident },
            );
            quote! {
                ::compact_archive::Decode::decode_in_place(&mut self.#member, decoder)?;
            }
        });

    quote! {
        #(#field_decodes)*
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn impl_decode_enum(
    name: &syn::Ident,
    data_enum: &DataEnum,
) -> proc_macro2::TokenStream {
    let variant_count = data_enum.variants.len() as u32;
    let variant_matches =
        data_enum.variants.iter().enumerate().map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let idx = idx as u32;

            match &variant.fields {
                Fields::Named(fields) => {
                    let field_decodes = fields.named.iter().map(|field| {
                        let field_name = &field.ident;
                        let value = decode_field(field);
                        quote! { #field_name: #value, }
                    });

                    quote! {
                        #idx => Ok(Self::#variant_name { #(#field_decodes)* }),
                    }
                }
                Fields::Unnamed(fields) => {
                    let field_decodes = fields.unnamed.iter().map(|field| {
                        let value = decode_field(field);
                        quote! { #value, }
                    });

                    quote! {
                        #idx => Ok(Self::#variant_name(#(#field_decodes)*)),
                    }
                }
                Fields::Unit => {
                    quote! {
                        #idx => Ok(Self::#variant_name),
                    }
                }
            }
        });

    let name_str = name.to_string();

    quote! {
        let variant_idx: u32 = decoder.read_scalar()?;
        match variant_idx {
            #(#variant_matches)*
            _ => Err(::std::io::Error::new(
                ::std::io::ErrorKind::InvalidData,
                ::std::format!(
                    "invalid variant index {} for enum {} (expected 0..{})",
                    variant_idx,
                    #name_str,
                    #variant_count
                ),
            )),
        }
    }
}
