use std::io;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Archive, Category, category_of, chunk_decode, chunk_encode};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable,
    KnownLayout,
)]
#[repr(C)]
struct Rect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

crate::scalar!(Rect);

#[test]
fn integers_are_raw_host_bytes() {
    for value in [0i32, -1, i32::MAX] {
        let bytes = chunk_encode(&value).unwrap();
        assert_eq!(bytes, value.to_ne_bytes());
        assert_eq!(chunk_decode::<i32>(&bytes).unwrap(), value);
    }
}

#[test]
#[allow(clippy::float_cmp)]
fn float_roundtrip() {
    let value = std::f64::consts::PI;

    let bytes = chunk_encode(&value).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(chunk_decode::<f64>(&bytes).unwrap(), value);
}

#[test]
fn char_array_is_scalar_without_prefix() {
    let value = *b"hello\0\0\0";

    assert_eq!(category_of::<[u8; 8]>(), Category::Scalar);

    let bytes = chunk_encode(&value).unwrap();
    assert_eq!(bytes, value);
    assert_eq!(chunk_decode::<[u8; 8]>(&bytes).unwrap(), value);
}

#[test]
fn array_of_non_scalars_is_tuple() {
    assert_eq!(category_of::<[String; 2]>(), Category::Tuple);

    let value = ["ab".to_string(), "c".to_string()];
    let bytes = chunk_encode(&value).unwrap();
    assert_eq!(chunk_decode::<[String; 2]>(&bytes).unwrap(), value);
}

#[test]
fn pod_struct_is_copied_whole() {
    let value = Rect { left: 1, top: 2, right: 30, bottom: 40 };

    assert_eq!(category_of::<Rect>(), Category::Scalar);

    let bytes = chunk_encode(&value).unwrap();
    assert_eq!(bytes.len(), std::mem::size_of::<Rect>());
    assert_eq!(bytes, value.as_bytes());
    assert_eq!(chunk_decode::<Rect>(&bytes).unwrap(), value);
}

#[test]
fn decode_in_place_overwrites_existing_storage() {
    let mut archive = Archive::new();
    archive.encode(&[1u16, 2, 3]).unwrap();

    let mut out = [9u16; 3];
    archive.decode(&mut out).unwrap();
    assert_eq!(out, [1, 2, 3]);
}

#[test]
fn bool_and_char_reject_invalid_patterns() {
    assert!(chunk_decode::<bool>(&[1]).unwrap());
    assert!(!chunk_decode::<bool>(&[0]).unwrap());

    let err = chunk_decode::<bool>(&[2]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);

    let bytes = chunk_encode(&'λ').unwrap();
    assert_eq!(bytes.len(), 4);
    assert_eq!(chunk_decode::<char>(&bytes).unwrap(), 'λ');

    let err = chunk_decode::<char>(&0xD800u32.to_ne_bytes()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn truncated_scalar_is_unexpected_eof() {
    let err = chunk_decode::<u64>(&[1, 2, 3]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}
