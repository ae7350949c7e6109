use std::{collections::BTreeMap, io};

use super::*;
use crate::{StreamDecoder, StreamEncoder};

#[test]
fn owned_archive_encodes_then_decodes_in_order() {
    let numbers = [1i32, 2, 3, 4, 5];
    let words = vec!["abc".to_string(), "def".to_string(), "ghi".to_string()];
    let table =
        BTreeMap::from([("a".to_string(), 1u64), ("b".to_string(), 2u64)]);

    let mut archive = Archive::new();
    archive.encode(&numbers).unwrap().encode(&words).unwrap();
    archive.encode(&table).unwrap();

    let mut numbers_out = [0i32; 5];
    let mut words_out = Vec::<String>::new();
    let mut table_out = BTreeMap::<String, u64>::new();
    archive
        .decode(&mut numbers_out)
        .unwrap()
        .decode(&mut words_out)
        .unwrap()
        .decode(&mut table_out)
        .unwrap();

    assert_eq!(numbers_out, numbers);
    assert_eq!(words_out, words);
    assert_eq!(table_out, table);
    assert!(archive.get_ref().unread().is_empty());
}

#[test]
fn raw_slices_have_no_prefix() {
    let values = [1.5f32, -2.0, 8.25];

    let mut archive = Archive::new();
    archive.encode_slice(&values).unwrap();
    assert_eq!(archive.get_ref().len(), 3 * 4);

    let mut out = [0f32; 3];
    archive.decode_slice(&mut out).unwrap();
    assert_eq!(out, values);
}

#[test]
fn caller_supplied_channels() {
    let mut archive = Archive::with_channel(StreamEncoder::new(Vec::new()));
    archive.encode(&(7u8, "seven".to_string())).unwrap();
    let bytes = archive.into_inner().into_inner();

    let mut archive = Archive::with_channel(StreamDecoder::new(&bytes[..]));
    let value: (u8, String) = archive.decode_value().unwrap();
    assert_eq!(value, (7, "seven".to_string()));
}

#[test]
fn chunk_roundtrip() {
    let value = vec![(1u16, "one".to_string()), (2, "two".to_string())];

    let chunk = chunk_encode(&value).unwrap();
    let decoded: Vec<(u16, String)> = chunk_decode(&chunk).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn chunk_decode_reports_truncation() {
    let chunk = chunk_encode(&"truncated".to_string()).unwrap();

    let err = chunk_decode::<String>(&chunk[..6]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn from_bytes_decodes_existing_buffer() {
    let chunk = chunk_encode(&(1u32, 2u64, 3u8)).unwrap();
    assert_eq!(chunk.len(), 4 + 8 + 1);

    let mut archive = Archive::from_bytes(chunk);
    let value: (u32, u64, u8) = archive.decode_value().unwrap();
    assert_eq!(value, (1, 2, 3));
}
