//! Archives over caller-supplied channels backed by files.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
};

use compact_archive::{
    Archive, Decoder, StreamDecoder, StreamEncoder, chunk_encode,
    container::PREALLOCATION_BUDGET,
};
use compact_archive_integration_test::{
    Command, Custom, Inventory, ReadCounter, Sample, inventory, samples,
};
use tempfile::tempdir;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn file_backed_round_trip() {
    let tempdir = tempdir().unwrap();
    let path = tempdir.path().join("archive.bin");

    let original = inventory();
    let commands = vec![
        Command::Move { to: Sample::new(10, 2.5) },
        Command::Rename("moved".to_string()),
    ];
    let readings = samples(256);

    {
        let file = File::create(&path).unwrap();
        let mut archive =
            Archive::with_channel(StreamEncoder::new(BufWriter::new(file)));

        archive
            .encode(&original)
            .unwrap()
            .encode(&commands)
            .unwrap()
            .encode_slice(&readings)
            .unwrap();

        archive.get_mut().get_mut().flush().unwrap();
    }

    let len = std::fs::metadata(&path).unwrap().len();
    tracing::info!(len, "archive written");

    let file = File::open(&path).unwrap();
    let mut archive =
        Archive::with_channel(StreamDecoder::new(BufReader::new(file)));

    let decoded: Inventory = archive.decode_value().unwrap();
    let mut decoded_commands = Vec::<Command>::new();
    let mut decoded_readings = vec![Sample::default(); readings.len()];
    archive
        .decode(&mut decoded_commands)
        .unwrap()
        .decode_slice(&mut decoded_readings)
        .unwrap();

    assert_eq!(decoded.owner, original.owner);
    assert_eq!(decoded.counts, original.counts);
    assert_eq!(decoded.history, original.history);
    assert_eq!(decoded_commands, commands);
    assert_eq!(decoded_readings, readings);

    let err = archive.decode_value::<Custom>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn truncated_file_is_unexpected_eof() {
    let tempdir = tempdir().unwrap();
    let path = tempdir.path().join("truncated.bin");

    {
        let file = File::create(&path).unwrap();
        let mut archive = Archive::with_channel(StreamEncoder::new(file));
        archive.encode(&Custom::new("cut short", 1, 2)).unwrap();
    }

    let file = File::options().write(true).open(&path).unwrap();
    file.set_len(6).unwrap();
    drop(file);

    let mut archive =
        Archive::with_channel(StreamDecoder::new(File::open(&path).unwrap()));
    let err = archive.decode_value::<Custom>().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
#[traced_test]
fn huge_length_prefix_on_stream_is_unexpected_eof() {
    let prefix = i32::MAX.to_ne_bytes();

    let mut archive = Archive::with_channel(StreamDecoder::new(&prefix[..]));
    let err = archive.decode_value::<Vec<String>>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

    let mut archive = Archive::with_channel(StreamDecoder::new(&prefix[..]));
    let err = archive.decode_value::<Vec<u128>>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

    let mut archive = Archive::with_channel(StreamDecoder::new(&prefix[..]));
    let err = archive.decode_value::<String>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn long_scalar_run_on_stream_reads_in_blocks() {
    let block = PREALLOCATION_BUDGET / size_of::<u64>();
    let numbers: Vec<u64> = (0..(block * 2 + 17) as u64).collect();
    let chunk = chunk_encode(&numbers).unwrap();

    let mut decoder = ReadCounter::new(StreamDecoder::new(chunk.as_slice()));
    let decoded: Vec<u64> = decoder.decode().unwrap();

    assert_eq!(decoded, numbers);
    // prefix, then three blocks
    assert_eq!(decoder.reads(), 4);
    assert_eq!(decoder.bytes(), chunk.len());
}
