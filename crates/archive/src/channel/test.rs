use std::io;

use super::*;

#[test]
fn memory_channel_reads_back_what_was_written() {
    let mut channel = MemoryChannel::new();
    channel.emit_raw_bytes(&[1, 2, 3]).unwrap();
    channel.emit_raw_bytes(&[4]).unwrap();

    let mut buf = [0u8; 2];
    channel.read_raw_bytes(&mut buf).unwrap();
    assert_eq!(buf, [1, 2]);
    assert_eq!(channel.position(), 2);
    assert_eq!(channel.remaining(), Some(2));
    assert_eq!(channel.unread(), &[3, 4]);

    // Reading does not discard anything.
    assert_eq!(channel.as_bytes(), &[1, 2, 3, 4]);
}

#[test]
fn memory_channel_truncation_is_unexpected_eof() {
    let mut channel = MemoryChannel::from_bytes(vec![1, 2, 3]);

    let mut buf = [0u8; 4];
    let err = channel.read_raw_bytes(&mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    // A failed read leaves the cursor where it was.
    assert_eq!(channel.position(), 0);
}

#[test]
fn slice_decoder_consumes_from_front() {
    let data = [7u8, 8, 9];
    let mut input = &data[..];

    let mut buf = [0u8; 2];
    input.read_raw_bytes(&mut buf).unwrap();
    assert_eq!(buf, [7, 8]);
    assert_eq!(Decoder::remaining(&input), Some(1));
}

#[test]
fn length_prefix_is_four_byte_i32() {
    let mut channel = MemoryChannel::new();
    channel.emit_len(5).unwrap();

    assert_eq!(channel.len(), LENGTH_PREFIX_SIZE);
    assert_eq!(channel.as_bytes(), &5i32.to_ne_bytes());
    assert_eq!(channel.read_len().unwrap(), 5);
}

#[test]
fn oversized_length_is_rejected_without_writing() {
    let mut channel = MemoryChannel::new();

    let too_long = usize::try_from(LengthPrefix::MAX).unwrap() + 1;
    let err = channel.emit_len(too_long).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(channel.is_empty());
}

#[test]
fn negative_length_is_invalid_data() {
    let mut channel = MemoryChannel::from_bytes((-1i32).to_ne_bytes().to_vec());

    let err = channel.read_len().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn stream_channels_wrap_io_traits() {
    let mut encoder = StreamEncoder::new(Vec::new());
    encoder.emit_scalar(&0x0102_0304u32).unwrap();
    encoder.encode("hi").unwrap();
    let bytes = encoder.into_inner();

    let mut decoder = StreamDecoder::new(bytes.as_slice());
    assert_eq!(decoder.read_scalar::<u32>().unwrap(), 0x0102_0304);
    assert_eq!(decoder.decode::<String>().unwrap(), "hi");

    let err = decoder.read_scalar::<u8>().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}
