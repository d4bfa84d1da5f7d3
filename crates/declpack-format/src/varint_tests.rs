use crate::{VarintError, read_varint, varint_size, write_varint};

#[test]
fn small_values_take_one_byte() {
    let mut out = Vec::new();
    assert_eq!(write_varint(&mut out, 0), 1);
    assert_eq!(write_varint(&mut out, 127), 1);
    assert_eq!(out, vec![0x00, 0x7F]);
}

#[test]
fn multi_byte_encoding() {
    let mut out = Vec::new();
    write_varint(&mut out, 300);

    assert_eq!(out, vec![0xAC, 0x02]);
    assert_eq!(read_varint(&out), Ok((300, 2)));
}

#[test]
fn max_value_uses_ten_bytes() {
    let mut out = Vec::new();
    write_varint(&mut out, u64::MAX);

    assert_eq!(out.len(), 10);
    assert_eq!(read_varint(&out), Ok((u64::MAX, 10)));
    assert_eq!(varint_size(u64::MAX), 10);
}

#[test]
fn size_matches_encoding() {
    for value in [0, 1, 127, 128, 16_383, 16_384, 1 << 35] {
        let mut out = Vec::new();
        write_varint(&mut out, value);
        assert_eq!(varint_size(value), out.len(), "value {value}");
    }
}

#[test]
fn truncated_input() {
    assert_eq!(read_varint(&[0x80, 0x80]), Err(VarintError::Truncated));
    assert_eq!(read_varint(&[]), Err(VarintError::Truncated));
}

#[test]
fn overflow_rejected() {
    let bytes = [0xFF; 11];
    assert_eq!(read_varint(&bytes), Err(VarintError::Overflow));
}
