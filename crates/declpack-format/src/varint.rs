//! Unsigned LEB128 varints.
//!
//! Each byte carries 7 bits of payload; the high bit marks continuation.

/// Maximum bytes for a 64-bit varint (ceil(64/7) = 10).
pub const MAX_VARINT_BYTES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VarintError {
    #[error("varint overflows 64 bits")]
    Overflow,
    #[error("varint truncated")]
    Truncated,
}

/// Append `value` to `out`, returning the number of bytes written.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) -> usize {
    let mut written = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        written += 1;
        if value == 0 {
            out.push(byte);
            return written;
        }
        out.push(byte | 0x80);
    }
}

/// Decode a varint from the start of `buf`.
///
/// Returns the value and the number of bytes consumed.
pub fn read_varint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_VARINT_BYTES {
            return Err(VarintError::Overflow);
        }

        let value = u64::from(byte & 0x7F);
        if shift == 63 && value > 1 {
            return Err(VarintError::Overflow);
        }
        result |= value << shift;

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    Err(VarintError::Truncated)
}

/// Encoded size of `value` in bytes.
pub const fn varint_size(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7)
}
