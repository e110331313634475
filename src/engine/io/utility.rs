//! Variable width length encoding used in front of strings and row payloads.
use bytes::{Buf, BufMut};
use thiserror::Error;

/// Will provide the length in bytes the supplied usize will encode to without encoding
pub fn expected_encoded_size(size: usize) -> usize {
    let mut len = 1;
    let mut remaining = size >> 7;
    while remaining > 0 {
        len += 1;
        remaining >>= 7;
    }
    len
}

/// Writes a length out to a byte stream as a series of 7 bit numbers, with the high
/// bit used to indicate there are more digits coming. Zero encodes as a single byte.
pub fn encode_size(buffer: &mut impl BufMut, mut size: usize) {
    loop {
        let mut digit: u8 = (size as u8) & 0x7f;
        size >>= 7;
        if size > 0 {
            digit |= 0x80;
        }
        buffer.put_u8(digit);
        if size == 0 {
            break;
        }
    }
}

pub fn parse_size(buffer: &mut impl Buf) -> Result<usize, SizeError> {
    let mut size: usize = 0;
    let mut high_bit = 1;
    let mut loop_count = 0;
    while high_bit == 1 {
        if !buffer.has_remaining() {
            return Err(SizeError::BufferTooShort());
        }

        let b = buffer.get_u8();
        high_bit = b >> 7;

        let mut low_bits: usize = (b & 0x7f).into();
        low_bits <<= 7 * loop_count;
        loop_count += 1;

        size = size
            .checked_add(low_bits)
            .ok_or_else(SizeError::SizeOverflow)?;
    }

    Ok(size)
}

#[derive(Debug, Error)]
pub enum SizeError {
    #[error("Buffer too short to parse")]
    BufferTooShort(),
    #[error("Size Overflow!")]
    SizeOverflow(),
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    fn roundtrip(test: usize) -> Result<(), Box<dyn std::error::Error>> {
        let mut buffer = BytesMut::with_capacity(expected_encoded_size(test));
        encode_size(&mut buffer, test);
        let mut serialized = buffer.freeze();

        assert_eq!(serialized.len(), expected_encoded_size(test));
        let parsed = parse_size(&mut serialized)?;
        assert_eq!(test, parsed);
        Ok(())
    }

    #[test]
    fn test_size_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        roundtrip(0)?;
        roundtrip(1)?;
        roundtrip(127)?;
        roundtrip(128)?;
        roundtrip(66000)?;
        Ok(())
    }

    #[test]
    fn test_parse_empty() {
        let mut buffer = BytesMut::new().freeze();
        assert!(parse_size(&mut buffer).is_err());
    }
}
