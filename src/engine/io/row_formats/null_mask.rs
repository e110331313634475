//! Implementation of the null bit flags to know if a column is null or not
//! I'm not using a standard library because the bitvector library collides with nom
use crate::engine::objects::SqlTuple;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

pub struct NullMask {}

impl NullMask {
    pub fn serialize(input: &SqlTuple) -> Bytes {
        if input.0.is_empty() {
            return Bytes::new();
        }

        let mut buffer = BytesMut::with_capacity((input.0.len() + 7) / 8);
        let mut any_null = false;

        let mut value: u8 = 0;
        let mut mask: u8 = 0x80;
        for (i, column) in input.0.iter().enumerate() {
            if column.is_none() {
                value |= mask;
                any_null = true;
            }

            if (i + 1) % 8 == 0 {
                buffer.put_u8(value);
                value = 0;
                mask = 0x80;
            } else {
                mask >>= 1;
            }
        }

        if input.0.len() % 8 != 0 {
            buffer.put_u8(value);
        }

        if !any_null {
            return Bytes::new();
        }
        buffer.freeze()
    }

    pub fn parse(buffer: &mut impl Buf, column_count: usize) -> Result<Vec<bool>, NullMaskError> {
        let needed = (column_count + 7) / 8;
        if buffer.remaining() < needed {
            return Err(NullMaskError::BufferTooShort(buffer.remaining(), needed));
        }

        let mut nulls = Vec::with_capacity(needed * 8);
        let mut remaining_columns = column_count;
        while remaining_columns > 0 {
            let mut temp = buffer.get_u8();
            for _ in 0..8 {
                if temp & 0x80 > 0 {
                    nulls.push(true);
                } else {
                    nulls.push(false);
                }
                temp <<= 1;
            }
            remaining_columns = remaining_columns.saturating_sub(8);
        }

        //This is needed since we decode more flags than columns
        nulls.resize(column_count, false);

        Ok(nulls)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum NullMaskError {
    #[error("Buffer too short to parse found {0} bytes, need {1}")]
    BufferTooShort(usize, usize),
}
