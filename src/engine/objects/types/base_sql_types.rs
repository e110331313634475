use crate::engine::io::{encode_size, expected_encoded_size, parse_size, SelfEncodedSize, SizeError};
use bytes::{Buf, BufMut, BytesMut};
use std::{
    fmt::{self, Display, Formatter},
    mem::size_of,
    num::ParseIntError,
    str::ParseBoolError,
    string::FromUtf8Error,
};
use thiserror::Error;
use uuid::Uuid;

/// The value types the engine supports. Any of them can serve as a distinct
/// set member, a group key or a sort key, hence the full ordering + hashing.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BaseSqlTypes {
    Bool(bool),
    Integer(u32),
    Text(String),
    Uuid(uuid::Uuid),
}

/// BaseSqlTypesMapper exists to name a type without imposing the cost of an
/// empty value.
///
/// This will exist until this RFC is fixed: https://github.com/rust-lang/rfcs/pull/2593
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BaseSqlTypesMapper {
    Bool,
    Integer,
    Text,
    Uuid,
}

impl BaseSqlTypes {
    pub fn deserialize(
        target_type: BaseSqlTypesMapper,
        buffer: &mut impl Buf,
    ) -> Result<Self, BaseSqlTypesError> {
        match target_type {
            BaseSqlTypesMapper::Bool => {
                if buffer.remaining() < size_of::<u8>() {
                    return Err(BaseSqlTypesError::InsufficentBuffer(
                        size_of::<u8>(),
                        buffer.remaining(),
                    ));
                }
                let dest = buffer.get_u8();
                let value = match dest {
                    0x0 => BaseSqlTypes::Bool(false),
                    _ => BaseSqlTypes::Bool(true),
                };

                Ok(value)
            }
            BaseSqlTypesMapper::Integer => {
                if buffer.remaining() < size_of::<u32>() {
                    return Err(BaseSqlTypesError::InsufficentBuffer(
                        size_of::<u32>(),
                        buffer.remaining(),
                    ));
                }

                let dest = buffer.get_u32_le();
                Ok(BaseSqlTypes::Integer(dest))
            }
            BaseSqlTypesMapper::Uuid => {
                if buffer.remaining() < size_of::<u128>() {
                    return Err(BaseSqlTypesError::InsufficentBuffer(
                        size_of::<u128>(),
                        buffer.remaining(),
                    ));
                }
                let dest = buffer.get_u128_le();
                Ok(BaseSqlTypes::Uuid(uuid::Uuid::from_u128(dest)))
            }
            BaseSqlTypesMapper::Text => {
                let length = parse_size(buffer)?;

                if length > buffer.remaining() {
                    return Err(BaseSqlTypesError::InsufficentBuffer(
                        length,
                        buffer.remaining(),
                    ));
                }

                //TODO find a way to skip a copy here
                let value_buff = buffer.copy_to_bytes(length);
                let value_str = String::from_utf8(value_buff.to_vec())?;

                Ok(BaseSqlTypes::Text(value_str))
            }
        }
    }

    /// Parses the textual form, as found in insert values and TSV fields.
    /// Bools additionally accept 0 / 1 since that is what hit exports use.
    pub fn parse(target_type: BaseSqlTypesMapper, buffer: &str) -> Result<Self, BaseSqlTypesError> {
        match target_type {
            BaseSqlTypesMapper::Bool => match buffer {
                "0" => Ok(BaseSqlTypes::Bool(false)),
                "1" => Ok(BaseSqlTypes::Bool(true)),
                _ => Ok(BaseSqlTypes::Bool(buffer.parse::<bool>()?)),
            },
            BaseSqlTypesMapper::Integer => Ok(BaseSqlTypes::Integer(buffer.parse::<u32>()?)),
            BaseSqlTypesMapper::Uuid => Ok(BaseSqlTypes::Uuid(uuid::Uuid::parse_str(buffer)?)),
            BaseSqlTypesMapper::Text => Ok(BaseSqlTypes::Text(buffer.to_string())),
        }
    }

    pub fn serialize(&self, buffer: &mut BytesMut) {
        match *self {
            Self::Bool(ref value) => {
                if *value {
                    buffer.put_u8(0x1);
                } else {
                    buffer.put_u8(0x0);
                }
            }
            Self::Integer(ref value) => {
                buffer.put_u32_le(*value);
            }
            Self::Uuid(ref value) => {
                buffer.put_u128_le(value.as_u128());
            }
            Self::Text(ref value) => {
                encode_size(buffer, value.len());
                buffer.extend_from_slice(value.as_bytes());
            }
        }
    }

    /// Used to map if we have the types linked up right.
    pub fn type_matches(&self, right: BaseSqlTypesMapper) -> bool {
        match (self, right) {
            (Self::Bool(_), BaseSqlTypesMapper::Bool) => true,
            (Self::Integer(_), BaseSqlTypesMapper::Integer) => true,
            (Self::Text(_), BaseSqlTypesMapper::Text) => true,
            (Self::Uuid(_), BaseSqlTypesMapper::Uuid) => true,
            (_, _) => false,
        }
    }
}

impl SelfEncodedSize for BaseSqlTypes {
    fn encoded_size(&self) -> usize {
        match self {
            Self::Bool(_) => size_of::<u8>(),
            Self::Integer(_) => size_of::<u32>(),
            Self::Uuid(_) => size_of::<Uuid>(),
            Self::Text(ref t) => expected_encoded_size(t.len()) + t.len(),
        }
    }
}

impl Display for BaseSqlTypes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BaseSqlTypes::Bool(ref value) => {
                write!(f, "{}", value)
            }
            BaseSqlTypes::Integer(ref value) => {
                write!(f, "{}", value)
            }
            BaseSqlTypes::Uuid(ref value) => {
                write!(f, "{}", value)
            }
            BaseSqlTypes::Text(ref value) => {
                write!(f, "{}", value)
            }
        }
    }
}

impl Display for BaseSqlTypesMapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BaseSqlTypesMapper::Bool => {
                write!(f, "bool")
            }
            BaseSqlTypesMapper::Integer => {
                write!(f, "integer")
            }
            BaseSqlTypesMapper::Uuid => {
                write!(f, "uuid")
            }
            BaseSqlTypesMapper::Text => {
                write!(f, "text")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum BaseSqlTypesError {
    #[error(transparent)]
    FromUtf8Error(#[from] FromUtf8Error),
    #[error("Length needed {0}, length found {1}")]
    InsufficentBuffer(usize, usize),
    #[error(transparent)]
    InvalidBool(#[from] ParseBoolError),
    #[error(transparent)]
    InvalidInt(#[from] ParseIntError),
    #[error(transparent)]
    InvalidUuid(#[from] uuid::Error),
    #[error(transparent)]
    SizeError(#[from] SizeError),
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use uuid::Uuid;

    use super::*;

    fn roundtrip(input: String) -> String {
        let stype = BaseSqlTypes::Text(input);
        let mut buffer = BytesMut::with_capacity(stype.encoded_size());
        stype.serialize(&mut buffer);
        let mut fbuff = buffer.freeze();
        let result = BaseSqlTypes::deserialize(BaseSqlTypesMapper::Text, &mut fbuff).unwrap();
        match result {
            BaseSqlTypes::Text(t) => t,
            _ => {
                panic!("Well this test failed!");
            }
        }
    }

    #[test]
    fn test_short_roundtrip() {
        let test = "google maps kherson";
        let output = roundtrip(test.to_string());

        assert_eq!(output, test);
    }

    #[test]
    fn test_empty_roundtrip() {
        let test = "";
        let output = roundtrip(test.to_string());

        assert_eq!(output, test);
    }

    #[test]
    fn test_long_roundtrip() {
        let test = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Donec vel porta enim. Sed interdum egestas velit et porttitor. Vestibulum sollicitudin mi enim, in fringilla lectus tincidunt quis. Morbi eget.";
        let output = roundtrip(test.to_string());

        assert_eq!(output, test);
    }

    #[test]
    fn test_builtin_display() {
        let text = BaseSqlTypes::Bool(true);
        assert_eq!(text.to_string(), "true");

        let text = BaseSqlTypes::Integer(5);
        assert_eq!(text.to_string(), "5");

        let text = BaseSqlTypes::Text("FOOBAR".to_string());
        assert_eq!(text.to_string(), "FOOBAR");

        let text = BaseSqlTypes::Uuid(Uuid::from_bytes(hex!("EE919E33D9054F4889537EBB6CC911EB")));
        assert_eq!(text.to_string(), "ee919e33-d905-4f48-8953-7ebb6cc911eb");

        assert_eq!(BaseSqlTypesMapper::Bool.to_string(), "bool");
        assert_eq!(BaseSqlTypesMapper::Integer.to_string(), "integer");
        assert_eq!(BaseSqlTypesMapper::Text.to_string(), "text");
        assert_eq!(BaseSqlTypesMapper::Uuid.to_string(), "uuid");
    }

    #[test]
    fn test_integer_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let test = "5";
        let parse_str = BaseSqlTypes::parse(BaseSqlTypesMapper::Integer, test)?;
        match parse_str {
            BaseSqlTypes::Integer(i) => {
                assert_eq!(i, 5);
            }
            _ => panic!("Wrong type"),
        };

        let mut buffer = BytesMut::with_capacity(parse_str.encoded_size());
        parse_str.serialize(&mut buffer);
        let mut parse_serial = buffer.freeze();
        let reparse = BaseSqlTypes::deserialize(BaseSqlTypesMapper::Integer, &mut parse_serial)?;
        match reparse {
            BaseSqlTypes::Integer(i) => {
                assert_eq!(i, 5)
            }
            _ => panic!("Wrong type"),
        };

        Ok(())
    }

    #[test]
    fn test_parse_bool_digits() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            BaseSqlTypes::parse(BaseSqlTypesMapper::Bool, "0")?,
            BaseSqlTypes::Bool(false)
        );
        assert_eq!(
            BaseSqlTypes::parse(BaseSqlTypesMapper::Bool, "1")?,
            BaseSqlTypes::Bool(true)
        );
        assert_eq!(
            BaseSqlTypes::parse(BaseSqlTypesMapper::Bool, "true")?,
            BaseSqlTypes::Bool(true)
        );
        assert!(BaseSqlTypes::parse(BaseSqlTypesMapper::Bool, "maybe").is_err());
        Ok(())
    }

    #[test]
    pub fn test_type_matches() {
        assert!(BaseSqlTypes::Bool(true).type_matches(BaseSqlTypesMapper::Bool));
        assert!(!BaseSqlTypes::Bool(true).type_matches(BaseSqlTypesMapper::Integer));
        assert!(!BaseSqlTypes::Bool(true).type_matches(BaseSqlTypesMapper::Uuid));
        assert!(!BaseSqlTypes::Bool(true).type_matches(BaseSqlTypesMapper::Text));

        assert!(!BaseSqlTypes::Integer(0).type_matches(BaseSqlTypesMapper::Bool));
        assert!(BaseSqlTypes::Integer(0).type_matches(BaseSqlTypesMapper::Integer));
        assert!(!BaseSqlTypes::Integer(0).type_matches(BaseSqlTypesMapper::Uuid));
        assert!(!BaseSqlTypes::Integer(0).type_matches(BaseSqlTypesMapper::Text));

        assert!(!BaseSqlTypes::Uuid(uuid::Uuid::new_v4()).type_matches(BaseSqlTypesMapper::Bool));
        assert!(!BaseSqlTypes::Uuid(uuid::Uuid::new_v4()).type_matches(BaseSqlTypesMapper::Integer));
        assert!(BaseSqlTypes::Uuid(uuid::Uuid::new_v4()).type_matches(BaseSqlTypesMapper::Uuid));
        assert!(!BaseSqlTypes::Uuid(uuid::Uuid::new_v4()).type_matches(BaseSqlTypesMapper::Text));

        assert!(!BaseSqlTypes::Text("foo".to_string()).type_matches(BaseSqlTypesMapper::Bool));
        assert!(!BaseSqlTypes::Text("foo".to_string()).type_matches(BaseSqlTypesMapper::Integer));
        assert!(!BaseSqlTypes::Text("foo".to_string()).type_matches(BaseSqlTypesMapper::Uuid));
        assert!(BaseSqlTypes::Text("foo".to_string()).type_matches(BaseSqlTypesMapper::Text));
    }
}
