//! Encodes / decodes a row into a byte array based on the table definition.
//! Format from here: https://www.postgresql.org/docs/current/storage-page-layout.html
//! As always I'm only implementing what I need and will extend once I need more
use super::super::super::objects::types::{BaseSqlTypes, BaseSqlTypesError, BaseSqlTypesMapper};
use super::super::super::objects::{SqlTuple, Table};
use super::{InfoMask, NullMask, NullMaskError};
use crate::constants::Nullable;
use crate::engine::io::{ConstEncodedSize, SelfEncodedSize};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct RowData {
    table: Arc<Table>,
    pub user_data: SqlTuple,
}

impl RowData {
    pub fn new(table: Arc<Table>, user_data: SqlTuple) -> Result<RowData, RowDataError> {
        if table.attributes.len() != user_data.len() {
            return Err(RowDataError::TableRowSizeMismatch(
                table.attributes.len(),
                user_data.len(),
            ));
        }
        for (data, column) in user_data.iter().zip(table.attributes.iter()) {
            match data {
                Some(d) => {
                    if !d.type_matches(column.sql_type) {
                        return Err(RowDataError::TableRowTypeMismatch(
                            d.clone(),
                            column.sql_type,
                        ));
                    }
                }
                None => {
                    if column.nullable == Nullable::NotNull {
                        return Err(RowDataError::UnexpectedNull(column.name.clone()));
                    }
                }
            }
        }

        Ok(RowData { table, user_data })
    }

    pub fn serialize(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.encoded_size());

        let mut mask = InfoMask::empty();
        for i in self.user_data.iter() {
            if i.is_none() {
                mask = InfoMask::HAS_NULL;
            }
        }
        buffer.put_u8(mask.bits());

        let nulls = NullMask::serialize(&self.user_data);
        buffer.put(nulls);

        self.user_data.serialize(&mut buffer);

        buffer.freeze()
    }

    pub fn parse(table: Arc<Table>, mut row_buffer: impl Buf) -> Result<RowData, RowDataError> {
        let null_mask = RowData::get_null_mask(&table, &mut row_buffer)?;

        let mut user_data = Vec::with_capacity(table.attributes.len());
        for (column, mask) in table.attributes.iter().zip(null_mask.iter()) {
            if *mask {
                user_data.push(None);
            } else {
                user_data.push(Some(BaseSqlTypes::deserialize(
                    column.sql_type,
                    &mut row_buffer,
                )?));
            }
        }

        RowData::new(table, SqlTuple(user_data))
    }

    //Gets the null mask, if it doesn't exist it will return a vector of all not nulls
    fn get_null_mask(
        table: &Arc<Table>,
        mut row_buffer: impl Buf,
    ) -> Result<Vec<bool>, RowDataError> {
        if row_buffer.remaining() < InfoMask::encoded_size() {
            return Err(RowDataError::MissingInfoMaskData(
                InfoMask::encoded_size(),
                row_buffer.remaining(),
            ));
        }

        let mask = InfoMask::from_bits_truncate(row_buffer.get_u8()); //Ignoring unused bits
        if !mask.contains(InfoMask::HAS_NULL) {
            return Ok(vec![false; table.attributes.len()]);
        }

        Ok(NullMask::parse(&mut row_buffer, table.attributes.len())?)
    }
}

impl SelfEncodedSize for RowData {
    fn encoded_size(&self) -> usize {
        let mut size = InfoMask::encoded_size();
        if self.user_data.iter().any(|d| d.is_none()) {
            size += (self.user_data.len() + 7) / 8;
        }
        size + self.user_data.encoded_size()
    }
}

#[derive(Debug, Error)]
pub enum RowDataError {
    #[error("Table definition length {0} does not match columns passed {1}")]
    TableRowSizeMismatch(usize, usize),
    #[error("Table definition type {1} does not match column passed {0}")]
    TableRowTypeMismatch(BaseSqlTypes, BaseSqlTypesMapper),
    #[error("Column {0} is not nullable")]
    UnexpectedNull(String),
    #[error("Not enough data for the info mask, need {0} got {1}")]
    MissingInfoMaskData(usize, usize),
    #[error(transparent)]
    NullMaskError(#[from] NullMaskError),
    #[error(transparent)]
    BaseSqlTypesError(#[from] BaseSqlTypesError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::objects::types::BaseSqlTypesMapper;
    use crate::engine::objects::Attribute;
    use uuid::Uuid;

    fn get_table() -> Arc<Table> {
        Arc::new(Table::new(
            Uuid::new_v4(),
            "test_hits".to_string(),
            vec![
                Attribute::new(
                    "CounterID".to_string(),
                    BaseSqlTypesMapper::Integer,
                    Nullable::NotNull,
                ),
                Attribute::new(
                    "SearchPhrase".to_string(),
                    BaseSqlTypesMapper::Text,
                    Nullable::Null,
                ),
                Attribute::new(
                    "IsMobile".to_string(),
                    BaseSqlTypesMapper::Bool,
                    Nullable::NotNull,
                ),
            ],
        ))
    }

    #[test]
    fn test_row_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let table = get_table();
        let row = RowData::new(
            table.clone(),
            SqlTuple(vec![
                Some(BaseSqlTypes::Integer(7)),
                Some(BaseSqlTypes::Text("baltic sea webcam".to_string())),
                Some(BaseSqlTypes::Bool(false)),
            ]),
        )?;

        let serialized = row.serialize();
        assert_eq!(serialized.len(), row.encoded_size());

        let parsed = RowData::parse(table, serialized)?;
        assert_eq!(parsed, row);

        Ok(())
    }

    #[test]
    fn test_row_roundtrip_with_null() -> Result<(), Box<dyn std::error::Error>> {
        let table = get_table();
        let row = RowData::new(
            table.clone(),
            SqlTuple(vec![
                Some(BaseSqlTypes::Integer(7)),
                None,
                Some(BaseSqlTypes::Bool(true)),
            ]),
        )?;

        let serialized = row.serialize();
        assert_eq!(serialized.len(), row.encoded_size());

        let parsed = RowData::parse(table, serialized)?;
        assert_eq!(parsed, row);

        Ok(())
    }

    #[test]
    fn test_row_wrong_arity() {
        let table = get_table();
        let res = RowData::new(table, SqlTuple(vec![Some(BaseSqlTypes::Integer(7))]));
        assert!(res.is_err());
    }

    #[test]
    fn test_row_wrong_type() {
        let table = get_table();
        let res = RowData::new(
            table,
            SqlTuple(vec![
                Some(BaseSqlTypes::Text("not a number".to_string())),
                None,
                Some(BaseSqlTypes::Bool(true)),
            ]),
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_row_null_violation() {
        let table = get_table();
        let res = RowData::new(
            table,
            SqlTuple(vec![
                None,
                Some(BaseSqlTypes::Text("ferry schedule".to_string())),
                Some(BaseSqlTypes::Bool(true)),
            ]),
        );
        match res {
            Err(RowDataError::UnexpectedNull(c)) => assert_eq!(c, "CounterID"),
            _ => panic!("Expected a null violation"),
        }
    }
}
