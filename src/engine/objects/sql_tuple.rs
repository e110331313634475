//!Wrapper type for a row unattached to a table
use std::ops::Deref;

use crate::engine::io::SelfEncodedSize;

use super::types::BaseSqlTypes;
use bytes::BytesMut;
use thiserror::Error;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SqlTuple(pub Vec<Option<BaseSqlTypes>>);

impl SqlTuple {
    /// Picks the requested columns out by position, cloning them into a new
    /// tuple. Used for projections and group keys.
    pub fn project(&self, columns: &[usize]) -> Result<SqlTuple, SqlTupleError> {
        let mut output = Vec::with_capacity(columns.len());
        for c in columns {
            let value = self
                .0
                .get(*c)
                .ok_or_else(|| SqlTupleError::ColumnOutOfRange(*c, self.0.len()))?;
            output.push(value.clone());
        }
        Ok(SqlTuple(output))
    }

    pub fn serialize(&self, buffer: &mut BytesMut) {
        for data in &self.0 {
            match data {
                Some(d) => d.serialize(buffer),
                None => {}
            }
        }
    }
}

impl Deref for SqlTuple {
    type Target = Vec<Option<BaseSqlTypes>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl SelfEncodedSize for SqlTuple {
    fn encoded_size(&self) -> usize {
        self.iter().fold(0, |acc, col| match col {
            Some(col_s) => acc + col_s.encoded_size(),
            None => acc,
        })
    }
}

#[derive(Debug, Error)]
pub enum SqlTupleError {
    #[error("Requested column {0} out of a tuple of {1}")]
    ColumnOutOfRange(usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_tuple_project() -> Result<(), Box<dyn std::error::Error>> {
        let src_cols = SqlTuple(vec![
            None,
            Some(BaseSqlTypes::Text("Test".to_string())),
            Some(BaseSqlTypes::Integer(12)),
        ]);

        let projected = src_cols.project(&[2, 1])?;

        let expected = SqlTuple(vec![
            Some(BaseSqlTypes::Integer(12)),
            Some(BaseSqlTypes::Text("Test".to_string())),
        ]);

        assert_eq!(projected, expected);

        assert!(src_cols.project(&[3]).is_err());

        Ok(())
    }

    #[test]
    fn test_encoded_size() {
        let tuple = SqlTuple(vec![Some(BaseSqlTypes::Uuid(uuid::Uuid::new_v4())), None]);

        let mut buffer = BytesMut::new();
        tuple.serialize(&mut buffer);
        let buffer = buffer.freeze();

        assert_eq!(tuple.encoded_size(), buffer.len());
    }

    #[test]
    fn test_tuple_ordering() {
        //Nulls sort ahead of values, then value order applies
        let null_row = SqlTuple(vec![None]);
        let low = SqlTuple(vec![Some(BaseSqlTypes::Integer(1))]);
        let high = SqlTuple(vec![Some(BaseSqlTypes::Integer(2))]);

        assert!(null_row < low);
        assert!(low < high);
    }
}
