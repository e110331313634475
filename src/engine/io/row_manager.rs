//! The row manager is a mapper between tuples and their encoded rows in the
//! store. It operates at the lowest typed level.
use super::super::objects::{SqlTuple, Table};
use super::row_formats::{RowData, RowDataError};
use super::{StoreManager, StoreManagerError};
use async_stream::try_stream;
use futures::stream::Stream;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct RowManager {
    store_manager: StoreManager,
}

impl RowManager {
    pub fn new(store_manager: StoreManager) -> RowManager {
        RowManager { store_manager }
    }

    pub async fn insert_row(
        &self,
        table: &Arc<Table>,
        user_data: SqlTuple,
    ) -> Result<usize, RowManagerError> {
        let row = RowData::new(table.clone(), user_data)?;
        let offset = self
            .store_manager
            .add_row(&table.id, row.serialize())
            .await?;
        Ok(offset)
    }

    pub async fn count(&self, table: &Arc<Table>) -> usize {
        self.store_manager.row_count(&table.id).await
    }

    pub fn get_stream(
        &self,
        table: &Arc<Table>,
    ) -> impl Stream<Item = Result<RowData, RowManagerError>> {
        let table = table.clone();
        let store_manager = self.store_manager.clone();

        try_stream! {
            for await row_bytes in store_manager.get_stream(table.id) {
                let row = RowData::parse(table.clone(), row_bytes)?;
                yield row;
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RowManagerError {
    #[error(transparent)]
    RowDataError(#[from] RowDataError),
    #[error(transparent)]
    StoreManagerError(#[from] StoreManagerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TableDefinitions;
    use crate::engine::objects::types::BaseSqlTypes;
    use futures::pin_mut;
    use tokio_stream::StreamExt;

    macro_rules! aw {
        ($e:expr) => {
            tokio_test::block_on($e)
        };
    }

    fn get_hits_row(phrase: Option<&str>) -> SqlTuple {
        SqlTuple(vec![
            Some(BaseSqlTypes::Integer(1)),
            phrase.map(|p| BaseSqlTypes::Text(p.to_string())),
            Some(BaseSqlTypes::Bool(false)),
            Some(BaseSqlTypes::Integer(0)),
            None,
            Some(BaseSqlTypes::Text("5".to_string())),
            Some(BaseSqlTypes::Text("de".to_string())),
            Some(BaseSqlTypes::Text("de".to_string())),
        ])
    }

    #[test]
    fn test_insert_and_scan() -> Result<(), Box<dyn std::error::Error>> {
        let rm = RowManager::new(StoreManager::new());
        let hits = TableDefinitions::Hits.value();

        aw!(rm.insert_row(&hits, get_hits_row(Some("rust async streams"))))?;
        aw!(rm.insert_row(&hits, get_hits_row(None)))?;

        assert_eq!(aw!(rm.count(&hits)), 2);

        let rows: Vec<RowData> = aw!(async {
            let s = rm.get_stream(&hits);
            pin_mut!(s);
            s.map(Result::unwrap).collect().await
        });

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].user_data.0[1],
            Some(BaseSqlTypes::Text("rust async streams".to_string()))
        );
        assert_eq!(rows[1].user_data.0[1], None);

        Ok(())
    }

    #[test]
    fn test_insert_rejects_bad_row() {
        let rm = RowManager::new(StoreManager::new());
        let hits = TableDefinitions::Hits.value();

        let too_short = SqlTuple(vec![Some(BaseSqlTypes::Integer(1))]);
        assert!(aw!(rm.insert_row(&hits, too_short)).is_err());
    }
}
