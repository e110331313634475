//! Streams every tuple of a table out of the row manager. There is no
//! predicate support, the analytic statements always read whole tables.
use super::super::io::RowManager;
use super::super::objects::{SqlTuple, Table};
use super::ExecutorError;
use async_stream::try_stream;
use futures::stream::Stream;
use std::sync::Arc;

pub struct FullTableScan {
    row_manager: RowManager,
}

impl FullTableScan {
    pub fn new(row_manager: RowManager) -> FullTableScan {
        FullTableScan { row_manager }
    }

    pub fn execute(self, table: Arc<Table>) -> impl Stream<Item = Result<SqlTuple, ExecutorError>> {
        try_stream! {
            for await row in self.row_manager.get_stream(&table) {
                let row = row?;
                yield row.user_data;
            }
        }
    }
}
