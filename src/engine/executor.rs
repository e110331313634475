//! Walks a planned statement from the leaves up, every node evaluating as an
//! async stream of tuples.
use super::analyzer::{DefinitionLookup, DefinitionLookupError};
use super::io::{RowManager, RowManagerError};
use super::objects::types::parse_type;
use super::objects::types::BaseSqlTypes;
use super::objects::{ParseTree, Plan, PlannedStatement, SortType, SqlTuple, SqlTupleError};
use crate::constants::TableDefinitions;
use async_stream::try_stream;
use futures::stream::Stream;
use nom::combinator::all_consuming;
use nom::error::VerboseError;
use nom::Finish;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::num::TryFromIntError;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio_stream::StreamExt;
use uuid::Uuid;

mod accumulator;
pub use accumulator::Accumulator;

mod full_table_scan;
pub use full_table_scan::FullTableScan;

mod grouped_aggregate;
pub use grouped_aggregate::GroupedAggregate;

type TupleStream = Pin<Box<dyn Stream<Item = Result<SqlTuple, ExecutorError>> + Send>>;

#[derive(Clone, Debug)]
pub struct Executor {
    row_manager: RowManager,
}

impl Executor {
    pub fn new(row_manager: RowManager) -> Executor {
        Executor { row_manager }
    }

    pub fn execute(
        self,
        planned_stmt: PlannedStatement,
    ) -> impl Stream<Item = Result<SqlTuple, ExecutorError>> {
        self.execute_plan(Arc::new(planned_stmt.plan))
    }

    fn execute_plan(&self, plan: Arc<Plan>) -> TupleStream {
        match plan.as_ref() {
            Plan::FullTableScan(scan) => Box::pin(
                FullTableScan::new(self.row_manager.clone()).execute(scan.table.clone()),
            ),
            Plan::Projection(projection) => {
                let mut source = self.execute_plan(projection.source.clone());
                let columns = projection.columns.clone();
                Box::pin(try_stream! {
                    while let Some(row) = source.next().await {
                        let row = row?;
                        yield row.project(&columns)?;
                    }
                })
            }
            Plan::Aggregate(aggregate) => {
                let source = self.execute_plan(aggregate.source.clone());
                Box::pin(GroupedAggregate::new(aggregate).execute(source))
            }
            Plan::Sort(sort) => {
                let mut source = self.execute_plan(sort.source.clone());
                let keys = sort.keys.clone();
                Box::pin(try_stream! {
                    let mut rows = vec![];
                    while let Some(row) = source.next().await {
                        rows.push(row?);
                    }
                    rows.sort_by(|left, right| Executor::compare_rows(left, right, &keys));
                    for row in rows {
                        yield row;
                    }
                })
            }
            Plan::Limit(limit) => {
                let source = self.execute_plan(limit.source.clone());
                Box::pin(source.take(limit.count))
            }
            Plan::ModifyTable(modify) => {
                let mut source = self.execute_plan(modify.source.clone());
                let row_manager = self.row_manager.clone();
                let table = modify.table.clone();
                Box::pin(try_stream! {
                    while let Some(row) = source.next().await {
                        let row = row?;
                        row_manager.insert_row(&table, row.clone()).await?;
                        yield row;
                    }
                })
            }
            Plan::StaticData(rows) => {
                let rows = rows.clone();
                Box::pin(try_stream! {
                    for row in rows {
                        yield row;
                    }
                })
            }
        }
    }

    /// Compares on the keys in priority order, falling back to whole tuple
    /// order so equal keys still come out deterministically.
    fn compare_rows(left: &SqlTuple, right: &SqlTuple, keys: &[(usize, SortType)]) -> Ordering {
        for (column, direction) in keys {
            let ordering = match (left.0.get(*column), right.0.get(*column)) {
                (Some(l), Some(r)) => l.cmp(r),
                (_, _) => Ordering::Equal,
            };
            let ordering = match direction {
                SortType::Ascending => ordering,
                SortType::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        left.cmp(right)
    }

    //Bypasses planning since there isn't anything to optimize
    pub async fn execute_utility(
        &self,
        parse_tree: ParseTree,
    ) -> Result<Vec<SqlTuple>, ExecutorError> {
        let create_table = match parse_tree {
            ParseTree::CreateTable(t) => t,
            _ => return Err(ExecutorError::NotUtility()),
        };

        let dl = DefinitionLookup::new(self.row_manager.clone());
        match dl.get_definition(&create_table.table_name).await {
            Ok(_) => {
                return Err(ExecutorError::TableAlreadyExists(
                    create_table.table_name,
                ))
            }
            Err(DefinitionLookupError::TableDoesNotExist(_)) => {}
            Err(e) => return Err(ExecutorError::DefinitionLookupError(e)),
        }

        //Validate every type before any catalog row lands
        let mut columns = Vec::with_capacity(create_table.provided_columns.len());
        for c in &create_table.provided_columns {
            let type_name = c.sql_type.to_lowercase();
            let parsed = all_consuming(parse_type::<VerboseError<&str>>)(&type_name).finish();
            match parsed {
                Ok((_, sql_type)) => columns.push((c.name.clone(), sql_type, c.null)),
                Err(_) => return Err(ExecutorError::UnknownSqlType(c.sql_type.clone())),
            }
        }

        let table_id = Uuid::new_v4();
        let hb_class = TableDefinitions::HbClass.value();
        let table_row = SqlTuple(vec![
            Some(BaseSqlTypes::Uuid(table_id)),
            Some(BaseSqlTypes::Text(create_table.table_name.clone())),
        ]);

        self.row_manager.insert_row(&hb_class, table_row).await?;

        let hb_attribute = TableDefinitions::HbAttribute.value();
        for (i, (name, sql_type, null)) in columns.into_iter().enumerate() {
            let i_u32 = u32::try_from(i).map_err(ExecutorError::ConversionError)?;
            let column_row = SqlTuple(vec![
                Some(BaseSqlTypes::Uuid(table_id)),
                Some(BaseSqlTypes::Text(name)),
                Some(BaseSqlTypes::Text(sql_type.to_string())),
                Some(BaseSqlTypes::Integer(i_u32)),
                Some(BaseSqlTypes::Bool(!null)),
            ]);
            self.row_manager
                .insert_row(&hb_attribute, column_row)
                .await?;
        }

        debug!(
            "Created table {} with id {}",
            create_table.table_name, table_id
        );

        Ok(vec![])
    }
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Not a utility statement")]
    NotUtility(),
    #[error("Table {0} already exists")]
    TableAlreadyExists(String),
    #[error("Unknown SQL type {0}")]
    UnknownSqlType(String),
    #[error(transparent)]
    DefinitionLookupError(#[from] DefinitionLookupError),
    #[error(transparent)]
    RowManagerError(#[from] RowManagerError),
    #[error(transparent)]
    SqlTupleError(#[from] SqlTupleError),
    #[error("Unable to convert usize to u32")]
    ConversionError(#[from] TryFromIntError),
    #[error("Group key {0} does not reference a plain column")]
    GroupKeyNotAColumn(usize),
    #[error("Column {0} is not part of the group key")]
    UngroupedColumn(String),
    #[error("Ran out of accumulators for the select list")]
    AccumulatorMismatch(),
}
