//! The analyzer checks that tables and columns exist before allowing a query
//! to proceed, and resolves every name in the parse tree onto the table
//! definition.
mod definition_lookup;
pub use definition_lookup::DefinitionLookup;
pub use definition_lookup::DefinitionLookupError;

use super::io::RowManager;
use super::objects::types::{BaseSqlTypes, BaseSqlTypesError};
use super::objects::{
    AggregateFunction, CommandType, ParseExpression, ParseTree, QueryTree, RawAggregate,
    RawInsertCommand, RawKey, RawSelectCommand, RawSelectItem, SqlTuple, TableError, TargetEntry,
    TargetExpression, TargetRef,
};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct Analyzer {
    dl: DefinitionLookup,
}

impl Analyzer {
    pub fn new(row_manager: RowManager) -> Analyzer {
        Analyzer {
            dl: DefinitionLookup::new(row_manager),
        }
    }

    pub async fn analyze(&self, parse_tree: ParseTree) -> Result<QueryTree, AnalyzerError> {
        match parse_tree {
            ParseTree::Select(s) => self.analyze_select(s).await,
            ParseTree::Insert(i) => self.analyze_insert(i).await,
            ParseTree::CreateTable(_) => Err(AnalyzerError::UtilityStatement()),
        }
    }

    async fn analyze_select(&self, select: RawSelectCommand) -> Result<QueryTree, AnalyzerError> {
        let table = self.dl.get_definition(&select.table).await?;

        let mut targets = Vec::with_capacity(select.items.len());
        for item in select.items {
            match item {
                RawSelectItem::Column(name) => {
                    let index = table.get_column_index(&name)?;
                    targets.push(TargetEntry {
                        name: table.attributes[index].name.clone(),
                        expr: TargetExpression::Column(index),
                    });
                }
                RawSelectItem::Aggregate(agg) => {
                    let column = match &agg.column {
                        Some(c) => Some(table.get_column_index(c)?),
                        None => None,
                    };
                    if column.is_none() && agg.function != AggregateFunction::Count {
                        return Err(AnalyzerError::AggregateNeedsColumn(Self::function_name(
                            agg.function,
                        )));
                    }
                    targets.push(TargetEntry {
                        name: Self::render_aggregate_name(&agg),
                        expr: TargetExpression::Aggregate {
                            function: agg.function,
                            column,
                            distinct: agg.distinct,
                        },
                    });
                }
            }
        }

        let groupings = select.grouping.into_iter().map(Self::key_to_ref).collect();
        let sorts = select
            .ordering
            .into_iter()
            .map(|(key, direction)| (Self::key_to_ref(key), direction))
            .collect();

        Ok(QueryTree {
            command_type: CommandType::Select,
            range_table: table,
            targets,
            groupings,
            sorts,
            row_limit: select.row_limit,
            source: vec![],
        })
    }

    async fn analyze_insert(&self, insert: RawInsertCommand) -> Result<QueryTree, AnalyzerError> {
        let table = self.dl.get_definition(&insert.table_name).await?;

        let provided: Vec<usize> = match &insert.provided_columns {
            Some(columns) => {
                let mut seen = HashSet::new();
                let mut indexes = Vec::with_capacity(columns.len());
                for c in columns {
                    let index = table.get_column_index(c)?;
                    if !seen.insert(index) {
                        return Err(AnalyzerError::DuplicateColumn(c.clone()));
                    }
                    indexes.push(index);
                }
                indexes
            }
            None => (0..table.attributes.len()).collect(),
        };

        if provided.len() != insert.provided_values.len() {
            return Err(AnalyzerError::ColumnCountMismatch(
                provided.len(),
                insert.provided_values.len(),
            ));
        }

        let mut row: Vec<Option<BaseSqlTypes>> = vec![None; table.attributes.len()];
        for (attr_index, value) in provided.iter().zip(insert.provided_values.iter()) {
            match value {
                ParseExpression::Null() => row[*attr_index] = None,
                ParseExpression::String(s) => {
                    row[*attr_index] = Some(BaseSqlTypes::parse(
                        table.attributes[*attr_index].sql_type,
                        s,
                    )?)
                }
            }
        }

        Ok(QueryTree {
            command_type: CommandType::Insert,
            range_table: table,
            targets: vec![],
            groupings: vec![],
            sorts: vec![],
            row_limit: None,
            source: vec![SqlTuple(row)],
        })
    }

    fn key_to_ref(key: RawKey) -> TargetRef {
        match key {
            RawKey::Ordinal(o) => TargetRef::Ordinal(o),
            RawKey::Name(n) => TargetRef::Name(n),
        }
    }

    fn render_aggregate_name(agg: &RawAggregate) -> String {
        let function = Self::function_name(agg.function);
        match (&agg.column, agg.distinct) {
            (None, _) => format!("{}(*)", function),
            (Some(c), true) => format!("{}(distinct {})", function, c),
            (Some(c), false) => format!("{}({})", function, c),
        }
    }

    fn function_name(function: AggregateFunction) -> &'static str {
        match function {
            AggregateFunction::Count => "count",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    DefinitionLookupError(#[from] DefinitionLookupError),
    #[error(transparent)]
    TableError(#[from] TableError),
    #[error(transparent)]
    BaseSqlTypesError(#[from] BaseSqlTypesError),
    #[error("Provided {0} columns but {1} values")]
    ColumnCountMismatch(usize, usize),
    #[error("Column {0} named more than once")]
    DuplicateColumn(String),
    #[error("{0} requires a column argument")]
    AggregateNeedsColumn(&'static str),
    #[error("Utility statements skip analysis")]
    UtilityStatement(),
}
