//! Is the result of the parse tree post validation
//! See here: https://www.postgresql.org/docs/current/querytree.html
use std::sync::Arc;

use super::{SqlTuple, Table};

#[derive(Clone, Debug, PartialEq)]
pub struct QueryTree {
    //the command type
    pub command_type: CommandType,
    //the relation every target resolves against
    pub range_table: Arc<Table>,
    //the target list
    pub targets: Vec<TargetEntry>,
    //group by keys, referencing the target list
    pub groupings: Vec<TargetRef>,
    //order by keys, referencing the target list
    pub sorts: Vec<(TargetRef, SortType)>,
    //row limit
    pub row_limit: Option<usize>,
    //rows feeding an insert, empty otherwise
    pub source: Vec<SqlTuple>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandType {
    Select,
    Insert,
    Utility,
}

/// A select list entry along with the name it reports in the output.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetEntry {
    pub name: String,
    pub expr: TargetExpression,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TargetExpression {
    /// A plain column of the range table, by attribute index.
    Column(usize),
    /// An aggregate over a column, or over whole rows when column is None.
    Aggregate {
        function: AggregateFunction,
        column: Option<usize>,
        distinct: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AggregateFunction {
    Count,
    Min,
    Max,
}

/// How a group by / order by key points at the target list. The analyzer
/// produces the raw Ordinal / Name forms straight off the parse tree, the
/// rewriter folds them all into Resolved indexes.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetRef {
    /// 1-based position as written in the query
    Ordinal(usize),
    /// An output column name
    Name(String),
    /// 0-based index into the target list
    Resolved(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortType {
    Ascending,
    Descending,
}
