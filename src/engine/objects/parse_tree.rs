use super::query_tree::{AggregateFunction, SortType};

#[derive(Clone, Debug, PartialEq)]
pub enum ParseTree {
    CreateTable(RawCreateTableCommand),
    Insert(RawInsertCommand),
    Select(RawSelectCommand),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawCreateTableCommand {
    pub table_name: String,
    pub provided_columns: Vec<RawColumn>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub sql_type: String,
    pub null: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawInsertCommand {
    pub table_name: String,
    pub provided_columns: Option<Vec<String>>,
    pub provided_values: Vec<ParseExpression>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseExpression {
    String(String),
    Null(),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawSelectCommand {
    pub table: String,
    pub items: Vec<RawSelectItem>,
    pub grouping: Vec<RawKey>,
    pub ordering: Vec<(RawKey, SortType)>,
    pub row_limit: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RawSelectItem {
    Column(String),
    Aggregate(RawAggregate),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawAggregate {
    pub function: AggregateFunction,
    /// None is count(*)
    pub column: Option<String>,
    pub distinct: bool,
}

/// A group by / order by key as written: a 1-based ordinal into the select
/// list or an output column name.
#[derive(Clone, Debug, PartialEq)]
pub enum RawKey {
    Ordinal(usize),
    Name(String),
}
