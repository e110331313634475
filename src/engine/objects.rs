mod attribute;
pub use attribute::Attribute;

mod parse_tree;
pub use parse_tree::ParseExpression;
pub use parse_tree::ParseTree;
pub use parse_tree::RawAggregate;
pub use parse_tree::RawColumn;
pub use parse_tree::RawCreateTableCommand;
pub use parse_tree::RawInsertCommand;
pub use parse_tree::RawKey;
pub use parse_tree::RawSelectCommand;
pub use parse_tree::RawSelectItem;

mod planned_statement;
pub use planned_statement::AggregatePlan;
pub use planned_statement::FullTableScanPlan;
pub use planned_statement::LimitPlan;
pub use planned_statement::ModifyTablePlan;
pub use planned_statement::Plan;
pub use planned_statement::PlannedCommon;
pub use planned_statement::PlannedStatement;
pub use planned_statement::ProjectionPlan;
pub use planned_statement::SortPlan;

mod query_result;
pub use query_result::QueryResult;

mod query_tree;
pub use query_tree::AggregateFunction;
pub use query_tree::CommandType;
pub use query_tree::QueryTree;
pub use query_tree::SortType;
pub use query_tree::TargetEntry;
pub use query_tree::TargetExpression;
pub use query_tree::TargetRef;

mod sql_tuple;
pub use sql_tuple::SqlTuple;
pub use sql_tuple::SqlTupleError;

mod table;
pub use table::Table;
pub use table::TableError;

pub mod types;
