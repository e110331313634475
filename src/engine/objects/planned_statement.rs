use std::sync::Arc;

use super::query_tree::{SortType, TargetEntry};
use super::{SqlTuple, Table};

pub struct PlannedStatement {
    pub common: PlannedCommon,
    pub plan: Plan,
}

pub struct PlannedCommon {}

pub enum Plan {
    FullTableScan(FullTableScanPlan),
    Projection(ProjectionPlan),
    Aggregate(AggregatePlan),
    Sort(SortPlan),
    Limit(LimitPlan),
    ModifyTable(ModifyTablePlan),
    StaticData(Vec<SqlTuple>),
}

pub struct FullTableScanPlan {
    pub table: Arc<Table>,
}

pub struct ProjectionPlan {
    pub source: Arc<Plan>,
    /// Attribute indexes of the source table, in output order
    pub columns: Vec<usize>,
}

pub struct AggregatePlan {
    pub source: Arc<Plan>,
    /// The full target list, plain columns and aggregates interleaved
    pub targets: Vec<TargetEntry>,
    /// Indexes into targets naming the group keys; empty for a plain
    /// aggregation over the whole input
    pub groupings: Vec<usize>,
}

pub struct SortPlan {
    pub source: Arc<Plan>,
    /// Output column index and direction, in priority order
    pub keys: Vec<(usize, SortType)>,
}

pub struct LimitPlan {
    pub source: Arc<Plan>,
    pub count: usize,
}

pub struct ModifyTablePlan {
    pub table: Arc<Table>,
    pub source: Arc<Plan>,
}
