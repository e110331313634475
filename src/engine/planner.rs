//! The planner takes a rewritten query and makes it into a tree of plan nodes
//! that can be executed from the leaves up. The shape is fixed: a table scan
//! feeding either a projection or an aggregation, optionally wrapped by a
//! sort and a limit.
use super::objects::{
    AggregatePlan, CommandType, FullTableScanPlan, LimitPlan, ModifyTablePlan, Plan,
    PlannedCommon, PlannedStatement, ProjectionPlan, QueryTree, SortPlan, SortType,
    TargetExpression, TargetRef,
};
use std::sync::Arc;
use thiserror::Error;

pub struct Planner {}

impl Planner {
    pub fn plan(query_tree: QueryTree) -> Result<PlannedStatement, PlannerError> {
        match query_tree.command_type {
            CommandType::Insert => Planner::plan_insert(query_tree),
            CommandType::Select => Planner::plan_select(query_tree),
            CommandType::Utility => Err(PlannerError::NotImplemented()),
        }
    }

    fn plan_insert(query_tree: QueryTree) -> Result<PlannedStatement, PlannerError> {
        Ok(PlannedStatement {
            common: PlannedCommon {},
            plan: Plan::ModifyTable(ModifyTablePlan {
                table: query_tree.range_table,
                source: Arc::new(Plan::StaticData(query_tree.source)),
            }),
        })
    }

    fn plan_select(query_tree: QueryTree) -> Result<PlannedStatement, PlannerError> {
        let scan = Plan::FullTableScan(FullTableScanPlan {
            table: query_tree.range_table.clone(),
        });

        let has_aggregate = query_tree
            .targets
            .iter()
            .any(|t| matches!(t.expr, TargetExpression::Aggregate { .. }));

        let mut plan = if has_aggregate || !query_tree.groupings.is_empty() {
            let groupings = Self::resolved_keys(&query_tree.groupings)?;

            //Every plain column has to be a group key or the output is undefined
            for (i, target) in query_tree.targets.iter().enumerate() {
                if matches!(target.expr, TargetExpression::Column(_)) && !groupings.contains(&i) {
                    return Err(PlannerError::UngroupedColumn(target.name.clone()));
                }
            }

            Plan::Aggregate(AggregatePlan {
                source: Arc::new(scan),
                targets: query_tree.targets.clone(),
                groupings,
            })
        } else {
            let columns = query_tree
                .targets
                .iter()
                .map(|t| match t.expr {
                    TargetExpression::Column(c) => Ok(c),
                    _ => Err(PlannerError::NotImplemented()),
                })
                .collect::<Result<Vec<_>, _>>()?;

            Plan::Projection(ProjectionPlan {
                source: Arc::new(scan),
                columns,
            })
        };

        if !query_tree.sorts.is_empty() {
            let mut keys: Vec<(usize, SortType)> = Vec::with_capacity(query_tree.sorts.len());
            for (key, direction) in &query_tree.sorts {
                keys.push((Self::resolved(key)?, *direction));
            }
            plan = Plan::Sort(SortPlan {
                source: Arc::new(plan),
                keys,
            });
        }

        if let Some(count) = query_tree.row_limit {
            plan = Plan::Limit(LimitPlan {
                source: Arc::new(plan),
                count,
            });
        }

        Ok(PlannedStatement {
            common: PlannedCommon {},
            plan,
        })
    }

    fn resolved_keys(keys: &[TargetRef]) -> Result<Vec<usize>, PlannerError> {
        keys.iter().map(Self::resolved).collect()
    }

    fn resolved(key: &TargetRef) -> Result<usize, PlannerError> {
        match key {
            TargetRef::Resolved(i) => Ok(*i),
            _ => Err(PlannerError::UnresolvedKey()),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Column {0} must appear in the group by clause")]
    UngroupedColumn(String),
    #[error("Plan requested over unresolved keys, the rewriter has to run first")]
    UnresolvedKey(),
    #[error("Not Implemented")]
    NotImplemented(),
}
