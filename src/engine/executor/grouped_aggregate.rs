//! Hash / tree based aggregation over an input stream. Group keys map to one
//! accumulator per aggregate target, distinct counting holds a value set per
//! accumulator. A BTreeMap keeps ungoverned output order deterministic.
use super::super::objects::types::BaseSqlTypes;
use super::super::objects::{AggregatePlan, SqlTuple, TargetEntry, TargetExpression};
use super::{Accumulator, ExecutorError};
use async_stream::try_stream;
use futures::pin_mut;
use futures::stream::Stream;
use std::collections::BTreeMap;
use tokio_stream::StreamExt;

pub struct GroupedAggregate {
    targets: Vec<TargetEntry>,
    /// Indexes into targets naming the group keys
    groupings: Vec<usize>,
}

impl GroupedAggregate {
    pub fn new(plan: &AggregatePlan) -> GroupedAggregate {
        GroupedAggregate {
            targets: plan.targets.clone(),
            groupings: plan.groupings.clone(),
        }
    }

    pub fn execute<S>(self, input: S) -> impl Stream<Item = Result<SqlTuple, ExecutorError>>
    where
        S: Stream<Item = Result<SqlTuple, ExecutorError>>,
    {
        //Attribute indexes feeding the group key, in grouping order
        let group_columns: Result<Vec<usize>, ExecutorError> = self
            .groupings
            .iter()
            .map(|g| match self.targets.get(*g).map(|t| &t.expr) {
                Some(TargetExpression::Column(c)) => Ok(*c),
                _ => Err(ExecutorError::GroupKeyNotAColumn(*g)),
            })
            .collect();

        try_stream! {
            let group_columns = group_columns?;

            pin_mut!(input);

            if self.groupings.is_empty() {
                let mut accumulators = Self::build_accumulators(&self.targets);
                while let Some(row) = input.next().await {
                    let row = row?;
                    Self::update_accumulators(&self.targets, &mut accumulators, &row);
                }

                //An ungrouped aggregate always produces exactly one row
                yield Self::output_row(
                    &self.targets,
                    &self.groupings,
                    SqlTuple(vec![]),
                    accumulators,
                )?;
            } else {
                let mut groups: BTreeMap<SqlTuple, Vec<Accumulator>> = BTreeMap::new();
                while let Some(row) = input.next().await {
                    let row = row?;
                    let key = row.project(&group_columns)?;
                    let accumulators = groups
                        .entry(key)
                        .or_insert_with(|| Self::build_accumulators(&self.targets));
                    Self::update_accumulators(&self.targets, accumulators, &row);
                }

                for (key, accumulators) in groups {
                    yield Self::output_row(&self.targets, &self.groupings, key, accumulators)?;
                }
            }
        }
    }

    fn build_accumulators(targets: &[TargetEntry]) -> Vec<Accumulator> {
        targets
            .iter()
            .filter_map(|t| match &t.expr {
                TargetExpression::Aggregate {
                    function,
                    column,
                    distinct,
                } => Some(Accumulator::new(*function, column.is_none(), *distinct)),
                TargetExpression::Column(_) => None,
            })
            .collect()
    }

    fn update_accumulators(
        targets: &[TargetEntry],
        accumulators: &mut [Accumulator],
        row: &SqlTuple,
    ) {
        let mut accumulator_iter = accumulators.iter_mut();
        for target in targets {
            if let TargetExpression::Aggregate { column, .. } = &target.expr {
                if let Some(accumulator) = accumulator_iter.next() {
                    let value = match column {
                        Some(c) => row.0.get(*c).and_then(|v| v.as_ref()),
                        None => None,
                    };
                    accumulator.update(value);
                }
            }
        }
    }

    fn output_row(
        targets: &[TargetEntry],
        groupings: &[usize],
        key: SqlTuple,
        accumulators: Vec<Accumulator>,
    ) -> Result<SqlTuple, ExecutorError> {
        let mut output: Vec<Option<BaseSqlTypes>> = Vec::with_capacity(targets.len());
        let mut finished = accumulators.into_iter();

        for (i, target) in targets.iter().enumerate() {
            match &target.expr {
                TargetExpression::Column(_) => {
                    let position = groupings
                        .iter()
                        .position(|g| *g == i)
                        .ok_or_else(|| ExecutorError::UngroupedColumn(target.name.clone()))?;
                    output.push(key.0[position].clone());
                }
                TargetExpression::Aggregate { .. } => {
                    let accumulator = finished
                        .next()
                        .ok_or_else(ExecutorError::AccumulatorMismatch)?;
                    output.push(accumulator.finish()?);
                }
            }
        }

        Ok(SqlTuple(output))
    }
}
