//! Aggregate state for a single select list entry within one group.
use super::super::objects::types::BaseSqlTypes;
use super::super::objects::AggregateFunction;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::num::TryFromIntError;

#[derive(Clone, Debug)]
pub enum Accumulator {
    /// count(*), counts every row
    CountRows(u64),
    /// count(col), counts non null values
    Count(u64),
    /// count(distinct col), the set holds every non null value seen
    CountDistinct(HashSet<BaseSqlTypes>),
    Min(Option<BaseSqlTypes>),
    Max(Option<BaseSqlTypes>),
}

impl Accumulator {
    pub fn new(function: AggregateFunction, whole_rows: bool, distinct: bool) -> Accumulator {
        match (function, whole_rows, distinct) {
            (AggregateFunction::Count, true, _) => Accumulator::CountRows(0),
            (AggregateFunction::Count, false, true) => Accumulator::CountDistinct(HashSet::new()),
            (AggregateFunction::Count, false, false) => Accumulator::Count(0),
            //distinct makes no difference to min / max
            (AggregateFunction::Min, _, _) => Accumulator::Min(None),
            (AggregateFunction::Max, _, _) => Accumulator::Max(None),
        }
    }

    pub fn update(&mut self, value: Option<&BaseSqlTypes>) {
        match self {
            Accumulator::CountRows(count) => *count += 1,
            Accumulator::Count(count) => {
                if value.is_some() {
                    *count += 1;
                }
            }
            Accumulator::CountDistinct(seen) => {
                if let Some(v) = value {
                    if !seen.contains(v) {
                        seen.insert(v.clone());
                    }
                }
            }
            Accumulator::Min(current) => {
                if let Some(v) = value {
                    match current {
                        Some(c) => {
                            if v < c {
                                *current = Some(v.clone());
                            }
                        }
                        None => *current = Some(v.clone()),
                    }
                }
            }
            Accumulator::Max(current) => {
                if let Some(v) = value {
                    match current {
                        Some(c) => {
                            if v > c {
                                *current = Some(v.clone());
                            }
                        }
                        None => *current = Some(v.clone()),
                    }
                }
            }
        }
    }

    /// Produces the final value. Counts come back as integers, min / max
    /// come back as whatever was fed in, or null over an empty input.
    pub fn finish(self) -> Result<Option<BaseSqlTypes>, TryFromIntError> {
        match self {
            Accumulator::CountRows(count) | Accumulator::Count(count) => {
                Ok(Some(BaseSqlTypes::Integer(u32::try_from(count)?)))
            }
            Accumulator::CountDistinct(seen) => {
                Ok(Some(BaseSqlTypes::Integer(u32::try_from(seen.len())?)))
            }
            Accumulator::Min(current) => Ok(current),
            Accumulator::Max(current) => Ok(current),
        }
    }
}
