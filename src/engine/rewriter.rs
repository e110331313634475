//! The rewriter folds group by / order by keys onto the select list, so the
//! planner only ever sees resolved target indexes. Keys arrive as 1-based
//! ordinals or output column names, either way they have to land on a select
//! list entry.
use super::objects::{QueryTree, TargetEntry, TargetRef};
use std::mem;
use thiserror::Error;

pub struct Rewriter {}

impl Rewriter {
    pub fn rewrite(mut query_tree: QueryTree) -> Result<QueryTree, RewriterError> {
        let raw_groupings = mem::take(&mut query_tree.groupings);
        query_tree.groupings = raw_groupings
            .into_iter()
            .map(|key| Self::resolve(&query_tree.targets, key))
            .collect::<Result<Vec<_>, _>>()?;

        let raw_sorts = mem::take(&mut query_tree.sorts);
        query_tree.sorts = raw_sorts
            .into_iter()
            .map(|(key, direction)| Ok((Self::resolve(&query_tree.targets, key)?, direction)))
            .collect::<Result<Vec<_>, RewriterError>>()?;

        Ok(query_tree)
    }

    fn resolve(targets: &[TargetEntry], key: TargetRef) -> Result<TargetRef, RewriterError> {
        match key {
            TargetRef::Ordinal(o) => {
                if o == 0 || o > targets.len() {
                    return Err(RewriterError::OrdinalOutOfRange(o, targets.len()));
                }
                Ok(TargetRef::Resolved(o - 1))
            }
            TargetRef::Name(n) => {
                for (i, target) in targets.iter().enumerate() {
                    if target.name == n {
                        return Ok(TargetRef::Resolved(i));
                    }
                }
                Err(RewriterError::UnknownKey(n))
            }
            TargetRef::Resolved(r) => Ok(TargetRef::Resolved(r)),
        }
    }
}

#[derive(Debug, Error)]
pub enum RewriterError {
    #[error("Ordinal {0} is out of range for a select list of {1}")]
    OrdinalOutOfRange(usize, usize),
    #[error("Key {0} does not name a select list entry")]
    UnknownKey(String),
}
