//! The embeddable handle: owns the store and the engine, bootstraps the
//! built-in hits table and fronts queries and bulk loading.
use crate::constants::TableDefinitions;
use crate::engine::io::{RowManager, StoreManager};
use crate::engine::objects::QueryResult;
use crate::engine::{Engine, EngineError};
use crate::load::{load_tsv, LoadError};
use std::path::Path;
use thiserror::Error;

pub struct HitBench {
    engine: Engine,
    row_manager: RowManager,
}

impl HitBench {
    pub fn new() -> HitBench {
        let store_manager = StoreManager::new();
        let row_manager = RowManager::new(store_manager.clone());
        let engine = Engine::new(store_manager);

        HitBench {
            engine,
            row_manager,
        }
    }

    pub async fn process_query(&mut self, query: String) -> Result<QueryResult, HitBenchError> {
        Ok(self.engine.process_query(query).await?)
    }

    /// Bulk loads a tab separated file into the hits table, returning how
    /// many rows landed.
    pub async fn load_tsv(&mut self, path: impl AsRef<Path>) -> Result<usize, HitBenchError> {
        let hits = TableDefinitions::Hits.value();
        let loaded = load_tsv(&self.row_manager, &hits, path.as_ref()).await?;

        //The loader writes underneath the SQL layer
        self.engine.invalidate_results();

        info!("Loaded {} rows into {}", loaded, hits.name);
        Ok(loaded)
    }
}

impl Default for HitBench {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum HitBenchError {
    #[error(transparent)]
    EngineError(#[from] EngineError),
    #[error(transparent)]
    LoadError(#[from] LoadError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::objects::types::BaseSqlTypes;
    use crate::engine::objects::SqlTuple;

    #[tokio::test]
    async fn query_through_the_handle() -> Result<(), Box<dyn std::error::Error>> {
        let mut bench = HitBench::new();

        let result = bench
            .process_query("select count(*) from hits".to_string())
            .await?;

        assert_eq!(
            result.rows,
            vec![SqlTuple(vec![Some(BaseSqlTypes::Integer(0))])]
        );

        Ok(())
    }
}
