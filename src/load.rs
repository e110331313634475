//! Bulk loader for tab separated hit exports. Fields map one to one onto the
//! table definition, \N marks null. Every row goes through the normal row
//! manager path so the usual arity / type / nullability checks apply.
use crate::engine::io::{RowManager, RowManagerError};
use crate::engine::objects::types::BaseSqlTypes;
use crate::engine::objects::{SqlTuple, Table};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

const NULL_FIELD: &str = "\\N";

pub async fn load_tsv(
    row_manager: &RowManager,
    table: &Arc<Table>,
    path: &Path,
) -> Result<usize, LoadError> {
    let file = File::open(path).await?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let mut line_number = 0;
    let mut loaded = 0;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != table.attributes.len() {
            return Err(LoadError::ColumnCountMismatch(
                line_number,
                fields.len(),
                table.attributes.len(),
            ));
        }

        let mut row = Vec::with_capacity(fields.len());
        for (field, attribute) in fields.iter().zip(table.attributes.iter()) {
            if *field == NULL_FIELD {
                row.push(None);
            } else {
                let value = BaseSqlTypes::parse(attribute.sql_type, field).map_err(|e| {
                    LoadError::BadField(line_number, attribute.name.clone(), e.to_string())
                })?;
                row.push(Some(value));
            }
        }

        row_manager
            .insert_row(table, SqlTuple(row))
            .await
            .map_err(|e| LoadError::BadRow(line_number, e))?;
        loaded += 1;

        if loaded % 100_000 == 0 {
            debug!("Loaded {} rows so far", loaded);
        }
    }

    Ok(loaded)
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Line {0} has {1} fields, the table needs {2}")]
    ColumnCountMismatch(usize, usize, usize),
    #[error("Line {0} column {1} failed to parse: {2}")]
    BadField(usize, String, String),
    #[error("Line {0} was rejected: {1}")]
    BadRow(usize, RowManagerError),
}
