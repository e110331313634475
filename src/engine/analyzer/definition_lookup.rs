//! This command will look up ONLY hardcoded table definitions first,
//! falling back to reading runtime created ones out of the catalog tables.

use super::super::super::constants::TableDefinitions;
use super::super::io::{RowManager, RowManagerError};
use super::super::objects::types::{parse_type, BaseSqlTypes, BaseSqlTypesMapper};
use super::super::objects::{Attribute, Table};
use crate::constants::Nullable;
use nom::error::VerboseError;
use nom::Finish;
use std::sync::Arc;
use thiserror::Error;
use tokio::pin;
use tokio_stream::StreamExt;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct DefinitionLookup {
    row_manager: RowManager,
}

impl DefinitionLookup {
    pub fn new(row_manager: RowManager) -> DefinitionLookup {
        DefinitionLookup { row_manager }
    }

    pub async fn get_definition(&self, name: &str) -> Result<Arc<Table>, DefinitionLookupError> {
        //Built in tables always load
        let system_tables = TableDefinitions::VALUES;
        for i in &system_tables {
            if i.value().name == name {
                return Ok(i.value());
            }
        }

        //Now we have to search the catalog
        let table_id = self.find_class_entry(name).await?;
        let attributes = self.find_attributes(table_id).await?;

        debug!("Found {} in the catalog with {} columns", name, attributes.len());

        Ok(Arc::new(Table::new(
            table_id,
            name.to_string(),
            attributes,
        )))
    }

    async fn find_class_entry(&self, name: &str) -> Result<Uuid, DefinitionLookupError> {
        let hb_class = TableDefinitions::HbClass.value();
        let row_stream = self.row_manager.get_stream(&hb_class);
        pin!(row_stream);
        while let Some(row) = row_stream.next().await {
            let row = row?;
            match (&row.user_data.0[0], &row.user_data.0[1]) {
                (Some(BaseSqlTypes::Uuid(id)), Some(BaseSqlTypes::Text(class_name))) => {
                    if class_name == name {
                        return Ok(*id);
                    }
                }
                _ => return Err(DefinitionLookupError::CorruptCatalog(hb_class.name.clone())),
            }
        }

        Err(DefinitionLookupError::TableDoesNotExist(name.to_string()))
    }

    async fn find_attributes(
        &self,
        table_id: Uuid,
    ) -> Result<Vec<Attribute>, DefinitionLookupError> {
        let hb_attribute = TableDefinitions::HbAttribute.value();
        let mut found = vec![];

        let row_stream = self.row_manager.get_stream(&hb_attribute);
        pin!(row_stream);
        while let Some(row) = row_stream.next().await {
            let row = row?;
            match (
                &row.user_data.0[0],
                &row.user_data.0[1],
                &row.user_data.0[2],
                &row.user_data.0[3],
                &row.user_data.0[4],
            ) {
                (
                    Some(BaseSqlTypes::Uuid(rel_id)),
                    Some(BaseSqlTypes::Text(att_name)),
                    Some(BaseSqlTypes::Text(att_type)),
                    Some(BaseSqlTypes::Integer(att_num)),
                    Some(BaseSqlTypes::Bool(att_not_null)),
                ) => {
                    if *rel_id != table_id {
                        continue;
                    }
                    let sql_type = Self::parse_type_name(att_type)?;
                    let nullable = Nullable::from(!*att_not_null);
                    found.push((
                        *att_num,
                        Attribute::new(att_name.clone(), sql_type, nullable),
                    ));
                }
                _ => {
                    return Err(DefinitionLookupError::CorruptCatalog(
                        hb_attribute.name.clone(),
                    ))
                }
            }
        }

        if found.is_empty() {
            return Err(DefinitionLookupError::NoColumnsFound(table_id));
        }

        found.sort_by_key(|(num, _)| *num);
        Ok(found.into_iter().map(|(_, a)| a).collect())
    }

    fn parse_type_name(name: &str) -> Result<BaseSqlTypesMapper, DefinitionLookupError> {
        match parse_type::<VerboseError<&str>>(name).finish() {
            Ok((_, sql_type)) => Ok(sql_type),
            Err(_) => Err(DefinitionLookupError::UnknownType(name.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum DefinitionLookupError {
    #[error("{0} is not a valid table")]
    TableDoesNotExist(String),
    #[error("Catalog table {0} holds a malformed row")]
    CorruptCatalog(String),
    #[error("No columns found for table {0}")]
    NoColumnsFound(Uuid),
    #[error("Unknown type {0} in the catalog")]
    UnknownType(String),
    #[error(transparent)]
    RowManagerError(#[from] RowManagerError),
}
