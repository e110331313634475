use super::Attribute;
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Table {
    pub fn new(id: Uuid, name: String, attributes: Vec<Attribute>) -> Table {
        Table {
            id,
            name,
            attributes,
        }
    }

    pub fn get_column_index(&self, name: &str) -> Result<usize, TableError> {
        for i in 0..self.attributes.len() {
            if self.attributes[i].name == name {
                return Ok(i);
            }
        }

        Err(TableError::ColumnDoesNotExist(name.to_string()))
    }
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column named {0} does not exist")]
    ColumnDoesNotExist(String),
}
