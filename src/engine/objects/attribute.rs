use crate::constants::Nullable;

use super::types::BaseSqlTypesMapper;

/// A single column of a table definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub sql_type: BaseSqlTypesMapper,
    pub nullable: Nullable,
}

impl Attribute {
    pub fn new(name: String, sql_type: BaseSqlTypesMapper, nullable: Nullable) -> Attribute {
        Attribute {
            name,
            sql_type,
            nullable,
        }
    }
}
