//! This defines the built-in tables so we can bootstrap the engine.
//!
//! `hits` is the workload table, always present. `hb_class` and `hb_attribute`
//! hold the definitions of tables created at runtime.

use super::super::engine::objects::{Attribute, Table};
use crate::constants::Nullable;
use crate::engine::objects::types::BaseSqlTypesMapper;
use hex_literal::hex;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Copy, Clone)]
pub enum TableDefinitions {
    Hits,
    HbClass,     //Tables
    HbAttribute, //Columns
}

impl TableDefinitions {
    pub const VALUES: [TableDefinitions; 3] = [
        TableDefinitions::Hits,
        TableDefinitions::HbClass,
        TableDefinitions::HbAttribute,
    ];
    pub fn value(self) -> Arc<Table> {
        match self {
            TableDefinitions::Hits => Arc::new(Table::new(
                Uuid::from_bytes(hex!("F87EB53193C1477BB74B2E1A53EBDF07")),
                "hits".to_string(),
                vec![
                    Attribute::new(
                        "CounterID".to_string(),
                        BaseSqlTypesMapper::Integer,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "SearchPhrase".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::Null,
                    ),
                    Attribute::new(
                        "IsMobile".to_string(),
                        BaseSqlTypesMapper::Bool,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "MobilePhone".to_string(),
                        BaseSqlTypesMapper::Integer,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "MobilePhoneModel".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::Null,
                    ),
                    Attribute::new(
                        "HitColor".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "BrowserCountry".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "BrowserLanguage".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::NotNull,
                    ),
                ],
            )),
            TableDefinitions::HbClass => Arc::new(Table::new(
                Uuid::from_bytes(hex!("1A712E4897D54F549F5C023AF8B53A2C")),
                "hb_class".to_string(),
                vec![
                    Attribute::new(
                        "id".to_string(),
                        BaseSqlTypesMapper::Uuid,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "name".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::NotNull,
                    ),
                ],
            )),
            TableDefinitions::HbAttribute => Arc::new(Table::new(
                Uuid::from_bytes(hex!("6E0F2D1CB1A9480DB6B2BC4B14DF2E1B")),
                "hb_attribute".to_string(),
                vec![
                    Attribute::new(
                        "attrelid".to_string(),
                        BaseSqlTypesMapper::Uuid,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "attname".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "atttype".to_string(),
                        BaseSqlTypesMapper::Text,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "attnum".to_string(),
                        BaseSqlTypesMapper::Integer,
                        Nullable::NotNull,
                    ),
                    Attribute::new(
                        "attnotnull".to_string(),
                        BaseSqlTypesMapper::Bool,
                        Nullable::NotNull,
                    ),
                ],
            )),
        }
    }
}
