mod base_sql_types;
pub use base_sql_types::BaseSqlTypes;
pub use base_sql_types::BaseSqlTypesError;
pub use base_sql_types::BaseSqlTypesMapper;

mod parse_type;
pub use parse_type::parse_type;
