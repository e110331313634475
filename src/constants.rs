mod nullable;
pub use nullable::Nullable;

mod table_definitions;
pub use table_definitions::TableDefinitions;
