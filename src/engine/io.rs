mod encoded_size;
pub use encoded_size::ConstEncodedSize;
pub use encoded_size::SelfEncodedSize;

pub mod row_formats;

mod row_manager;
pub use row_manager::RowManager;
pub use row_manager::RowManagerError;

mod store_manager;
pub use store_manager::StoreManager;
pub use store_manager::StoreManagerError;

mod utility;
pub use utility::encode_size;
pub use utility::expected_encoded_size;
pub use utility::parse_size;
pub use utility::SizeError;
