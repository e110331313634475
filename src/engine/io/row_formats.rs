//! Byte layouts for rows in the store

mod info_mask;
pub use info_mask::InfoMask;

mod null_mask;
pub use null_mask::NullMask;
pub use null_mask::NullMaskError;

mod row_data;
pub use row_data::RowData;
pub use row_data::RowDataError;
