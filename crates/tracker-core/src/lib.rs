pub mod custom_fields;
pub mod error;
pub mod models;
pub mod storage;

pub use custom_fields::{
    is_custom_field_key, populate_custom_fields, resolve_value, select_custom_fields,
    ExtractError,
};
pub use error::{Error, Result};
