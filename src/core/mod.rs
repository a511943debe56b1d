pub mod error;
pub mod value;

pub use error::{DriverError, OrmError, Result, SchemaError};
pub use value::{RowMap, Value};
