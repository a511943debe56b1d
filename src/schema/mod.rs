pub mod ddl;
pub mod field;
pub mod registry;

pub use ddl::generate_ddl;
pub use field::{DefaultSpec, Field};
pub use registry::{Hook, Schema, SchemaBuilder};
