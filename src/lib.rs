// ============================================================================
// Declorm Library
// ============================================================================

//! Declarative record-to-table mapping.
//!
//! A record type is declared once as a set of typed fields; the crate derives
//! the `create table` DDL and the SQL for create/read/update/delete keyed by
//! primary key or a free-form predicate. Statement execution is delegated to
//! an external [`Driver`].
//!
//! # Examples
//!
//! ```
//! use declorm::{Field, SchemaBuilder};
//!
//! # fn main() -> declorm::Result<()> {
//! let user = SchemaBuilder::new("User")
//!     .field("id", Field::integer().primary_key())
//!     .field("name", Field::text())
//!     .field("email", Field::text().updatable(false))
//!     .build()?;
//!
//! let ddl = user.ddl()?;
//! assert!(ddl.starts_with("create table `user` ("));
//! assert!(ddl.contains("primary key(`id`)"));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod driver;
pub mod executor;
pub mod facade;
pub mod json;
pub mod record;
pub mod schema;

// Re-export main types for convenience
pub use core::{DriverError, OrmError, Result, RowMap, SchemaError, Value};
pub use driver::Driver;
pub use facade::Db;
pub use record::Record;
pub use schema::{DefaultSpec, Field, Hook, Schema, SchemaBuilder, generate_ddl};
