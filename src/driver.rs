use crate::core::{DriverError, RowMap, Value};

/// Contract for the external database driver.
///
/// The mapping layer builds parameterized SQL (positional `?` placeholders,
/// back-quoted identifiers) and delegates every statement to one of these
/// four capabilities. Calls are synchronous request/response; this layer adds
/// no retries, timeouts or cancellation, and a [`DriverError`] propagates to
/// the caller unchanged.
pub trait Driver {
    /// Run a statement, returning the number of rows affected.
    fn execute(&mut self, sql: &str, args: &[Value]) -> Result<u64, DriverError>;

    /// Run a query, returning all result rows as column-name -> value maps.
    fn query(&mut self, sql: &str, args: &[Value]) -> Result<Vec<RowMap>, DriverError>;

    /// Run a query, returning the first result row if any.
    fn query_one(&mut self, sql: &str, args: &[Value]) -> Result<Option<RowMap>, DriverError>;

    /// Run a query whose result is a single number (e.g. a count).
    fn query_scalar(&mut self, sql: &str, args: &[Value]) -> Result<i64, DriverError>;
}
