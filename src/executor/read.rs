use super::quote;
use crate::core::Value;
use crate::schema::Schema;

/// `select * from `t` where `pk`=?` with the key as the single argument.
pub fn build_get(schema: &Schema, pk_value: Value) -> (String, Vec<Value>) {
    let sql = format!(
        "select * from {} where {}=?",
        quote(schema.table_name()),
        quote(schema.primary_key().column_name())
    );
    (sql, vec![pk_value])
}

/// Unconditional `select * from `t``.
pub fn build_find_all(schema: &Schema) -> (String, Vec<Value>) {
    let sql = format!("select * from {}", quote(schema.table_name()));
    (sql, Vec::new())
}

/// `select * from `t` <predicate>`. The predicate clause is appended
/// verbatim; writing a valid trailing clause (e.g. `where age > ?`) is the
/// caller's responsibility.
pub fn build_find(schema: &Schema, predicate: &str, args: Vec<Value>) -> (String, Vec<Value>) {
    let sql = format!("select * from {} {}", quote(schema.table_name()), predicate);
    (sql, args)
}

/// `select count(`pk`) from `t``, with an optional trailing predicate. Both
/// count paths share the same primary-key lookup.
pub fn build_count(schema: &Schema, predicate: Option<&str>, args: Vec<Value>) -> (String, Vec<Value>) {
    let mut sql = format!(
        "select count({}) from {}",
        quote(schema.primary_key().column_name()),
        quote(schema.table_name())
    );
    if let Some(predicate) = predicate {
        sql.push(' ');
        sql.push_str(predicate);
    }
    (sql, args)
}
