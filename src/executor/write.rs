use super::{placeholders, quote};
use crate::core::{OrmError, Result, Value};
use crate::record::Record;
use crate::schema::Schema;

fn primary_key_value(schema: &Schema, record: &Record) -> Result<Value> {
    let pk = schema.primary_key().column_name();
    record
        .get(pk)
        .cloned()
        .ok_or_else(|| OrmError::MissingPrimaryKeyValue {
            table: schema.table_name().to_string(),
            column: pk.to_string(),
        })
}

/// `insert into `t` (`a`,`b`,...) values (?,?,...)` over every insertable
/// field, columns in declaration order.
///
/// Attributes the record lacks are resolved from the field's default and set
/// on the record before the statement is built, so computed defaults run
/// exactly once per insert and the caller sees the stored values afterwards.
pub fn build_insert(schema: &Schema, record: &mut Record) -> (String, Vec<Value>) {
    let mut columns = Vec::new();
    let mut args = Vec::new();

    for field in schema.fields() {
        if !field.is_insertable() {
            continue;
        }
        let name = field.column_name();
        if !record.contains(name) {
            record.set(name, field.resolve_default());
        }
        columns.push(quote(name));
        args.push(record.get(name).cloned().unwrap_or(Value::Null));
    }

    let sql = format!(
        "insert into {} ({}) values ({})",
        quote(schema.table_name()),
        columns.join(","),
        placeholders(args.len())
    );
    (sql, args)
}

/// `update `t` set `a`=?,... where `pk`=?` over updatable fields only.
///
/// The primary key is non-updatable by construction, so it never appears in
/// the set clause. Fields without a current value fall back to their default,
/// which is also set on the record.
pub fn build_update(schema: &Schema, record: &mut Record) -> Result<(String, Vec<Value>)> {
    let pk_value = primary_key_value(schema, record)?;

    let mut assignments = Vec::new();
    let mut args = Vec::new();
    for field in schema.fields() {
        if !field.is_updatable() {
            continue;
        }
        let name = field.column_name();
        if !record.contains(name) {
            record.set(name, field.resolve_default());
        }
        assignments.push(format!("{}=?", quote(name)));
        args.push(record.get(name).cloned().unwrap_or(Value::Null));
    }

    let sql = format!(
        "update {} set {} where {}=?",
        quote(schema.table_name()),
        assignments.join(","),
        quote(schema.primary_key().column_name())
    );
    args.push(pk_value);
    Ok((sql, args))
}

/// `delete from `t` where `pk`=?`.
pub fn build_delete(schema: &Schema, record: &Record) -> Result<(String, Vec<Value>)> {
    let pk_value = primary_key_value(schema, record)?;
    let sql = format!(
        "delete from {} where {}=?",
        quote(schema.table_name()),
        quote(schema.primary_key().column_name())
    );
    Ok((sql, vec![pk_value]))
}
