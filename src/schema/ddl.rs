use super::field::Field;
use crate::core::SchemaError;

/// Generate the `create table` statement for an ordered field list.
///
/// Columns are emitted in ascending declaration order, each as
/// `` `name` ddl `` plus `not null` for non-nullable columns; the statement
/// closes with a `primary key` clause naming the single primary-key column.
///
/// A field with an empty ddl fragment or a field list without a primary key
/// is rejected. The registry already excludes both, but a hand-built field
/// slice can still be malformed.
pub fn generate_ddl(table_name: &str, fields: &[Field]) -> Result<String, SchemaError> {
    let mut p_key = None;
    let mut sql = vec![format!("create table `{}` (", table_name)];

    let mut ordered: Vec<&Field> = fields.iter().collect();
    ordered.sort_by_key(|f| f.order());

    for field in ordered {
        if field.ddl_fragment().is_empty() {
            return Err(SchemaError::MissingDdl(field.column_name().to_string()));
        }
        if field.is_primary_key() {
            p_key = Some(field.column_name());
        }
        let not_null = if field.is_nullable() { "" } else { " not null" };
        sql.push(format!(
            "  `{}` {}{},",
            field.column_name(),
            field.ddl_fragment(),
            not_null
        ));
    }

    let p_key = p_key.ok_or_else(|| SchemaError::MissingPrimaryKey(table_name.to_string()))?;
    sql.push(format!("  primary key(`{}`)", p_key));
    sql.push(");".to_string());

    Ok(sql.join("\n"))
}
