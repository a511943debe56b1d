//! A driver double for integration tests.
//!
//! `MemoryDriver` executes the exact SQL shapes the mapping layer emits
//! (create table, insert, select, count, update, delete with a single
//! `` `col` op ? `` predicate) against plain in-memory tables, enforcing
//! primary-key uniqueness the way a real database would.

use declorm::{Driver, DriverError, RowMap, Value};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct TableData {
    pk: String,
    rows: Vec<RowMap>,
}

#[derive(Debug, Default)]
pub struct MemoryDriver {
    tables: HashMap<String, TableData>,
    pub statements: Vec<String>,
}

fn unquote(ident: &str) -> String {
    ident.trim().trim_matches('`').to_string()
}

/// Split `` `col`=? `` / `` `col` > ? `` into (column, operator).
fn parse_condition(clause: &str) -> Result<(String, String), DriverError> {
    let clause = clause.trim();
    for op in ["<=", ">=", "=", ">", "<"] {
        if let Some(idx) = clause.find(op) {
            let column = unquote(&clause[..idx]);
            let rest = clause[idx + op.len()..].trim();
            if rest != "?" {
                return Err(DriverError::Execution(format!(
                    "Unsupported condition operand: {}",
                    rest
                )));
            }
            return Ok((column, op.to_string()));
        }
    }
    Err(DriverError::Execution(format!(
        "Unsupported condition: {}",
        clause
    )))
}

fn matches(row: &RowMap, column: &str, op: &str, arg: &Value) -> bool {
    let Some(value) = row.get(column) else {
        return false;
    };
    match op {
        "=" => value == arg,
        _ => {
            let (Some(a), Some(b)) = (value.as_f64(), arg.as_f64()) else {
                return false;
            };
            match op {
                ">" => a > b,
                "<" => a < b,
                ">=" => a >= b,
                "<=" => a <= b,
                _ => false,
            }
        }
    }
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, name: &str) -> Result<&TableData, DriverError> {
        self.tables
            .get(name)
            .ok_or_else(|| DriverError::Execution(format!("Table '{}' not found", name)))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut TableData, DriverError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DriverError::Execution(format!("Table '{}' not found", name)))
    }

    fn create_table(&mut self, sql: &str) -> Result<u64, DriverError> {
        let rest = &sql["create table ".len()..];
        let name_end = rest
            .find(" (")
            .ok_or_else(|| DriverError::Execution(format!("Bad create table: {}", sql)))?;
        let name = unquote(&rest[..name_end]);

        let pk_start = sql
            .find("primary key(")
            .ok_or_else(|| DriverError::Execution("create table without primary key".into()))?;
        let pk_rest = &sql[pk_start + "primary key(".len()..];
        let pk_end = pk_rest
            .find(')')
            .ok_or_else(|| DriverError::Execution("Unterminated primary key clause".into()))?;
        let pk = unquote(&pk_rest[..pk_end]);

        self.tables.insert(name, TableData { pk, rows: Vec::new() });
        Ok(0)
    }

    fn insert(&mut self, sql: &str, args: &[Value]) -> Result<u64, DriverError> {
        let rest = &sql["insert into ".len()..];
        let name_end = rest
            .find(" (")
            .ok_or_else(|| DriverError::Execution(format!("Bad insert: {}", sql)))?;
        let name = unquote(&rest[..name_end]);

        let cols_start = rest.find('(').unwrap() + 1;
        let cols_end = rest
            .find(')')
            .ok_or_else(|| DriverError::Execution("Unterminated column list".into()))?;
        let columns: Vec<String> = rest[cols_start..cols_end].split(',').map(unquote).collect();
        if columns.len() != args.len() {
            return Err(DriverError::Execution(format!(
                "Expected {} values, got {}",
                columns.len(),
                args.len()
            )));
        }

        let row: RowMap = columns.into_iter().zip(args.iter().cloned()).collect();
        let table = self.table_mut(&name)?;
        if let Some(pk_value) = row.get(&table.pk) {
            if table.rows.iter().any(|r| r.get(&table.pk) == Some(pk_value)) {
                return Err(DriverError::ConstraintViolation(format!(
                    "Duplicate primary key {} in '{}'",
                    pk_value, name
                )));
            }
        }
        table.rows.push(row);
        Ok(1)
    }

    fn update(&mut self, sql: &str, args: &[Value]) -> Result<u64, DriverError> {
        let rest = &sql["update ".len()..];
        let set_pos = rest
            .find(" set ")
            .ok_or_else(|| DriverError::Execution(format!("Bad update: {}", sql)))?;
        let name = unquote(&rest[..set_pos]);
        let after_set = &rest[set_pos + " set ".len()..];
        let where_pos = after_set
            .find(" where ")
            .ok_or_else(|| DriverError::Execution("update without where".into()))?;

        let columns: Vec<String> = after_set[..where_pos]
            .split(',')
            .map(|a| {
                let a = a.trim();
                unquote(a.strip_suffix("=?").unwrap_or(a))
            })
            .collect();
        let (pk_col, op) = parse_condition(&after_set[where_pos + " where ".len()..])?;
        if columns.len() + 1 != args.len() {
            return Err(DriverError::Execution(format!(
                "Expected {} args, got {}",
                columns.len() + 1,
                args.len()
            )));
        }
        let pk_value = &args[columns.len()];

        let table = self.table_mut(&name)?;
        let mut affected = 0;
        for row in &mut table.rows {
            if matches(row, &pk_col, &op, pk_value) {
                for (column, value) in columns.iter().zip(args.iter()) {
                    row.insert(column.clone(), value.clone());
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    fn delete(&mut self, sql: &str, args: &[Value]) -> Result<u64, DriverError> {
        let rest = &sql["delete from ".len()..];
        let where_pos = rest
            .find(" where ")
            .ok_or_else(|| DriverError::Execution(format!("Bad delete: {}", sql)))?;
        let name = unquote(&rest[..where_pos]);
        let (column, op) = parse_condition(&rest[where_pos + " where ".len()..])?;
        let arg = args
            .first()
            .ok_or_else(|| DriverError::Execution("delete without argument".into()))?;

        let table = self.table_mut(&name)?;
        let before = table.rows.len();
        table.rows.retain(|row| !matches(row, &column, &op, arg));
        Ok((before - table.rows.len()) as u64)
    }

    fn select(&self, sql: &str, args: &[Value]) -> Result<Vec<RowMap>, DriverError> {
        // `select * from `t`` or `select count(`pk`) from `t``, either with an
        // optional trailing `where `col` op ?` clause.
        let from_pos = sql
            .find(" from ")
            .ok_or_else(|| DriverError::Execution(format!("Bad select: {}", sql)))?;
        let rest = &sql[from_pos + " from ".len()..];
        let (name, clause) = match rest.find(" where ") {
            Some(pos) => (unquote(&rest[..pos]), Some(&rest[pos + " where ".len()..])),
            None => (unquote(rest), None),
        };

        let table = self.table(&name)?;
        match clause {
            None => Ok(table.rows.clone()),
            Some(clause) => {
                let (column, op) = parse_condition(clause)?;
                let arg = args
                    .first()
                    .ok_or_else(|| DriverError::Execution("Predicate without argument".into()))?;
                Ok(table
                    .rows
                    .iter()
                    .filter(|row| matches(row, &column, &op, arg))
                    .cloned()
                    .collect())
            }
        }
    }
}

impl Driver for MemoryDriver {
    fn execute(&mut self, sql: &str, args: &[Value]) -> Result<u64, DriverError> {
        self.statements.push(sql.to_string());
        if sql.starts_with("create table ") {
            self.create_table(sql)
        } else if sql.starts_with("insert into ") {
            self.insert(sql, args)
        } else if sql.starts_with("update ") {
            self.update(sql, args)
        } else if sql.starts_with("delete from ") {
            self.delete(sql, args)
        } else {
            Err(DriverError::Execution(format!(
                "Unsupported statement: {}",
                sql
            )))
        }
    }

    fn query(&mut self, sql: &str, args: &[Value]) -> Result<Vec<RowMap>, DriverError> {
        self.statements.push(sql.to_string());
        self.select(sql, args)
    }

    fn query_one(&mut self, sql: &str, args: &[Value]) -> Result<Option<RowMap>, DriverError> {
        Ok(self.query(sql, args)?.into_iter().next())
    }

    fn query_scalar(&mut self, sql: &str, args: &[Value]) -> Result<i64, DriverError> {
        self.statements.push(sql.to_string());
        Ok(self.select(sql, args)?.len() as i64)
    }
}
