use crate::core::{Result, Value};
use crate::driver::Driver;
use crate::executor::{
    build_count, build_delete, build_find, build_find_all, build_get, build_insert, build_update,
};
use crate::record::Record;
use crate::schema::Schema;

/// High-level CRUD API over a [`Driver`].
///
/// `Db` builds parameterized SQL from a frozen [`Schema`] and the record's
/// current attributes, runs the type's lifecycle hooks, and delegates
/// execution to the driver. It keeps no state of its own beyond the driver it
/// owns: all blocking and I/O latency lives on the driver side.
///
/// # Examples
///
/// ```no_run
/// use declorm::{Db, Driver, Field, Record, SchemaBuilder};
///
/// # fn demo<D: Driver>(driver: D) -> declorm::Result<()> {
/// let user = SchemaBuilder::new("User")
///     .field("id", Field::integer().primary_key())
///     .field("name", Field::text())
///     .build()?;
///
/// let mut db = Db::new(driver);
/// db.create_table(&user)?;
///
/// let mut alice = Record::new().with("id", 1i64).with("name", "Alice");
/// db.insert(&user, &mut alice)?;
///
/// let found = db.get(&user, 1i64)?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
pub struct Db<D: Driver> {
    driver: D,
}

impl<D: Driver> Db<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Create the backing table from the schema's generated DDL.
    pub fn create_table(&mut self, schema: &Schema) -> Result<()> {
        let sql = schema.ddl()?;
        log::debug!("DDL: {}", sql);
        self.driver.execute(&sql, &[])?;
        Ok(())
    }

    /// Fetch one record by primary key. `Ok(None)` when no row matches;
    /// "not found" is never an error.
    pub fn get(&mut self, schema: &Schema, pk_value: impl Into<Value>) -> Result<Option<Record>> {
        let (sql, args) = build_get(schema, pk_value.into());
        log::debug!("SQL: {} [{} args]", sql, args.len());
        let row = self.driver.query_one(&sql, &args)?;
        Ok(row.map(Record::from_row))
    }

    /// First record matching a caller-supplied trailing predicate clause,
    /// e.g. `where age > ?`.
    pub fn find_first(
        &mut self,
        schema: &Schema,
        predicate: &str,
        args: Vec<Value>,
    ) -> Result<Option<Record>> {
        let (sql, args) = build_find(schema, predicate, args);
        log::debug!("SQL: {} [{} args]", sql, args.len());
        let row = self.driver.query_one(&sql, &args)?;
        Ok(row.map(Record::from_row))
    }

    /// Every record of the type.
    pub fn find_all(&mut self, schema: &Schema) -> Result<Vec<Record>> {
        let (sql, args) = build_find_all(schema);
        log::debug!("SQL: {}", sql);
        let rows = self.driver.query(&sql, &args)?;
        Ok(rows.into_iter().map(Record::from_row).collect())
    }

    /// Every record matching a caller-supplied trailing predicate clause.
    pub fn find_by(
        &mut self,
        schema: &Schema,
        predicate: &str,
        args: Vec<Value>,
    ) -> Result<Vec<Record>> {
        let (sql, args) = build_find(schema, predicate, args);
        log::debug!("SQL: {} [{} args]", sql, args.len());
        let rows = self.driver.query(&sql, &args)?;
        Ok(rows.into_iter().map(Record::from_row).collect())
    }

    pub fn count_all(&mut self, schema: &Schema) -> Result<i64> {
        let (sql, args) = build_count(schema, None, Vec::new());
        log::debug!("SQL: {}", sql);
        Ok(self.driver.query_scalar(&sql, &args)?)
    }

    pub fn count_by(&mut self, schema: &Schema, predicate: &str, args: Vec<Value>) -> Result<i64> {
        let (sql, args) = build_count(schema, Some(predicate), args);
        log::debug!("SQL: {} [{} args]", sql, args.len());
        Ok(self.driver.query_scalar(&sql, &args)?)
    }

    /// Insert the record, resolving defaults for unset insertable fields.
    ///
    /// The type's `pre_insert` hook runs first and may mutate the record.
    /// There is no existence check: inserting a primary key that already
    /// exists surfaces as the driver's constraint violation, unchanged.
    pub fn insert(&mut self, schema: &Schema, record: &mut Record) -> Result<()> {
        if let Some(hook) = &schema.pre_insert {
            hook(record);
        }
        let (sql, args) = build_insert(schema, record);
        log::debug!("SQL: {} [{} args]", sql, args.len());
        self.driver.execute(&sql, &args)?;
        Ok(())
    }

    /// Update the row matching the record's primary key, writing updatable
    /// fields only. Runs the `pre_update` hook first. Updating a row that
    /// does not exist is not an error; the rows-affected count is not
    /// inspected here.
    pub fn update(&mut self, schema: &Schema, record: &mut Record) -> Result<()> {
        if let Some(hook) = &schema.pre_update {
            hook(record);
        }
        let (sql, args) = build_update(schema, record)?;
        log::debug!("SQL: {} [{} args]", sql, args.len());
        self.driver.execute(&sql, &args)?;
        Ok(())
    }

    /// Delete the row matching the record's primary key. Runs the
    /// `pre_delete` hook first. The in-memory record stays valid.
    pub fn delete(&mut self, schema: &Schema, record: &mut Record) -> Result<()> {
        if let Some(hook) = &schema.pre_delete {
            hook(record);
        }
        let (sql, args) = build_delete(schema, record)?;
        log::debug!("SQL: {} [{} args]", sql, args.len());
        self.driver.execute(&sql, &args)?;
        Ok(())
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}
