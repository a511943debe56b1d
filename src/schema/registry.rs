use super::ddl::generate_ddl;
use super::field::Field;
use crate::core::SchemaError;
use crate::record::Record;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

lazy_static! {
    /// Record-type names already declared in this process. Used only to warn
    /// on redeclaration (hot-reload loops redeclare types legitimately).
    static ref DECLARED_TYPES: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
}

/// Lifecycle hook invoked synchronously before SQL construction. Hooks may
/// mutate the record; mutations are visible to the SQL-building step.
pub type Hook = Arc<dyn Fn(&mut Record) + Send + Sync>;

/// Frozen mapping from a record type to its table name, ordered fields and
/// primary key. Built once per record type by [`SchemaBuilder::build`];
/// immutable thereafter, safe to share across threads.
#[derive(Clone)]
pub struct Schema {
    type_name: String,
    table_name: String,
    fields: Vec<Field>,
    primary_key: usize,
    pub(crate) pre_insert: Option<Hook>,
    pub(crate) pre_update: Option<Hook>,
    pub(crate) pre_delete: Option<Hook>,
}

impl Schema {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fields in ascending declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.column_name() == name)
    }

    pub fn primary_key(&self) -> &Field {
        &self.fields[self.primary_key]
    }

    /// The `create table` statement for this schema.
    pub fn ddl(&self) -> Result<String, SchemaError> {
        generate_ddl(&self.table_name, &self.fields)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("table_name", &self.table_name)
            .field("fields", &self.fields)
            .field("primary_key", &self.fields[self.primary_key].column_name())
            .finish()
    }
}

/// Explicit registration step for one record type: collects the named field
/// declarations, validates the primary-key invariant and freezes the result
/// as a [`Schema`]. Invoked once per record type at program initialization.
pub struct SchemaBuilder {
    type_name: String,
    table_name: Option<String>,
    fields: Vec<(String, Field)>,
    pre_insert: Option<Hook>,
    pre_update: Option<Hook>,
    pre_delete: Option<Hook>,
}

impl SchemaBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            table_name: None,
            fields: Vec::new(),
            pre_insert: None,
            pre_update: None,
            pre_delete: None,
        }
    }

    /// Override the table name. Defaults to the lower-cased type name.
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Declare one attribute. The field's column name defaults to `attr`
    /// unless the field carries an explicit name.
    pub fn field(mut self, attr: impl Into<String>, field: Field) -> Self {
        self.fields.push((attr.into(), field));
        self
    }

    pub fn pre_insert(mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) -> Self {
        self.pre_insert = Some(Arc::new(hook));
        self
    }

    pub fn pre_update(mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) -> Self {
        self.pre_update = Some(Arc::new(hook));
        self
    }

    pub fn pre_delete(mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) -> Self {
        self.pre_delete = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let Self {
            type_name,
            table_name,
            fields,
            pre_insert,
            pre_update,
            pre_delete,
        } = self;

        {
            let mut declared = DECLARED_TYPES
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !declared.insert(type_name.clone()) {
                log::warn!("Redefine record type: {}", type_name);
            }
        }
        log::info!("Scan record type {}...", type_name);

        let mut fields: Vec<Field> = fields
            .into_iter()
            .map(|(attr, mut field)| {
                field.assign_name(&attr);
                field
            })
            .collect();
        fields.sort_by_key(Field::order);

        let mut primary_key: Option<usize> = None;
        for (idx, field) in fields.iter().enumerate() {
            if field.is_primary_key() {
                if let Some(first) = primary_key {
                    return Err(SchemaError::MultiplePrimaryKeys(
                        type_name,
                        fields[first].column_name().to_string(),
                        field.column_name().to_string(),
                    ));
                }
                primary_key = Some(idx);
            }
        }
        let Some(pk_idx) = primary_key else {
            return Err(SchemaError::MissingPrimaryKey(type_name));
        };

        // Primary keys are immutable and required, whatever was declared.
        let (was_updatable, was_nullable) = fields[pk_idx].force_primary_key_flags();
        if was_updatable {
            log::warn!(
                "NOTE: change primary key '{}' to non-updatable.",
                fields[pk_idx].column_name()
            );
        }
        if was_nullable {
            log::warn!(
                "NOTE: change primary key '{}' to non-nullable.",
                fields[pk_idx].column_name()
            );
        }

        let table_name = table_name.unwrap_or_else(|| type_name.to_lowercase());

        Ok(Schema {
            type_name,
            table_name,
            fields,
            primary_key: pk_idx,
            pre_insert,
            pre_update,
            pre_delete,
        })
    }
}
