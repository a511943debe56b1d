use crate::core::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide declaration counter. Incremented on every `Field`
/// construction and never reset, so all fields declared in one process have a
/// strict total order. Only the relative order within one record type matters
/// for DDL generation.
static DECLARATION_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_order() -> u64 {
    DECLARATION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Default value of a field: absent, a stored value, or a producer invoked
/// lazily each time a default is needed (so e.g. timestamps differ per insert).
#[derive(Clone)]
pub enum DefaultSpec {
    None,
    Static(Value),
    Computed(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultSpec {
    pub fn resolve(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Static(v) => v.clone(),
            Self::Computed(f) => f(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for DefaultSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Static(v) => write!(f, "Static({})", v),
            Self::Computed(_) => write!(f, "Computed(<fn>)"),
        }
    }
}

impl fmt::Display for DefaultSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Static(v) => write!(f, "{}", v),
            Self::Computed(_) => write!(f, "<fn>"),
        }
    }
}

/// Metadata for one column of a record type. Pure value holder, no I/O.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    default: DefaultSpec,
    primary_key: bool,
    nullable: bool,
    updatable: bool,
    insertable: bool,
    ddl: String,
    order: u64,
}

impl Field {
    /// A bare field with no ddl fragment and no default. The column name is
    /// assigned by the schema builder from the declaring attribute unless set
    /// explicitly with [`Field::name`].
    pub fn new() -> Self {
        Self {
            name: String::new(),
            default: DefaultSpec::None,
            primary_key: false,
            nullable: false,
            updatable: true,
            insertable: true,
            ddl: String::new(),
            order: next_order(),
        }
    }

    // Typed constructors. They differ only in the ddl fragment and default
    // value preloaded for the caller to override.

    pub fn text() -> Self {
        Self::new().ddl("varchar(255)").default_value("")
    }

    pub fn integer() -> Self {
        Self::new().ddl("bigint").default_value(0i64)
    }

    pub fn float() -> Self {
        Self::new().ddl("real").default_value(0.0f64)
    }

    pub fn boolean() -> Self {
        Self::new().ddl("bool").default_value(false)
    }

    pub fn long_text() -> Self {
        Self::new().ddl("text").default_value("")
    }

    pub fn binary() -> Self {
        Self::new().ddl("blob").default_value(Vec::<u8>::new())
    }

    /// Optimistic-concurrency counter column. Incrementing it is the caller's
    /// responsibility.
    pub fn version() -> Self {
        Self::new().ddl("bigint").default_value(0i64)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn updatable(mut self, updatable: bool) -> Self {
        self.updatable = updatable;
        self
    }

    pub fn insertable(mut self, insertable: bool) -> Self {
        self.insertable = insertable;
        self
    }

    pub fn ddl(mut self, ddl: impl Into<String>) -> Self {
        self.ddl = ddl.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultSpec::Static(value.into());
        self
    }

    pub fn default_fn(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = DefaultSpec::Computed(Arc::new(f));
        self
    }

    // accessors

    pub fn column_name(&self) -> &str {
        &self.name
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_updatable(&self) -> bool {
        self.updatable
    }

    pub fn is_insertable(&self) -> bool {
        self.insertable
    }

    pub fn ddl_fragment(&self) -> &str {
        &self.ddl
    }

    pub fn order(&self) -> u64 {
        self.order
    }

    /// Resolve the field's default. Computed defaults are invoked once per
    /// call; static defaults are returned as-is.
    pub fn resolve_default(&self) -> Value {
        self.default.resolve()
    }

    pub fn has_default(&self) -> bool {
        !self.default.is_none()
    }

    pub(crate) fn assign_name(&mut self, name: &str) {
        if self.name.is_empty() {
            self.name = name.to_string();
        }
    }

    /// Returns the previous (updatable, nullable) flags so the registry can
    /// warn when a declaration was overridden.
    pub(crate) fn force_primary_key_flags(&mut self) -> (bool, bool) {
        let was = (self.updatable, self.nullable);
        self.updatable = false;
        self.nullable = false;
        was
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Field {
    /// Diagnostic form, e.g. `<Field:id,bigint,default(0),UI>`. The trailing
    /// letters mark the nullable/updatable/insertable flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Field:{},{},default({}),",
            self.name, self.ddl, self.default
        )?;
        if self.nullable {
            write!(f, "N")?;
        }
        if self.updatable {
            write!(f, "U")?;
        }
        if self.insertable {
            write!(f, "I")?;
        }
        write!(f, ">")
    }
}
