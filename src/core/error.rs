use thiserror::Error;

/// Declaration-time failures. A record type that produces one of these must
/// not be usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Primary key not defined in record type '{0}'")]
    MissingPrimaryKey(String),

    #[error("Cannot define more than 1 primary key in record type '{0}': '{1}' and '{2}'")]
    MultiplePrimaryKeys(String, String, String),

    #[error("No ddl in field '{0}'")]
    MissingDdl(String),
}

/// Failures produced by the external driver during statement execution.
/// Propagated unchanged, never swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Connection failure: {0}")]
    Connection(String),

    #[error("Execution error: {0}")]
    Execution(String),
}

#[derive(Error, Debug)]
pub enum OrmError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("Record for table '{table}' has no value for primary key '{column}'")]
    MissingPrimaryKeyValue { table: String, column: String },

    #[error("JSON conversion error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, OrmError>;
