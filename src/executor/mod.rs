//! SQL text and positional-argument builders for the CRUD verbs.
//!
//! Builders are pure: they read the frozen schema and the record's current
//! attributes and produce `(sql, args)` pairs for the driver. Values are
//! always passed as parameters, never interpolated into the statement text.

mod read;
mod write;

pub use read::{build_count, build_find, build_find_all, build_get};
pub use write::{build_delete, build_insert, build_update};

/// Back-quote an identifier for the assumed dialect.
fn quote(ident: &str) -> String {
    format!("`{}`", ident)
}

/// `?,?,...` for `n` positional parameters.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
