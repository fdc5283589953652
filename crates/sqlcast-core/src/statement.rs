//! Compiled SQL statements.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::query::SqlValue;

/// Finished SQL text with its bound parameters.
///
/// Equality and hashing use the SQL text only, so equal prepared statements
/// with different parameters batch together.
#[derive(Debug, Clone)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
    prepared: bool,
}

impl Statement {
    /// A DDL or literal statement without parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            prepared: false,
        }
    }

    /// A prepared statement with placeholders bound to `params`.
    #[must_use]
    pub fn prepared(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
            prepared: true,
        }
    }

    /// SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Whether the SQL carries placeholders.
    #[must_use]
    pub const fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Splits into SQL text and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.sql == other.sql
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sql.hash(state);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
