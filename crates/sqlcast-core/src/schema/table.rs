//! Tables and the typestate table builder.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::constraint::{CheckExpr, Constraints, ForeignKey, Index, NamedCheck, UniqueSet};

/// A table of the abstract schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Parent table whose columns and constraints are inherited.
    #[serde(default)]
    pub extends: Option<String>,
    /// Never materialized; only serves as a parent.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Excluded from generation.
    #[serde(default)]
    pub skip: bool,
    /// Own columns, in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Own constraints.
    #[serde(default)]
    pub constraints: Constraints,
    /// Own table-level indexes.
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            is_abstract: false,
            skip: false,
            columns: Vec::new(),
            constraints: Constraints::default(),
            indexes: Vec::new(),
        }
    }

    /// Returns true if the table produces DDL.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        !self.is_abstract && !self.skip
    }

    /// Finds an own column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// =============================================================================
// Typestate Markers
// =============================================================================

/// Marker: table has no name set.
#[derive(Debug, Clone, Copy)]
pub struct NoName;

/// Marker: table has a name set.
#[derive(Debug, Clone, Copy)]
pub struct HasName;

/// Typestate builder for [`Table`]; `build()` requires a name.
///
/// # Example
///
/// ```rust
/// use sqlcast_core::schema::{TableBuilder, integer, varchar};
///
/// let table = TableBuilder::new()
///     .name("customer")
///     .column(integer("id", 9).not_null().auto_increment().build())
///     .column(varchar("name", 100).not_null().build())
///     .primary_key(&["id"])
///     .build();
///
/// assert_eq!(table.name, "customer");
/// assert_eq!(table.columns.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder<Name> {
    table: Table,
    _state: PhantomData<Name>,
}

impl Default for TableBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder<NoName> {
    /// Creates a new `TableBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new(String::new()),
            _state: PhantomData,
        }
    }

    /// Sets the table name.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> TableBuilder<HasName> {
        let mut table = self.table;
        table.name = name.into();
        TableBuilder {
            table,
            _state: PhantomData,
        }
    }
}

impl<Name> TableBuilder<Name> {
    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.table.columns.push(column);
        self
    }

    /// Inherits columns and constraints from `parent`.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.table.extends = Some(parent.into());
        self
    }

    /// Marks the table abstract.
    #[must_use]
    pub fn abstract_table(mut self) -> Self {
        self.table.is_abstract = true;
        self
    }

    /// Excludes the table from generation.
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.table.skip = true;
        self
    }

    /// Sets the primary key columns.
    #[must_use]
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.table.constraints.primary_key = Some(to_strings(columns));
        self
    }

    /// Adds an unnamed unique column set.
    #[must_use]
    pub fn unique(mut self, columns: &[&str]) -> Self {
        self.table.constraints.unique.push(UniqueSet {
            name: None,
            columns: to_strings(columns),
        });
        self
    }

    /// Adds a named unique column set.
    #[must_use]
    pub fn unique_named(mut self, name: impl Into<String>, columns: &[&str]) -> Self {
        self.table.constraints.unique.push(UniqueSet {
            name: Some(name.into()),
            columns: to_strings(columns),
        });
        self
    }

    /// Adds an explicit check.
    #[must_use]
    pub fn check(mut self, expr: CheckExpr) -> Self {
        self.table
            .constraints
            .checks
            .push(NamedCheck { name: None, expr });
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.table.constraints.foreign_keys.push(fk);
        self
    }

    /// Adds a table-level index.
    #[must_use]
    pub fn index(mut self, name: impl Into<String>, columns: &[&str], unique: bool) -> Self {
        self.table.indexes.push(Index {
            name: name.into(),
            columns: to_strings(columns),
            unique,
        });
        self
    }
}

impl TableBuilder<HasName> {
    /// Builds the table.
    #[must_use]
    pub fn build(self) -> Table {
        self.table
    }
}

fn to_strings(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| String::from(*c)).collect()
}
