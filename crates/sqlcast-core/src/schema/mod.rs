//! Abstract schema model.
//!
//! A [`Schema`] is a named set of [`Table`]s. Tables own ordered
//! [`Column`]s, a [`Constraints`] block and table-level indexes, and may
//! inherit from a parent table. Nothing here is vendor specific; the
//! [`resolver`](crate::resolver) and [`ddl`](crate::ddl) modules turn the
//! model into statements for one vendor.

mod column;
mod constraint;
mod table;
mod types;

pub use column::{
    boolean, char, clob, date, datetime, decimal, double, enumeration, integer, unsigned,
    varbinary, varchar, Bound, Column, ColumnBuilder, DefaultValue, ForeignKeyRef, IndexSpec,
    InsertGenerator, UpdateGenerator,
};
pub use constraint::{
    CheckExpr, CheckOperand, Constraints, ForeignKey, ForeignKeyAction, Index, NamedCheck,
    UniqueSet,
};
pub use table::{HasName, NoName, Table, TableBuilder};
pub use types::{parse_enum_literals, TypeSpec};

use serde::{Deserialize, Serialize};

/// A named collection of tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name, informational only.
    #[serde(default)]
    pub name: String,
    /// Tables in input order. Input order breaks ties in the create order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Adds a table.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Finds a table by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}
