//! Table constraints, check trees and indexes.

use serde::{Deserialize, Serialize};

use crate::query::{CompareOp, SqlValue, ToSqlValue};

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Boolean tree used by CHECK constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckExpr {
    /// `column op value`.
    Compare {
        /// Column of the owning table.
        column: String,
        /// Comparison operator.
        op: CompareOp,
        /// Right hand side.
        value: CheckOperand,
    },
    /// Both sides hold.
    And(Box<CheckExpr>, Box<CheckExpr>),
    /// Either side holds.
    Or(Box<CheckExpr>, Box<CheckExpr>),
}

/// Right hand side of a check comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOperand {
    /// Literal value.
    Value(SqlValue),
    /// Another column of the same table.
    Column(String),
}

impl CheckExpr {
    /// `column op value`.
    #[must_use]
    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl ToSqlValue) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value: CheckOperand::Value(value.to_sql_value()),
        }
    }

    /// `left op right` over two columns.
    #[must_use]
    pub fn columns(left: impl Into<String>, op: CompareOp, right: impl Into<String>) -> Self {
        Self::Compare {
            column: left.into(),
            op,
            value: CheckOperand::Column(right.into()),
        }
    }

    /// Combines with AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Combines with OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Visits every column the tree mentions.
    pub fn for_each_column<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Compare { column, value, .. } => {
                f(column);
                if let CheckOperand::Column(other) = value {
                    f(other);
                }
            }
            Self::And(l, r) | Self::Or(l, r) => {
                l.for_each_column(f);
                r.for_each_column(f);
            }
        }
    }
}

/// A set of columns that must be unique together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueSet {
    /// Optional name suffix; defaults to the joined column names.
    #[serde(default)]
    pub name: Option<String>,
    /// Columns of the set.
    pub columns: Vec<String>,
}

/// An explicit table check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCheck {
    /// Optional name suffix; defaults to the 1-based position.
    #[serde(default)]
    pub name: Option<String>,
    /// Condition that must hold.
    pub expr: CheckExpr,
}

/// A multi-column foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Local columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub references_table: String,
    /// Referenced columns, positionally matched to `columns`.
    pub references_columns: Vec<String>,
    /// Action on delete.
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKey {
    /// Foreign key from `columns` to `table (references)`.
    #[must_use]
    pub fn new(columns: &[&str], table: impl Into<String>, references: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            references_table: table.into(),
            references_columns: references.iter().map(|c| String::from(*c)).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// Constraint block of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Primary key columns.
    pub primary_key: Option<Vec<String>>,
    /// Unique column sets.
    pub unique: Vec<UniqueSet>,
    /// Explicit checks.
    pub checks: Vec<NamedCheck>,
    /// Foreign keys.
    pub foreign_keys: Vec<ForeignKey>,
}

/// A table level index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name suffix, combined with the table name.
    pub name: String,
    /// Indexed columns.
    pub columns: Vec<String>,
    /// UNIQUE index.
    #[serde(default)]
    pub unique: bool,
}
