//! Column definitions and the fluent column builder.

use serde::{Deserialize, Serialize};

use super::constraint::{CheckExpr, ForeignKeyAction};
use super::types::TypeSpec;

/// Single-column foreign key shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// The referenced table name.
    pub table: String,
    /// The referenced column name.
    pub column: String,
    /// Action on delete.
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// Exact decimal default in textual form, e.g. `"12.50"`.
    Decimal(String),
    /// String default. Dates and times are given in ISO form.
    String(String),
    /// Raw SQL expression, emitted verbatim.
    Expression(String),
}

/// How a value is produced when a row is inserted without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertGenerator {
    /// Next value of an identity or sequence.
    AutoIncrement,
    /// Random UUID text.
    Uuid,
    /// Current date or timestamp.
    Now,
}

/// How a value is refreshed whenever its row is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateGenerator {
    /// Previous value plus one (row versioning).
    Increment,
    /// Current date or timestamp.
    Now,
}

/// Inclusive numeric bound. On textual columns it bounds the length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    /// Whole number.
    Integer(i64),
    /// Fractional number.
    Float(f64),
}

impl Bound {
    /// Returns the bound as a float for comparisons.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(n) => n as f64,
            Self::Float(f) => f,
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Column level index request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// UNIQUE index.
    #[serde(default)]
    pub unique: bool,
}

/// A complete column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Abstract type.
    #[serde(rename = "type")]
    pub type_spec: TypeSpec,
    /// Whether the column is nullable.
    #[serde(default = "nullable_by_default")]
    pub nullable: bool,
    /// Default value.
    #[serde(default)]
    pub default: Option<DefaultValue>,
    /// Value generated on insert.
    #[serde(default)]
    pub on_insert: Option<InsertGenerator>,
    /// Value generated on update.
    #[serde(default)]
    pub on_update: Option<UpdateGenerator>,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: Option<Bound>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max: Option<Bound>,
    /// Inline CHECK condition.
    #[serde(default)]
    pub check: Option<CheckExpr>,
    /// Index on this column alone.
    #[serde(default)]
    pub index: Option<IndexSpec>,
    /// Foreign key reference, if any.
    #[serde(default)]
    pub references: Option<ForeignKeyRef>,
}

const fn nullable_by_default() -> bool {
    true
}

impl Column {
    /// Creates a nullable column without extras.
    #[must_use]
    pub fn new(name: impl Into<String>, type_spec: TypeSpec) -> Self {
        Self {
            name: name.into(),
            type_spec,
            nullable: true,
            default: None,
            on_insert: None,
            on_update: None,
            min: None,
            max: None,
            check: None,
            index: None,
            references: None,
        }
    }

    /// Returns true when the column is auto-incremented on insert.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.on_insert == Some(InsertGenerator::AutoIncrement)
    }
}

/// Fluent builder for [`Column`].
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    column: Column,
}

impl ColumnBuilder {
    /// Creates a new column builder with name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_spec: TypeSpec) -> Self {
        Self {
            column: Column::new(name, type_spec),
        }
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.column.nullable = false;
        self
    }

    /// Marks the column as nullable (default).
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.column.nullable = true;
        self
    }

    /// Generates the value from an identity or sequence.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.column.on_insert = Some(InsertGenerator::AutoIncrement);
        self
    }

    /// Sets the insert generator.
    #[must_use]
    pub fn on_insert(mut self, generator: InsertGenerator) -> Self {
        self.column.on_insert = Some(generator);
        self
    }

    /// Sets the update generator.
    #[must_use]
    pub fn on_update(mut self, generator: UpdateGenerator) -> Self {
        self.column.on_update = Some(generator);
        self
    }

    /// Sets a default value.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.column.default = Some(value);
        self
    }

    /// Sets an integer default value.
    #[must_use]
    pub fn default_int(self, value: i64) -> Self {
        self.default_value(DefaultValue::Integer(value))
    }

    /// Sets a string default value.
    #[must_use]
    pub fn default_str(self, value: impl Into<String>) -> Self {
        self.default_value(DefaultValue::String(value.into()))
    }

    /// Sets a boolean default value.
    #[must_use]
    pub fn default_bool(self, value: bool) -> Self {
        self.default_value(DefaultValue::Boolean(value))
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn min(mut self, bound: Bound) -> Self {
        self.column.min = Some(bound);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn max(mut self, bound: Bound) -> Self {
        self.column.max = Some(bound);
        self
    }

    /// Sets both integer bounds.
    #[must_use]
    pub fn range(self, min: i64, max: i64) -> Self {
        self.min(Bound::Integer(min)).max(Bound::Integer(max))
    }

    /// Adds an inline CHECK condition.
    #[must_use]
    pub fn check(mut self, expr: CheckExpr) -> Self {
        self.column.check = Some(expr);
        self
    }

    /// Indexes the column.
    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.column.index = Some(IndexSpec { unique: false });
        self
    }

    /// Adds a unique index on the column.
    #[must_use]
    pub fn unique_index(mut self) -> Self {
        self.column.index = Some(IndexSpec { unique: true });
        self
    }

    /// Sets a foreign key reference.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.column.references = Some(ForeignKeyRef {
            table: table.into(),
            column: column.into(),
            on_delete: None,
            on_update: None,
        });
        self
    }

    /// Sets a foreign key reference with ON DELETE action.
    #[must_use]
    pub fn references_on_delete(
        self,
        table: impl Into<String>,
        column: impl Into<String>,
        on_delete: ForeignKeyAction,
    ) -> Self {
        let mut builder = self.references(table, column);
        if let Some(fk) = builder.column.references.as_mut() {
            fk.on_delete = Some(on_delete);
        }
        builder
    }

    /// Builds the column definition.
    #[must_use]
    pub fn build(self) -> Column {
        self.column
    }
}

// =============================================================================
// Shorthand Functions for Common Types
// =============================================================================

/// Creates a boolean column builder.
#[must_use]
pub fn boolean(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::Boolean)
}

/// Creates an integer column builder holding `precision` digits.
#[must_use]
pub fn integer(name: impl Into<String>, precision: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::integer(precision))
}

/// Creates an unsigned integer column builder.
#[must_use]
pub fn unsigned(name: impl Into<String>, precision: u32) -> ColumnBuilder {
    ColumnBuilder::new(
        name,
        TypeSpec::Integer {
            precision: Some(precision),
            unsigned: true,
        },
    )
}

/// Creates a decimal column builder.
#[must_use]
pub fn decimal(name: impl Into<String>, precision: u32, scale: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::decimal(precision, scale))
}

/// Creates a double precision float column builder.
#[must_use]
pub fn double(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::Float { double: true })
}

/// Creates a CHAR column builder.
#[must_use]
pub fn char(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::Char { length })
}

/// Creates a VARCHAR column builder.
#[must_use]
pub fn varchar(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::varchar(length))
}

/// Creates a VARBINARY column builder.
#[must_use]
pub fn varbinary(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::Varbinary { length })
}

/// Creates a CLOB column builder.
#[must_use]
pub fn clob(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::Clob)
}

/// Creates a DATE column builder.
#[must_use]
pub fn date(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::Date)
}

/// Creates a date-time column builder.
#[must_use]
pub fn datetime(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::DateTime)
}

/// Creates an enumeration column builder from a space delimited literal list.
#[must_use]
pub fn enumeration(name: impl Into<String>, literals: &str) -> ColumnBuilder {
    ColumnBuilder::new(name, TypeSpec::enumeration(literals))
}
