//! SQL dialect support.
//!
//! Every supported vendor has one stateless [`Dialect`] implementation,
//! registered in a static table keyed by [`Vendor`]. A dialect knows how to
//! declare abstract types, enforce the vendor's size limits, render literals
//! and placeholders, and spell the vendor specific pieces of DDL (identity
//! columns, triggers, guarded drops).

mod db2;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

pub use db2::Db2Dialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ddl::naming;
use crate::error::{Error, Result};
use crate::query::SqlValue;
use crate::schema::{ForeignKeyAction, TypeSpec, UpdateGenerator};

/// Supported database vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// IBM Db2 for Linux, Unix and Windows.
    Db2,
    /// MySQL 8.
    MySql,
    /// Oracle Database 12c and later.
    Oracle,
    /// PostgreSQL.
    Postgres,
    /// Microsoft SQL Server 2016 and later.
    SqlServer,
    /// SQLite 3.
    Sqlite,
}

impl Vendor {
    /// All vendors in registry order.
    pub const ALL: [Self; 6] = [
        Self::Db2,
        Self::MySql,
        Self::Oracle,
        Self::Postgres,
        Self::SqlServer,
        Self::Sqlite,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Db2 => "db2",
            Self::MySql => "mysql",
            Self::Oracle => "oracle",
            Self::Postgres => "postgres",
            Self::SqlServer => "sqlserver",
            Self::Sqlite => "sqlite",
        }
    }

    /// Returns the registered dialect.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Db2 => &DB2,
            Self::MySql => &MYSQL,
            Self::Oracle => &ORACLE,
            Self::Postgres => &POSTGRES,
            Self::SqlServer => &SQLSERVER,
            Self::Sqlite => &SQLITE,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "db2" => Ok(Self::Db2),
            "mysql" => Ok(Self::MySql),
            "oracle" => Ok(Self::Oracle),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(Error::UnsupportedVendor(s.to_string())),
        }
    }
}

static DB2: Db2Dialect = Db2Dialect::new();
static MYSQL: MySqlDialect = MySqlDialect::new();
static ORACLE: OracleDialect = OracleDialect::new();
static POSTGRES: PostgresDialect = PostgresDialect::new();
static SQLSERVER: SqlServerDialect = SqlServerDialect::new();
static SQLITE: SqliteDialect = SqliteDialect::new();

static REGISTRY: [(&str, &'static dyn Dialect); 6] = [
    ("db2", &DB2),
    ("mysql", &MYSQL),
    ("oracle", &ORACLE),
    ("postgres", &POSTGRES),
    ("sqlserver", &SQLSERVER),
    ("sqlite", &SQLITE),
];

/// Returns every registered dialect with its canonical name.
#[must_use]
pub fn registry() -> &'static [(&'static str, &'static dyn Dialect)] {
    &REGISTRY
}

/// Looks a dialect up by vendor name or alias.
///
/// # Errors
///
/// Returns [`Error::UnsupportedVendor`] for names with no registered dialect.
pub fn lookup(name: &str) -> Result<&'static dyn Dialect> {
    Ok(name.parse::<Vendor>()?.dialect())
}

/// What to do with a referential action the vendor cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPolicy {
    /// Drop the clause and log a warning.
    Warn,
    /// Fail with [`Error::Unsupported`].
    Reject,
}

/// How a vendor handles one referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSupport {
    /// The clause is emitted as is.
    Native,
    /// The vendor behaves this way without the clause, which is omitted.
    Implicit,
    /// The vendor cannot express the action.
    Unsupported,
}

/// How enumeration columns are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStrategy {
    /// VARCHAR sized to the longest literal plus a CHECK ... IN clause.
    Check,
    /// Column level `ENUM('a', 'b')`.
    Inline,
    /// Named type created before the table.
    NamedType,
}

/// How auto-increment columns are realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// A fragment appended to the column clause.
    Column(&'static str),
    /// A companion sequence filled in by a BEFORE INSERT trigger.
    SequenceTrigger,
    /// `INTEGER PRIMARY KEY AUTOINCREMENT` row id alias.
    RowidAlias,
}

/// How string concatenation is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatStyle {
    /// Infix operator between operands.
    Operator(&'static str),
    /// Variadic function call.
    Function(&'static str),
}

/// An object removed by a drop script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget<'a> {
    /// A table.
    Table(&'a str),
    /// An index on `table`.
    Index {
        /// Indexed table.
        table: &'a str,
        /// Index name.
        name: &'a str,
    },
    /// A trigger on `table`.
    Trigger {
        /// Triggering table.
        table: &'a str,
        /// Trigger name.
        name: &'a str,
    },
    /// A sequence.
    Sequence(&'a str),
    /// A named type.
    Type(&'a str),
    /// A trigger function without arguments.
    Function(&'a str),
}

/// Everything a vendor needs to spell an update-generator trigger.
#[derive(Debug, Clone, Copy)]
pub struct UpdateTrigger<'a> {
    /// Owning table.
    pub table: &'a str,
    /// Generated column.
    pub column: &'a str,
    /// Column type, to pick between date and timestamp.
    pub type_spec: &'a TypeSpec,
    /// Generator kind.
    pub generator: UpdateGenerator,
    /// Trigger name.
    pub trigger: &'a str,
    /// Trigger function name, for vendors that need one.
    pub function: &'a str,
    /// Primary key columns of the table, possibly empty.
    pub primary_key: &'a [String],
}

impl UpdateTrigger<'_> {
    /// `table.column`, for error messages.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

/// Trait for SQL dialect-specific behavior.
///
/// Only the vendor facts are required; everything else has the ANSI spelling
/// as default and is overridden where a vendor deviates.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Vendor implemented by this dialect.
    fn vendor(&self) -> Vendor;

    /// Returns the name of the dialect.
    fn name(&self) -> &'static str {
        self.vendor().name()
    }

    // ---------------------------------------------------------------------
    // Identifiers
    // ---------------------------------------------------------------------

    /// Opening and closing identifier quote.
    fn identifier_quotes(&self) -> (char, char) {
        ('"', '"')
    }

    /// Quotes an identifier, doubling embedded closing quotes.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.identifier_quotes();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    // ---------------------------------------------------------------------
    // Vendor maxima (None = unbounded)
    // ---------------------------------------------------------------------

    /// Maximum decimal precision.
    fn max_decimal_precision(&self) -> Option<u32>;
    /// Maximum decimal scale.
    fn max_decimal_scale(&self) -> Option<u32>;
    /// Maximum integer precision in digits.
    fn max_integer_precision(&self, unsigned: bool) -> Option<u32>;
    /// Maximum CHAR length.
    fn max_char_length(&self) -> Option<u32>;
    /// Maximum VARCHAR length.
    fn max_varchar_length(&self) -> Option<u32>;
    /// Maximum BINARY length.
    fn max_binary_length(&self) -> Option<u32>;
    /// Maximum VARBINARY length.
    fn max_varbinary_length(&self) -> Option<u32>;

    /// Whether numeric types take a native UNSIGNED qualifier.
    fn allows_unsigned_numeric(&self) -> bool {
        false
    }

    // ---------------------------------------------------------------------
    // Type declarations
    // ---------------------------------------------------------------------

    /// Boolean type.
    fn declare_boolean(&self) -> String {
        String::from("BOOLEAN")
    }

    /// Whether booleans are stored as numbers restricted by a `CHECK (c IN (0, 1))`.
    fn boolean_needs_check(&self) -> bool {
        false
    }

    /// Narrowest integer type holding `precision` digits.
    fn declare_integer(&self, precision: Option<u32>, _unsigned: bool) -> String {
        String::from(match precision {
            Some(p) if p <= 4 => "SMALLINT",
            Some(p) if p <= 9 => "INTEGER",
            Some(_) => "BIGINT",
            None => "INTEGER",
        })
    }

    /// Exact numeric type.
    fn declare_decimal(
        &self,
        precision: Option<u32>,
        scale: Option<u32>,
        _unsigned: bool,
    ) -> String {
        match (precision, scale) {
            (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
            (Some(p), None) => format!("DECIMAL({p})"),
            _ => String::from("DECIMAL"),
        }
    }

    /// Approximate numeric type.
    fn declare_float(&self, double: bool) -> String {
        String::from(if double { "DOUBLE PRECISION" } else { "REAL" })
    }

    /// Fixed length string type.
    fn declare_char(&self, length: u32) -> String {
        format!("CHAR({length})")
    }

    /// Variable length string type.
    fn declare_varchar(&self, length: u32) -> String {
        format!("VARCHAR({length})")
    }

    /// Fixed length binary type.
    fn declare_binary(&self, length: u32) -> String {
        format!("BINARY({length})")
    }

    /// Variable length binary type.
    fn declare_varbinary(&self, length: u32) -> String {
        format!("VARBINARY({length})")
    }

    /// Character large object type.
    fn declare_clob(&self) -> String {
        String::from("CLOB")
    }

    /// Binary large object type.
    fn declare_blob(&self) -> String {
        String::from("BLOB")
    }

    /// Date type.
    fn declare_date(&self) -> String {
        String::from("DATE")
    }

    /// Time of day type, if the vendor has one.
    fn declare_time(&self) -> Option<String> {
        Some(String::from("TIME"))
    }

    /// Date and time type.
    fn declare_datetime(&self) -> String {
        String::from("TIMESTAMP")
    }

    /// Interval type, if the vendor has one.
    fn declare_interval(&self) -> Option<String> {
        None
    }

    /// How enumerations are declared.
    fn enum_strategy(&self) -> EnumStrategy {
        EnumStrategy::Check
    }

    // ---------------------------------------------------------------------
    // Validating wrappers
    // ---------------------------------------------------------------------

    /// Validates and declares an integer column.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`] when the precision exceeds the vendor maximum.
    fn compile_integer(
        &self,
        target: &str,
        precision: Option<u32>,
        unsigned: bool,
    ) -> Result<String> {
        let native_unsigned = unsigned && self.allows_unsigned_numeric();
        if let Some(p) = precision {
            let max = self.max_integer_precision(native_unsigned);
            check_max(self.vendor(), target, "integer precision", p, max)?;
        }
        Ok(self.declare_integer(precision, native_unsigned))
    }

    /// Validates and declares a decimal column.
    ///
    /// # Errors
    ///
    /// [`Error::ScaleExceedsPrecision`], [`Error::Bounds`], or
    /// [`Error::InvalidSchema`] for a scale without precision.
    fn compile_decimal(
        &self,
        target: &str,
        precision: Option<u32>,
        scale: Option<u32>,
        unsigned: bool,
    ) -> Result<String> {
        match (precision, scale) {
            (None, Some(_)) => {
                return Err(Error::InvalidSchema(format!(
                    "decimal '{target}' declares a scale without a precision"
                )));
            }
            (Some(p), Some(s)) if s > p => {
                return Err(Error::ScaleExceedsPrecision {
                    target: target.to_string(),
                    precision: p,
                    scale: s,
                });
            }
            _ => {}
        }
        if let Some(p) = precision {
            check_max(self.vendor(), target, "decimal precision", p, self.max_decimal_precision())?;
        }
        if let Some(s) = scale {
            check_max(self.vendor(), target, "decimal scale", s, self.max_decimal_scale())?;
        }
        let native_unsigned = unsigned && self.allows_unsigned_numeric();
        Ok(self.declare_decimal(precision, scale, native_unsigned))
    }

    /// Validates and declares a CHAR column.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`] above the vendor maximum, [`Error::InvalidSchema`]
    /// for a zero length.
    fn compile_char(&self, target: &str, length: u32) -> Result<String> {
        check_length(self.vendor(), target, "char length", length, self.max_char_length())?;
        Ok(self.declare_char(length))
    }

    /// Validates and declares a VARCHAR column.
    ///
    /// # Errors
    ///
    /// See [`Dialect::compile_char`].
    fn compile_varchar(&self, target: &str, length: u32) -> Result<String> {
        check_length(self.vendor(), target, "varchar length", length, self.max_varchar_length())?;
        Ok(self.declare_varchar(length))
    }

    /// Validates and declares a BINARY column.
    ///
    /// # Errors
    ///
    /// See [`Dialect::compile_char`].
    fn compile_binary(&self, target: &str, length: u32) -> Result<String> {
        check_length(self.vendor(), target, "binary length", length, self.max_binary_length())?;
        Ok(self.declare_binary(length))
    }

    /// Validates and declares a VARBINARY column.
    ///
    /// # Errors
    ///
    /// See [`Dialect::compile_char`].
    fn compile_varbinary(&self, target: &str, length: u32) -> Result<String> {
        let max = self.max_varbinary_length();
        check_length(self.vendor(), target, "varbinary length", length, max)?;
        Ok(self.declare_varbinary(length))
    }

    /// Declares an interval column.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] on vendors without an interval type.
    fn compile_interval(&self, target: &str) -> Result<String> {
        self.declare_interval()
            .ok_or_else(|| Error::unsupported(self.vendor(), format!("INTERVAL column '{target}'")))
    }

    /// Declares an enumeration column of `table`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSchema`] for an empty literal set, or the VARCHAR
    /// bounds error when the longest literal does not fit.
    fn compile_enum(&self, table: &str, column: &str, values: &[String]) -> Result<String> {
        let target = format!("{table}.{column}");
        if values.is_empty() {
            return Err(Error::InvalidSchema(format!("enum '{target}' has no literals")));
        }
        match self.enum_strategy() {
            EnumStrategy::Check => {
                let longest = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);
                let length = u32::try_from(longest.max(1)).map_err(|_| {
                    Error::InvalidSchema(format!("enum literal of '{target}' is too long"))
                })?;
                self.compile_varchar(&target, length)
            }
            EnumStrategy::Inline => {
                let literals: Vec<String> = values.iter().map(|v| self.string_literal(v)).collect();
                Ok(format!("ENUM({})", literals.join(", ")))
            }
            EnumStrategy::NamedType => {
                Ok(self.quote_identifier(&naming::enum_type(table, column)))
            }
        }
    }

    /// Validates and declares any column type.
    ///
    /// # Errors
    ///
    /// Whatever the specific `compile_*` wrapper raises; TIME fails with
    /// [`Error::Unsupported`] on vendors without a time type.
    fn compile_type(&self, table: &str, column: &str, spec: &TypeSpec) -> Result<String> {
        let target = format!("{table}.{column}");
        match spec {
            TypeSpec::Boolean => Ok(self.declare_boolean()),
            TypeSpec::Integer { precision, unsigned } => {
                self.compile_integer(&target, *precision, *unsigned)
            }
            TypeSpec::Decimal {
                precision,
                scale,
                unsigned,
            } => self.compile_decimal(&target, *precision, *scale, *unsigned),
            TypeSpec::Float { double } => Ok(self.declare_float(*double)),
            TypeSpec::Char { length } => self.compile_char(&target, *length),
            TypeSpec::Varchar { length } => self.compile_varchar(&target, *length),
            TypeSpec::Binary { length } => self.compile_binary(&target, *length),
            TypeSpec::Varbinary { length } => self.compile_varbinary(&target, *length),
            TypeSpec::Clob => Ok(self.declare_clob()),
            TypeSpec::Blob => Ok(self.declare_blob()),
            TypeSpec::Date => Ok(self.declare_date()),
            TypeSpec::Time => self.declare_time().ok_or_else(|| {
                Error::unsupported(self.vendor(), format!("TIME column '{target}'"))
            }),
            TypeSpec::DateTime => Ok(self.declare_datetime()),
            TypeSpec::Interval => self.compile_interval(&target),
            TypeSpec::Enum { values } => self.compile_enum(table, column, values),
        }
    }

    // ---------------------------------------------------------------------
    // Generated values
    // ---------------------------------------------------------------------

    /// How auto-increment is realized.
    fn identity(&self) -> IdentityStrategy;

    /// Default expression producing a UUID string, if the vendor has one.
    fn uuid_default(&self) -> Option<&'static str> {
        None
    }

    /// Current timestamp expression.
    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// Current date expression.
    fn current_date(&self) -> &'static str {
        "CURRENT_DATE"
    }

    /// Character length function used by length range checks.
    fn length_function(&self) -> &'static str {
        "LENGTH"
    }

    /// Column clause fragment realizing an update generator natively.
    fn on_update_fragment(&self, _generator: UpdateGenerator, _spec: &TypeSpec) -> Option<String> {
        None
    }

    /// CREATE SEQUENCE for identity emulation.
    fn create_sequence(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1",
            self.quote_identifier(name)
        )
    }

    /// BEFORE INSERT trigger filling `column` from `sequence` when NULL.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] unless the vendor realizes identity with a
    /// sequence and trigger.
    fn identity_trigger(
        &self,
        table: &str,
        column: &str,
        _sequence: &str,
        _trigger: &str,
    ) -> Result<Vec<String>> {
        Err(Error::unsupported(
            self.vendor(),
            format!("sequence backed auto-increment on '{table}.{column}'"),
        ))
    }

    /// AFTER INSERT trigger numbering `column` as `MAX + 1` when inserted as NULL.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] unless the vendor falls back to such a trigger.
    fn max_plus_one_trigger(
        &self,
        table: &str,
        column: &str,
        _trigger: &str,
    ) -> Result<Vec<String>> {
        Err(Error::unsupported(
            self.vendor(),
            format!("trigger numbered auto-increment on '{table}.{column}'"),
        ))
    }

    /// Statements (trigger and helpers) realizing an update generator.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] when the vendor cannot express the trigger.
    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>>;

    /// Whether update triggers come with a named function to drop.
    fn uses_trigger_function(&self) -> bool {
        false
    }

    /// New-value expression for an update generator of `spec`.
    fn generated_now(&self, spec: &TypeSpec) -> &'static str {
        if matches!(spec, TypeSpec::Date) {
            self.current_date()
        } else {
            self.current_timestamp()
        }
    }

    // ---------------------------------------------------------------------
    // DDL details
    // ---------------------------------------------------------------------

    /// Whether nullable columns are spelled with an explicit NULL.
    fn explicit_null(&self) -> bool {
        false
    }

    /// Whether CREATE TABLE accepts IF NOT EXISTS.
    fn supports_create_if_not_exists(&self) -> bool {
        false
    }

    /// How a referential action is handled.
    fn action_support(&self, _action: ForeignKeyAction, _on_update: bool) -> ActionSupport {
        ActionSupport::Native
    }

    /// Default policy for unsupported referential actions.
    fn action_policy(&self) -> ActionPolicy {
        ActionPolicy::Warn
    }

    /// Guarded drop statements for one object.
    fn drop_statements(&self, target: DropTarget<'_>) -> Vec<String> {
        native_drop(self, target)
    }

    /// Terminator written after `sql` in a script.
    fn script_terminator(&self, _sql: &str) -> &'static str {
        ";"
    }

    // ---------------------------------------------------------------------
    // Literals
    // ---------------------------------------------------------------------

    /// Boolean literal.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// String literal with single quotes doubled.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Binary literal.
    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex(bytes))
    }

    /// Date literal.
    fn date_literal(&self, date: NaiveDate) -> String {
        format!("DATE '{}'", date.format(DATE_FORMAT))
    }

    /// Time literal.
    fn time_literal(&self, time: NaiveTime) -> String {
        format!("TIME '{}'", time.format(TIME_FORMAT))
    }

    /// Timestamp literal.
    fn timestamp_literal(&self, timestamp: NaiveDateTime) -> String {
        format!("TIMESTAMP '{}'", timestamp.format(TIMESTAMP_FORMAT))
    }

    /// Renders any value inline.
    fn render_literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Null => String::from("NULL"),
            SqlValue::Bool(b) => String::from(self.boolean_literal(*b)),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) if f.is_finite() => f.to_string(),
            SqlValue::Float(_) => String::from("NULL"),
            SqlValue::Decimal(d) if is_decimal_text(d) => d.clone(),
            SqlValue::Decimal(d) => self.string_literal(d),
            SqlValue::Text(s) => self.string_literal(s),
            SqlValue::Blob(b) => self.binary_literal(b),
            SqlValue::Date(d) => self.date_literal(*d),
            SqlValue::Time(t) => self.time_literal(*t),
            SqlValue::Timestamp(ts) => self.timestamp_literal(*ts),
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Placeholder for the 1-based parameter `index`.
    fn placeholder(&self, _index: usize) -> String {
        String::from("?")
    }

    /// How strings are concatenated.
    fn concat_style(&self) -> ConcatStyle {
        ConcatStyle::Operator("||")
    }

    /// Row limiting clause, with a leading space, or empty.
    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        if let Some(m) = offset {
            sql.push_str(&format!(" OFFSET {m}"));
        }
        sql
    }

    /// Whether INSERT accepts several rows in one VALUES clause.
    fn supports_multi_row_insert(&self) -> bool {
        true
    }
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S%.f";
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Uppercase hex encoding.
pub(crate) fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02X}");
        s
    })
}

/// Native `IF EXISTS` drop forms.
pub(crate) fn native_drop<D: Dialect + ?Sized>(dialect: &D, target: DropTarget<'_>) -> Vec<String> {
    let q = |name: &str| dialect.quote_identifier(name);
    vec![match target {
        DropTarget::Table(name) => format!("DROP TABLE IF EXISTS {}", q(name)),
        DropTarget::Index { name, .. } => format!("DROP INDEX IF EXISTS {}", q(name)),
        DropTarget::Trigger { name, .. } => format!("DROP TRIGGER IF EXISTS {}", q(name)),
        DropTarget::Sequence(name) => format!("DROP SEQUENCE IF EXISTS {}", q(name)),
        DropTarget::Type(name) => format!("DROP TYPE IF EXISTS {}", q(name)),
        DropTarget::Function(name) => format!("DROP FUNCTION IF EXISTS {}()", q(name)),
    }]
}

/// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`, shared by the ANSI row limiting vendors.
pub(crate) fn fetch_clause(limit: Option<u64>, offset: Option<u64>) -> String {
    let mut sql = String::new();
    if let Some(m) = offset {
        sql.push_str(&format!(" OFFSET {m} ROWS"));
    }
    if let Some(n) = limit {
        if offset.is_some() {
            sql.push_str(&format!(" FETCH NEXT {n} ROWS ONLY"));
        } else {
            sql.push_str(&format!(" FETCH FIRST {n} ROWS ONLY"));
        }
    }
    sql
}

fn is_decimal_text(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    !(int.is_empty() && frac.is_empty())
        && int.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit())
}

fn check_max(
    vendor: Vendor,
    target: &str,
    what: &'static str,
    value: u32,
    max: Option<u32>,
) -> Result<()> {
    match max {
        Some(max) if value > max => Err(Error::Bounds {
            vendor,
            target: target.to_string(),
            what,
            value,
            max,
        }),
        _ => Ok(()),
    }
}

fn check_length(
    vendor: Vendor,
    target: &str,
    what: &'static str,
    value: u32,
    max: Option<u32>,
) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidSchema(format!("{what} of '{target}' must be positive")));
    }
    check_max(vendor, target, what, value, max)
}
