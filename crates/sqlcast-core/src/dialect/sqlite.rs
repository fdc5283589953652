//! SQLite dialect.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{
    Dialect, IdentityStrategy, UpdateTrigger, Vendor, DATE_FORMAT, TIMESTAMP_FORMAT, TIME_FORMAT,
};
use crate::error::Result;
use crate::schema::UpdateGenerator;

/// Version 4 UUID assembled from `randomblob`.
const UUID_EXPRESSION: &str = "(lower(hex(randomblob(4))) || '-' || lower(hex(randomblob(2))) \
    || '-4' || substr(lower(hex(randomblob(2))), 2) || '-' \
    || substr('89ab', 1 + (abs(random()) % 4), 1) || substr(lower(hex(randomblob(2))), 2) \
    || '-' || lower(hex(randomblob(6))))";

/// SQLite dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn vendor(&self) -> Vendor {
        Vendor::Sqlite
    }

    fn max_decimal_precision(&self) -> Option<u32> {
        None
    }

    fn max_decimal_scale(&self) -> Option<u32> {
        None
    }

    fn max_integer_precision(&self, _unsigned: bool) -> Option<u32> {
        Some(18)
    }

    fn max_char_length(&self) -> Option<u32> {
        None
    }

    fn max_varchar_length(&self) -> Option<u32> {
        None
    }

    fn max_binary_length(&self) -> Option<u32> {
        None
    }

    fn max_varbinary_length(&self) -> Option<u32> {
        None
    }

    fn declare_integer(&self, _precision: Option<u32>, _unsigned: bool) -> String {
        String::from("INTEGER")
    }

    fn declare_float(&self, _double: bool) -> String {
        String::from("REAL")
    }

    fn declare_binary(&self, _length: u32) -> String {
        String::from("BLOB")
    }

    fn declare_varbinary(&self, _length: u32) -> String {
        String::from("BLOB")
    }

    fn declare_clob(&self) -> String {
        String::from("TEXT")
    }

    fn identity(&self) -> IdentityStrategy {
        IdentityStrategy::RowidAlias
    }

    fn uuid_default(&self) -> Option<&'static str> {
        Some(UUID_EXPRESSION)
    }

    fn max_plus_one_trigger(
        &self,
        table: &str,
        column: &str,
        trigger: &str,
    ) -> Result<Vec<String>> {
        let table = self.quote_identifier(table);
        let column = self.quote_identifier(column);
        Ok(vec![format!(
            "CREATE TRIGGER {} AFTER INSERT ON {table} FOR EACH ROW WHEN NEW.{column} IS NULL\n\
             BEGIN\n    UPDATE {table} SET {column} = \
             (SELECT COALESCE(MAX({column}), 0) + 1 FROM {table}) WHERE rowid = NEW.rowid;\nEND",
            self.quote_identifier(trigger),
        )])
    }

    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>> {
        let table = self.quote_identifier(trigger.table);
        let column = self.quote_identifier(trigger.column);
        let value = match trigger.generator {
            UpdateGenerator::Now => String::from(self.generated_now(trigger.type_spec)),
            UpdateGenerator::Increment => format!("OLD.{column} + 1"),
        };
        // The WHEN guard keeps an explicit assignment and stops recursion.
        Ok(vec![format!(
            "CREATE TRIGGER {} AFTER UPDATE ON {table} FOR EACH ROW WHEN NEW.{column} IS OLD.{column}\n\
             BEGIN\n    UPDATE {table} SET {column} = {value} WHERE rowid = NEW.rowid;\nEND",
            self.quote_identifier(trigger.trigger),
        )])
    }

    fn supports_create_if_not_exists(&self) -> bool {
        true
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("'{}'", date.format(DATE_FORMAT))
    }

    fn time_literal(&self, time: NaiveTime) -> String {
        format!("'{}'", time.format(TIME_FORMAT))
    }

    fn timestamp_literal(&self, timestamp: NaiveDateTime) -> String {
        format!("'{}'", timestamp.format(TIMESTAMP_FORMAT))
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        match (limit, offset) {
            (Some(n), Some(m)) => format!(" LIMIT {n} OFFSET {m}"),
            (Some(n), None) => format!(" LIMIT {n}"),
            (None, Some(m)) => format!(" LIMIT -1 OFFSET {m}"),
            (None, None) => String::new(),
        }
    }
}
