//! Microsoft SQL Server dialect.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{
    fetch_clause, hex, native_drop, ActionSupport, ConcatStyle, Dialect, DropTarget,
    IdentityStrategy, UpdateTrigger, Vendor, DATE_FORMAT, TIMESTAMP_FORMAT, TIME_FORMAT,
};
use crate::error::{Error, Result};
use crate::schema::{ForeignKeyAction, UpdateGenerator};

/// SQL Server dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn vendor(&self) -> Vendor {
        Vendor::SqlServer
    }

    fn identifier_quotes(&self) -> (char, char) {
        ('[', ']')
    }

    fn max_decimal_precision(&self) -> Option<u32> {
        Some(38)
    }

    fn max_decimal_scale(&self) -> Option<u32> {
        Some(38)
    }

    fn max_integer_precision(&self, _unsigned: bool) -> Option<u32> {
        Some(18)
    }

    fn max_char_length(&self) -> Option<u32> {
        Some(8000)
    }

    fn max_varchar_length(&self) -> Option<u32> {
        Some(8000)
    }

    fn max_binary_length(&self) -> Option<u32> {
        Some(8000)
    }

    fn max_varbinary_length(&self) -> Option<u32> {
        Some(8000)
    }

    fn declare_boolean(&self) -> String {
        String::from("BIT")
    }

    fn declare_integer(&self, precision: Option<u32>, _unsigned: bool) -> String {
        String::from(match precision {
            Some(p) if p <= 4 => "SMALLINT",
            Some(p) if p <= 9 => "INT",
            Some(_) => "BIGINT",
            None => "INT",
        })
    }

    fn declare_float(&self, double: bool) -> String {
        String::from(if double { "FLOAT" } else { "REAL" })
    }

    fn declare_clob(&self) -> String {
        String::from("VARCHAR(MAX)")
    }

    fn declare_blob(&self) -> String {
        String::from("VARBINARY(MAX)")
    }

    fn declare_datetime(&self) -> String {
        String::from("DATETIME2")
    }

    fn identity(&self) -> IdentityStrategy {
        IdentityStrategy::Column("IDENTITY(1,1)")
    }

    fn uuid_default(&self) -> Option<&'static str> {
        Some("CONVERT(VARCHAR(36), NEWID())")
    }

    fn current_timestamp(&self) -> &'static str {
        "SYSDATETIME()"
    }

    fn current_date(&self) -> &'static str {
        "CAST(GETDATE() AS DATE)"
    }

    fn length_function(&self) -> &'static str {
        "LEN"
    }

    fn update_trigger(&self, trigger: &UpdateTrigger<'_>) -> Result<Vec<String>> {
        if trigger.primary_key.is_empty() {
            return Err(Error::unsupported(
                self.vendor(),
                format!("update generator on '{}' without a primary key", trigger.target()),
            ));
        }
        let table = self.quote_identifier(trigger.table);
        let column = self.quote_identifier(trigger.column);
        // `inserted` carries the new row, `deleted` the previous one.
        let (pseudo, value) = match trigger.generator {
            UpdateGenerator::Now => (
                "inserted",
                String::from(self.generated_now(trigger.type_spec)),
            ),
            UpdateGenerator::Increment => ("deleted", format!("p.{column} + 1")),
        };
        let join: Vec<String> = trigger
            .primary_key
            .iter()
            .map(|k| {
                let k = self.quote_identifier(k);
                format!("{table}.{k} = p.{k}")
            })
            .collect();
        Ok(vec![format!(
            "CREATE TRIGGER {} ON {table} AFTER UPDATE AS\nBEGIN\n    SET NOCOUNT ON;\n    \
             UPDATE {table} SET {column} = {value} FROM {table} INNER JOIN {pseudo} p ON {};\nEND",
            self.quote_identifier(trigger.trigger),
            join.join(" AND "),
        )])
    }

    fn explicit_null(&self) -> bool {
        true
    }

    fn action_support(&self, action: ForeignKeyAction, _on_update: bool) -> ActionSupport {
        match action {
            ForeignKeyAction::Restrict => ActionSupport::Unsupported,
            _ => ActionSupport::Native,
        }
    }

    fn drop_statements(&self, target: DropTarget<'_>) -> Vec<String> {
        match target {
            DropTarget::Index { table, name } => vec![format!(
                "DROP INDEX IF EXISTS {} ON {}",
                self.quote_identifier(name),
                self.quote_identifier(table)
            )],
            other => native_drop(self, other),
        }
    }

    fn script_terminator(&self, sql: &str) -> &'static str {
        if sql.starts_with("CREATE TRIGGER") {
            "\nGO"
        } else {
            ";"
        }
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("0x{}", hex(bytes))
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("CAST('{}' AS DATE)", date.format(DATE_FORMAT))
    }

    fn time_literal(&self, time: NaiveTime) -> String {
        format!("CAST('{}' AS TIME)", time.format(TIME_FORMAT))
    }

    fn timestamp_literal(&self, timestamp: NaiveDateTime) -> String {
        format!("CAST('{}' AS DATETIME2)", timestamp.format(TIMESTAMP_FORMAT))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{index}")
    }

    fn concat_style(&self) -> ConcatStyle {
        ConcatStyle::Operator("+")
    }

    fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>, ordered: bool) -> String {
        if limit.is_none() && offset.is_none() {
            return String::new();
        }
        // OFFSET/FETCH is only valid after ORDER BY, and always needs OFFSET.
        let mut sql = String::new();
        if !ordered {
            sql.push_str(" ORDER BY (SELECT NULL)");
        }
        sql.push_str(&fetch_clause(limit, Some(offset.unwrap_or(0))));
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeSpec;

    #[test]
    fn test_sqlserver_limit_adds_order_by() {
        let d = SqlServerDialect::new();
        assert_eq!(
            d.limit_clause(Some(10), None, false),
            " ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(
            d.limit_clause(Some(10), Some(5), true),
            " OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(d.limit_clause(None, None, false), "");
    }

    #[test]
    fn test_sqlserver_update_trigger_requires_primary_key() {
        let spec = TypeSpec::integer(9);
        let trigger = UpdateTrigger {
            table: "doc",
            column: "version",
            type_spec: &spec,
            generator: UpdateGenerator::Increment,
            trigger: "trg_doc_version_upd",
            function: "fn_doc_version_upd",
            primary_key: &[],
        };
        assert!(matches!(
            SqlServerDialect::new().update_trigger(&trigger),
            Err(Error::Unsupported { vendor: Vendor::SqlServer, .. })
        ));

        let key = vec![String::from("id")];
        let trigger = UpdateTrigger {
            primary_key: &key,
            ..trigger
        };
        let sql = SqlServerDialect::new().update_trigger(&trigger).unwrap();
        assert!(sql[0].contains(
            "UPDATE [doc] SET [version] = p.[version] + 1 FROM [doc] INNER JOIN deleted p ON [doc].[id] = p.[id];"
        ));
    }

    #[test]
    fn test_sqlserver_literals() {
        let d = SqlServerDialect::new();
        assert_eq!(d.placeholder(2), "@p2");
        assert_eq!(d.binary_literal(&[0xAB, 0x01]), "0xAB01");
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(d.date_literal(date), "CAST('2024-01-31' AS DATE)");
    }
}
